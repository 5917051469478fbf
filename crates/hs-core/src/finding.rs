//! Check output and its severity policy.

use std::fmt;

use serde::Serialize;

use crate::cue::CueKind;
use crate::types::VariantName;

/// One detected inconsistency.
///
/// Findings carry data only; rendering them is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    /// The difficulty uses its own hitsound design and was left out of the
    /// per-event comparison.
    IndependentScheme { variant: VariantName },

    /// Cues other difficulties play at `timestamp` are absent here.
    MissingCues {
        timestamp: f64,
        variant: VariantName,
        /// Deduplicated, in canonical cue order.
        missing: Vec<CueKind>,
        /// Difficulties that play at least one of the missing cues, in input order.
        contributors: Vec<VariantName>,
    },

    /// A span carries cues on its body, which is rarely intended.
    SpanBodyCue {
        timestamp: f64,
        variant: VariantName,
    },

    /// A long run of spans with no point events in a low-tier difficulty.
    SpanOnlySection {
        timestamp: f64,
        variant: VariantName,
        span_count: usize,
        duration_ms: f64,
    },
}

impl Finding {
    /// The difficulty the finding is about.
    pub const fn variant(&self) -> &VariantName {
        match self {
            Self::IndependentScheme { variant }
            | Self::MissingCues { variant, .. }
            | Self::SpanBodyCue { variant, .. }
            | Self::SpanOnlySection { variant, .. } => variant,
        }
    }

    /// Where in the song the finding applies, if anywhere in particular.
    pub const fn timestamp(&self) -> Option<f64> {
        match *self {
            Self::IndependentScheme { .. } => None,
            Self::MissingCues { timestamp, .. }
            | Self::SpanBodyCue { timestamp, .. }
            | Self::SpanOnlySection { timestamp, .. } => Some(timestamp),
        }
    }

    /// Severity within a set of `variant_count` difficulties.
    ///
    /// Missing cues are major only when more difficulties back them than
    /// [`severity_cutoff`] allows; everything else is always major.
    pub fn severity(&self, variant_count: usize) -> Severity {
        match self {
            Self::MissingCues { contributors, .. }
                if contributors.len() <= severity_cutoff(variant_count) =>
            {
                Severity::Minor
            }
            _ => Severity::Major,
        }
    }
}

/// Number of contributing difficulties a missing cue may have and still be
/// considered a per-difficulty stylistic choice.
///
/// Zero for sets of up to two difficulties, otherwise half the set minus one.
pub const fn severity_cutoff(variant_count: usize) -> usize {
    if variant_count > 2 {
        (variant_count / 2).saturating_sub(1)
    } else {
        0
    }
}

/// How confident a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Likely a deliberate per-difficulty choice.
    Minor,
    /// Likely a mistake worth fixing.
    Major,
}

impl Severity {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
