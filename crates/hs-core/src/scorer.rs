//! Detection of difficulties with their own hitsound design.
//!
//! Each difficulty gets an inconsistency score: the number of (event, other
//! difficulty) pairs whose resolved cues disagree, divided by the number of
//! difficulties. A difficulty is treated as independently hitsounded when its
//! score, after removing the set-wide baseline, is both above average and
//! larger than a quarter of its own event count.
//!
//! Scoring shares the `max_comparisons` budget with the pairwise check: each
//! difficulty is scored on at most its fair share of events.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::event::EdgeKind;
use crate::sampler::{ResolvedCue, sample_edge};
use crate::variant::EventTrack;

/// An adjusted score must exceed `events / EVENT_SHARE_DIVISOR` to count.
const EVENT_SHARE_DIVISOR: usize = 4;

/// Whether a difficulty's hitsounds are compared against the rest of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    Shared,
    Independent,
}

impl Scheme {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shared => "shared",
            Self::Independent => "independent",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score breakdown for one difficulty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemeScore {
    /// Disagreeing pairs divided by the set size, truncated.
    pub raw: usize,
    /// `raw` minus the lowest raw score in the set.
    pub adjusted: usize,
    pub scheme: Scheme,
}

/// Scheme classification of a difficulty set, index-aligned with the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub scores: Vec<SchemeScore>,
    pub min_score: usize,
    pub average_score: f64,
    /// Sample pairs spent on scoring.
    pub comparisons: usize,
}

impl Classification {
    /// Indices of difficulties with the given scheme, in input order.
    pub fn indices(&self, scheme: Scheme) -> impl Iterator<Item = usize> + '_ {
        self.scores
            .iter()
            .enumerate()
            .filter(move |(_, score)| score.scheme == scheme)
            .map(|(index, _)| index)
    }
}

/// Raw inconsistency score of `variants[subject]` against the rest of the set,
/// over its first `max_events` events.
///
/// Unresolvable samples do not count as disagreement. Differences in sample
/// set or addition set count just like differing cues.
pub fn inconsistency_score<V: EventTrack>(
    subject: usize,
    variants: &[V],
    max_events: usize,
) -> usize {
    let Some(variant) = variants.get(subject) else {
        return 0;
    };

    let disagreements: usize = variant
        .events()
        .iter()
        .take(max_events)
        .map(|event| {
            let own = ResolvedCue::from(event.start_edge());
            variants
                .iter()
                .enumerate()
                .filter(|(index, _)| *index != subject)
                .filter_map(|(_, other)| sample_edge(other, own.time, EdgeKind::Start))
                .filter(|theirs| theirs.cue != own.cue)
                .count()
        })
        .sum();

    disagreements / variants.len()
}

/// Partitions difficulties into shared and independent hitsound schemes,
/// spending at most `max_comparisons` sample pairs.
///
/// The result does not depend on input order.
#[expect(
    clippy::cast_precision_loss,
    reason = "scores are bounded by event counts, far below 2^52"
)]
pub fn classify<V: EventTrack + Sync>(variants: &[V], max_comparisons: usize) -> Classification {
    let others = variants.len().saturating_sub(1);
    let max_events = max_comparisons / variants.len().max(1) / others.max(1);
    let truncated = variants.iter().find(|v| v.events().len() > max_events);
    if let Some(variant) = truncated.filter(|_| others > 0) {
        tracing::warn!(
            max_comparisons,
            max_events,
            variant = %variant.name(),
            "comparison budget exhausted, scoring only the first events of each difficulty"
        );
    }
    let scored = |variant: &V| variant.events().len().min(max_events);

    let raw: Vec<usize> = (0..variants.len())
        .into_par_iter()
        .map(|index| inconsistency_score(index, variants, max_events))
        .collect();
    let comparisons: usize = variants.iter().map(|variant| scored(variant) * others).sum();

    let min_score = raw.iter().copied().min().unwrap_or(0);
    let average_score = if raw.is_empty() {
        0.0
    } else {
        raw.iter().sum::<usize>() as f64 / raw.len() as f64
    };

    let scores = raw
        .iter()
        .zip(variants)
        .map(|(&raw, variant)| {
            let adjusted = raw.saturating_sub(min_score);
            let independent =
                adjusted as f64 > average_score && adjusted > scored(variant) / EVENT_SHARE_DIVISOR;
            SchemeScore {
                raw,
                adjusted,
                scheme: if independent {
                    Scheme::Independent
                } else {
                    Scheme::Shared
                },
            }
        })
        .collect();

    let classification = Classification {
        scores,
        min_score,
        average_score,
        comparisons,
    };
    tracing::debug!(
        variants = variants.len(),
        independent = classification.indices(Scheme::Independent).count(),
        min_score,
        average_score,
        comparisons,
        "classified hitsound schemes"
    );
    classification
}
