//! Cross-difficulty hitsound consistency check.
//!
//! # Algorithm Summary
//!
//! 1. Classify difficulties into shared and independent hitsound schemes
//!    (see [`classify`]); report each independent one once.
//! 2. For every event edge of every shared difficulty, sample the cue the
//!    other shared difficulties play at the same instant, on an edge of the
//!    same kind where they have one, and report cues they have that this one
//!    lacks.
//! 3. Over all difficulties, report spans whose body carries cues.

use serde::{Deserialize, Serialize};

use crate::cue::CueFlags;
use crate::event::Edge;
use crate::finding::Finding;
use crate::sampler::{ResolvedCue, sample_edge};
use crate::scorer::{Scheme, classify};
use crate::types::VariantName;
use crate::variant::EventTrack;

/// Tunables shared by the registered checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckConfig {
    /// A missing-cue finding needs at least this many contributing
    /// difficulties. Default: 1.
    pub min_contributors: usize,

    /// Upper bound on cross-difficulty samples in one hitsound check, scoring
    /// included. Default: 10,000,000.
    pub max_comparisons: usize,

    /// A span-only section needs more spans than this. Default: 6.
    pub span_section_min_count: usize,

    /// A span-only section must last longer than this. Default: 5000 (5 seconds).
    pub span_section_min_duration_ms: f64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            min_contributors: 1,
            max_comparisons: 10_000_000,
            span_section_min_count: 6,
            span_section_min_duration_ms: 5_000.0,
        }
    }
}

/// Cues missing at one instant, gathered across the other difficulties.
#[derive(Default)]
struct MissingAt<'a> {
    cues: CueFlags,
    contributors: Vec<&'a VariantName>,
}

/// Runs the hitsound consistency check over a difficulty set.
///
/// Sets with fewer than two difficulties have nothing to compare and yield no
/// findings. Findings are ordered: independent schemes, then missing cues by
/// difficulty and event, then span body cues.
pub fn check_hitsounds<V: EventTrack + Sync>(variants: &[V], config: &CheckConfig) -> Vec<Finding> {
    if variants.len() < 2 {
        return Vec::new();
    }

    let classification = classify(variants, config.max_comparisons);
    let shared: Vec<&V> = classification
        .indices(Scheme::Shared)
        .map(|index| &variants[index])
        .collect();

    let mut findings: Vec<Finding> = classification
        .indices(Scheme::Independent)
        .map(|index| Finding::IndependentScheme {
            variant: variants[index].name().clone(),
        })
        .collect();

    let mut budget = config.max_comparisons.saturating_sub(classification.comparisons);
    'variants: for (subject, variant) in shared.iter().enumerate() {
        for event in variant.events() {
            for edge in event.edges() {
                let Some(cost) = shared.len().checked_sub(1).filter(|cost| *cost <= budget) else {
                    tracing::warn!(
                        max_comparisons = config.max_comparisons,
                        variant = %variant.name(),
                        "comparison budget exhausted, skipping remaining hitsound comparisons"
                    );
                    break 'variants;
                };
                budget -= cost;

                if let Some(finding) = compare_at(subject, &shared, edge, config) {
                    findings.push(finding);
                }
            }
        }
    }

    findings.extend(span_body_cues(variants));

    tracing::debug!(
        variants = variants.len(),
        shared = shared.len(),
        findings = findings.len(),
        "hitsound check finished"
    );
    findings
}

/// Compares the cue `shared[subject]` plays at `edge` against every other
/// shared difficulty.
fn compare_at<V: EventTrack>(
    subject: usize,
    shared: &[&V],
    edge: Edge,
    config: &CheckConfig,
) -> Option<Finding> {
    let variant = shared[subject];
    let own = ResolvedCue::from(edge);

    let mut missing = MissingAt::default();
    for (index, other) in shared.iter().enumerate() {
        if index == subject {
            continue;
        }
        let Some(theirs) = sample_edge(*other, own.time, edge.kind) else {
            continue;
        };
        let lacking = theirs.cue.cues.difference(own.cue.cues);
        if !lacking.is_empty() {
            missing.cues = missing.cues.union(lacking);
            if !missing.contributors.contains(&other.name()) {
                missing.contributors.push(other.name());
            }
        }
    }

    if missing.cues.is_empty() || missing.contributors.len() < config.min_contributors {
        return None;
    }

    Some(Finding::MissingCues {
        timestamp: own.time,
        variant: variant.name().clone(),
        missing: missing.cues.iter().collect(),
        contributors: missing.contributors.into_iter().cloned().collect(),
    })
}

/// Spans whose start cue carries auxiliary cues, across every difficulty.
fn span_body_cues<V: EventTrack>(variants: &[V]) -> impl Iterator<Item = Finding> + '_ {
    variants.iter().flat_map(|variant| {
        variant
            .events()
            .iter()
            .filter(|event| event.is_span() && !event.start_cue().cues.is_empty())
            .map(move |event| Finding::SpanBodyCue {
                timestamp: event.start().floor(),
                variant: variant.name().clone(),
            })
    })
}
