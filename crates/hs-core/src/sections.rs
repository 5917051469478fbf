//! Span-only sections in low-tier difficulties.
//!
//! Newer players tire quickly when they have to alternate between clicking and
//! holding with no plain hits in between, so long runs of consecutive spans in
//! Easy and Normal difficulties are reported.

use crate::engine::CheckConfig;
use crate::event::PlayableEvent;
use crate::finding::Finding;
use crate::variant::EventTrack;

/// A run of consecutive spans.
#[derive(Debug, Clone, Copy)]
struct SpanRun {
    first_start: f64,
    last_end: f64,
    count: usize,
    /// Span bodies plus the gaps between them.
    duration_ms: f64,
}

impl SpanRun {
    const fn new(start: f64, end: f64) -> Self {
        Self {
            first_start: start,
            last_end: end,
            count: 1,
            duration_ms: end - start,
        }
    }

    fn extend(&mut self, start: f64, end: f64) {
        self.duration_ms += (start - self.last_end) + (end - start);
        self.last_end = end;
        self.count += 1;
    }
}

/// Reports span-only sections for every Easy or Normal difficulty.
///
/// Difficulties without a known tier are skipped.
pub fn check_span_only_sections<V: EventTrack>(
    variants: &[V],
    config: &CheckConfig,
) -> Vec<Finding> {
    variants
        .iter()
        .filter(|variant| variant.tier().is_some_and(|tier| tier.is_low()))
        .flat_map(|variant| span_only_sections(variant, config))
        .collect()
}

/// Finds runs of more than `span_section_min_count` consecutive spans lasting
/// longer than `span_section_min_duration_ms` in one difficulty.
///
/// A run does not need a point event after it: one that lasts until the end
/// of the difficulty is judged the same way.
pub fn span_only_sections<V: EventTrack + ?Sized>(
    variant: &V,
    config: &CheckConfig,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut current: Option<SpanRun> = None;

    let close = |run: Option<SpanRun>, findings: &mut Vec<Finding>| {
        let Some(run) = run else { return };
        if run.count > config.span_section_min_count
            && run.duration_ms > config.span_section_min_duration_ms
        {
            findings.push(Finding::SpanOnlySection {
                timestamp: run.first_start.floor(),
                variant: variant.name().clone(),
                span_count: run.count,
                duration_ms: run.duration_ms,
            });
        }
    };

    for event in variant.events() {
        match *event {
            PlayableEvent::Span { start, end, .. } => match current.as_mut() {
                Some(run) => run.extend(start, end),
                None => current = Some(SpanRun::new(start, end)),
            },
            PlayableEvent::Point { .. } => close(current.take(), &mut findings),
        }
    }
    close(current.take(), &mut findings);

    findings
}
