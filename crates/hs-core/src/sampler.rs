//! Effective cue lookup at an arbitrary instant.

use crate::cue::CueDescriptor;
use crate::event::{Edge, EdgeKind, PlayableEvent};
use crate::variant::EventTrack;

/// Maximum distance between two instants treated as the same moment.
///
/// Absorbs rounding drift between difficulties that share a timestamp.
pub const TOLERANCE_MS: f64 = 1.0;

/// The cue a difficulty plays at some instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCue {
    /// Time of the matched event edge, floored to whole milliseconds.
    pub time: f64,
    pub cue: CueDescriptor,
}

impl From<Edge> for ResolvedCue {
    fn from(edge: Edge) -> Self {
        Self {
            time: edge.time.floor(),
            cue: edge.cue,
        }
    }
}

/// Returns the cue `variant` plays at `time`.
///
/// Resolves only when `time` lies within [`TOLERANCE_MS`] of a point event or
/// of either edge of a span. Instants inside a span body are never judged.
/// When several edges qualify the latest event wins, and a start wins over an
/// end.
pub fn sample<V: EventTrack + ?Sized>(variant: &V, time: f64) -> Option<ResolvedCue> {
    edges_near(variant, time).next().map(ResolvedCue::from)
}

/// Like [`sample`], but prefers an edge of `kind` when edges of both kinds
/// qualify, as when a span ends exactly where the next point starts.
pub fn sample_edge<V: EventTrack + ?Sized>(
    variant: &V,
    time: f64,
    kind: EdgeKind,
) -> Option<ResolvedCue> {
    edges_near(variant, time)
        .find(|edge| edge.kind == kind)
        .map(ResolvedCue::from)
        .or_else(|| sample(variant, time))
}

/// Edges within tolerance of `time`, latest event first.
fn edges_near<V: EventTrack + ?Sized>(variant: &V, time: f64) -> impl Iterator<Item = Edge> + '_ {
    // Events are sorted and non-overlapping, so ends are ordered too.
    variant
        .events_until(time)
        .iter()
        .rev()
        .take_while(move |event| event.end() > time - TOLERANCE_MS)
        .flat_map(PlayableEvent::edges)
        .filter(move |edge| near(edge.time, time))
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < TOLERANCE_MS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::CueKind;
    use crate::types::VariantName;
    use crate::variant::Variant;

    fn variant(events: Vec<PlayableEvent>) -> Variant {
        Variant::new(VariantName::new("Normal").unwrap(), events).unwrap()
    }

    fn clap() -> CueDescriptor {
        CueDescriptor::with_cues([CueKind::Clap])
    }

    fn finish() -> CueDescriptor {
        CueDescriptor::with_cues([CueKind::Finish])
    }

    #[test]
    fn point_resolves_with_floored_time() {
        let v = variant(vec![PlayableEvent::point(1000.6, clap())]);

        let hit = sample(&v, 1000.4).expect("within tolerance");
        assert_eq!(hit, ResolvedCue { time: 1000.0, cue: clap() });
    }

    #[test]
    fn point_outside_tolerance_is_unresolved() {
        let v = variant(vec![PlayableEvent::point(1000.0, clap())]);

        assert!(sample(&v, 1001.0).is_none());
        assert!(sample(&v, 998.9).is_none());
    }

    #[test]
    fn span_edges_use_their_own_cues() {
        let v = variant(vec![PlayableEvent::span(2000.0, 2500.3, clap(), finish())]);

        assert_eq!(sample(&v, 2000.0).map(|r| r.cue), Some(clap()));
        let end = sample(&v, 2500.0).expect("span end");
        assert_eq!(end, ResolvedCue { time: 2500.0, cue: finish() });
    }

    #[test]
    fn span_body_is_unresolved() {
        let v = variant(vec![PlayableEvent::span(2000.0, 2500.0, clap(), finish())]);
        assert!(sample(&v, 2250.0).is_none());
    }

    #[test]
    fn span_end_shared_with_next_point_is_reachable() {
        let whistle = CueDescriptor::with_cues([CueKind::Whistle]);
        let v = variant(vec![
            PlayableEvent::span(0.0, 400.0, CueDescriptor::default(), whistle),
            PlayableEvent::point(400.0, clap()),
        ]);

        assert_eq!(sample(&v, 400.0).map(|r| r.cue), Some(clap()));
        assert_eq!(sample_edge(&v, 400.0, EdgeKind::Start).map(|r| r.cue), Some(clap()));
        assert_eq!(sample_edge(&v, 400.0, EdgeKind::End).map(|r| r.cue), Some(whistle));
    }

    #[test]
    fn latest_of_two_close_points_wins() {
        let v = variant(vec![
            PlayableEvent::point(1000.0, clap()),
            PlayableEvent::point(1000.6, finish()),
        ]);

        assert_eq!(sample(&v, 1000.0).map(|r| r.cue), Some(finish()));
    }

    #[test]
    fn preferred_edge_falls_back_to_any_edge() {
        let v = variant(vec![PlayableEvent::point(300.0, clap())]);
        assert_eq!(sample_edge(&v, 300.0, EdgeKind::End).map(|r| r.cue), Some(clap()));
    }

    #[test]
    fn empty_variant_is_unresolved() {
        let v = variant(vec![]);
        assert!(sample(&v, 0.0).is_none());
    }
}
