//! Playable events carrying hitsound cues.

use serde::{Deserialize, Serialize};

use crate::cue::CueDescriptor;

/// Which side of an event an edge is on. Point events only have a start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Start,
    End,
}

/// One audible instant of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    pub time: f64,
    pub cue: CueDescriptor,
}

/// A timed interaction point in a difficulty.
///
/// Times are in milliseconds and need not be integral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayableEvent {
    /// An instant cue, such as a hit circle.
    Point {
        time: f64,
        #[serde(default)]
        cue: CueDescriptor,
    },
    /// A duration-bearing event, such as a slider, with independent edge cues.
    Span {
        start: f64,
        end: f64,
        #[serde(default)]
        start_cue: CueDescriptor,
        #[serde(default)]
        end_cue: CueDescriptor,
    },
}

impl PlayableEvent {
    pub const fn point(time: f64, cue: CueDescriptor) -> Self {
        Self::Point { time, cue }
    }

    pub const fn span(
        start: f64,
        end: f64,
        start_cue: CueDescriptor,
        end_cue: CueDescriptor,
    ) -> Self {
        Self::Span {
            start,
            end,
            start_cue,
            end_cue,
        }
    }

    pub const fn start(&self) -> f64 {
        match *self {
            Self::Point { time, .. } => time,
            Self::Span { start, .. } => start,
        }
    }

    /// End time; equal to the start time for point events.
    pub const fn end(&self) -> f64 {
        match *self {
            Self::Point { time, .. } => time,
            Self::Span { end, .. } => end,
        }
    }

    pub const fn is_span(&self) -> bool {
        matches!(self, Self::Span { .. })
    }

    /// The cue played when the event begins.
    pub const fn start_cue(&self) -> &CueDescriptor {
        match self {
            Self::Point { cue, .. } => cue,
            Self::Span { start_cue, .. } => start_cue,
        }
    }

    /// The cue played when a span ends, `None` for point events.
    pub const fn end_cue(&self) -> Option<&CueDescriptor> {
        match self {
            Self::Point { .. } => None,
            Self::Span { end_cue, .. } => Some(end_cue),
        }
    }

    pub const fn start_edge(&self) -> Edge {
        Edge {
            kind: EdgeKind::Start,
            time: self.start(),
            cue: *self.start_cue(),
        }
    }

    pub fn end_edge(&self) -> Option<Edge> {
        self.end_cue().map(|cue| Edge {
            kind: EdgeKind::End,
            time: self.end(),
            cue: *cue,
        })
    }

    /// Audible edges in time order: the start, then a span's end.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + use<> {
        std::iter::once(self.start_edge()).chain(self.end_edge())
    }
}
