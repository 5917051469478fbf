//! Core domain logic for mapset hitsound checks.
//!
//! This crate contains the fundamental types and logic for:
//! - Sampling: the hitsound a difficulty plays at a given instant
//! - Scoring: detecting difficulties with their own hitsound design
//! - Consistency: finding cues missing from some difficulties of a set
//! - Sections: span-only runs in low-tier difficulties
//! - Registry: the ordered list of checks a host runs

pub mod cue;
mod engine;
pub mod event;
mod finding;
pub mod registry;
pub mod sampler;
pub mod scorer;
mod sections;
pub mod types;
mod variant;

pub use cue::{CueDescriptor, CueFlags, CueKind, SampleSet};
pub use engine::{CheckConfig, check_hitsounds};
pub use event::{Edge, EdgeKind, PlayableEvent};
pub use finding::{Finding, Severity, severity_cutoff};
pub use registry::{Check, CheckError, CheckInfo, CheckOutcome, CheckRegistry};
pub use sampler::{ResolvedCue, TOLERANCE_MS, sample, sample_edge};
pub use scorer::{Classification, Scheme, SchemeScore, classify, inconsistency_score};
pub use sections::{check_span_only_sections, span_only_sections};
pub use types::{Tier, ValidationError, VariantName};
pub use variant::{EventTrack, Variant, VariantSet};
