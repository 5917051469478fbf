//! Difficulty variants and the event lookup they expose.

use std::collections::HashSet;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::event::PlayableEvent;
use crate::sampler::TOLERANCE_MS;
use crate::types::{Tier, ValidationError, VariantName};

/// A difficulty whose events can be queried by time.
///
/// This trait allows the checks to work with different event representations
/// (e.g., [`Variant`] or a host's own parsed beatmap).
///
/// Implementors must keep events sorted by start time and non-overlapping.
pub trait EventTrack {
    /// Returns the display name of the difficulty.
    fn name(&self) -> &VariantName;

    /// Returns the events in start-time order.
    fn events(&self) -> &[PlayableEvent];

    /// Returns the difficulty tier, if known.
    fn tier(&self) -> Option<Tier> {
        None
    }

    /// Returns the events starting at or before `time`, widened by the
    /// sampling tolerance so that an event a fraction of a millisecond later
    /// is still included.
    fn events_until(&self, time: f64) -> &[PlayableEvent] {
        let events = self.events();
        let idx = events.partition_point(|event| event.start() < time + TOLERANCE_MS);
        &events[..idx]
    }

    /// Returns the event active at `time`: the last of [`events_until`].
    ///
    /// [`events_until`]: EventTrack::events_until
    fn event_at(&self, time: f64) -> Option<&PlayableEvent> {
        self.events_until(time).last()
    }
}

/// One difficulty's worth of playable events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVariant")]
pub struct Variant {
    name: VariantName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tier: Option<Tier>,
    events: Vec<PlayableEvent>,
}

#[derive(Deserialize)]
struct RawVariant {
    name: VariantName,
    #[serde(default)]
    tier: Option<Tier>,
    #[serde(default)]
    events: Vec<PlayableEvent>,
}

impl TryFrom<RawVariant> for Variant {
    type Error = ValidationError;

    fn try_from(raw: RawVariant) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.name, raw.events)?.with_tier(raw.tier))
    }
}

impl Variant {
    /// Creates a variant after checking the event ordering invariants.
    pub fn new(name: VariantName, events: Vec<PlayableEvent>) -> Result<Self, ValidationError> {
        validate_events(&name, &events)?;
        Ok(Self {
            name,
            tier: None,
            events,
        })
    }

    #[must_use]
    pub const fn with_tier(mut self, tier: Option<Tier>) -> Self {
        self.tier = tier;
        self
    }
}

impl EventTrack for Variant {
    fn name(&self) -> &VariantName {
        &self.name
    }

    fn events(&self) -> &[PlayableEvent] {
        &self.events
    }

    fn tier(&self) -> Option<Tier> {
        self.tier
    }
}

fn validate_events(name: &VariantName, events: &[PlayableEvent]) -> Result<(), ValidationError> {
    let variant = || name.to_string();
    let mut previous: Option<&PlayableEvent> = None;

    for (index, event) in events.iter().enumerate() {
        let (start, end) = (event.start(), event.end());
        if !start.is_finite() || !end.is_finite() {
            return Err(ValidationError::NonFiniteTime {
                variant: variant(),
                index,
            });
        }
        if end < start {
            return Err(ValidationError::InvertedSpan {
                variant: variant(),
                index,
                start,
                end,
            });
        }
        if let Some(prev) = previous {
            if start < prev.start() {
                return Err(ValidationError::Unsorted {
                    variant: variant(),
                    index,
                    start,
                    previous: prev.start(),
                });
            }
            if start < prev.end() {
                return Err(ValidationError::Overlapping {
                    variant: variant(),
                    index,
                    start,
                    previous_end: prev.end(),
                });
            }
        }
        previous = Some(event);
    }

    Ok(())
}

/// The difficulties of one mapset, with unique names, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Variant>", into = "Vec<Variant>")]
pub struct VariantSet(Vec<Variant>);

impl VariantSet {
    pub fn new(variants: Vec<Variant>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::new();
        for variant in &variants {
            if !seen.insert(variant.name()) {
                return Err(ValidationError::DuplicateVariant {
                    name: variant.name().to_string(),
                });
            }
        }
        Ok(Self(variants))
    }
}

impl Deref for VariantSet {
    type Target = [Variant];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<Variant>> for VariantSet {
    type Error = ValidationError;

    fn try_from(variants: Vec<Variant>) -> Result<Self, Self::Error> {
        Self::new(variants)
    }
}

impl From<VariantSet> for Vec<Variant> {
    fn from(set: VariantSet) -> Self {
        set.0
    }
}
