//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// An event time was NaN or infinite.
    #[error("{variant}: event {index} has a non-finite time")]
    NonFiniteTime { variant: String, index: usize },

    /// A span ends before it starts.
    #[error("{variant}: span {index} ends at {end}ms before its start at {start}ms")]
    InvertedSpan {
        variant: String,
        index: usize,
        start: f64,
        end: f64,
    },

    /// Events are not ordered by start time.
    #[error("{variant}: event {index} at {start}ms starts before the previous event at {previous}ms")]
    Unsorted {
        variant: String,
        index: usize,
        start: f64,
        previous: f64,
    },

    /// An event starts before the previous one has ended.
    #[error("{variant}: event {index} at {start}ms overlaps the previous event ending at {previous_end}ms")]
    Overlapping {
        variant: String,
        index: usize,
        start: f64,
        previous_end: f64,
    },

    /// Two variants in one set share a display name.
    #[error("duplicate variant name: {name}")]
    DuplicateVariant { name: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// The display name of a difficulty variant.
    ///
    /// Names must be non-blank. They are unique within a [`VariantSet`](crate::VariantSet).
    VariantName, "variant name"
);

/// Coarse difficulty tier of a variant.
///
/// Some checks only make sense for low tiers, so variants may carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Easy,
    Normal,
    Hard,
    Insane,
    Expert,
}

impl Tier {
    /// String representation used in mapset files.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Insane => "insane",
            Self::Expert => "expert",
        }
    }

    /// Whether the tier is aimed at new players.
    #[must_use]
    pub const fn is_low(self) -> bool {
        matches!(self, Self::Easy | Self::Normal)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_name_rejects_blank() {
        assert!(VariantName::new("").is_err());
        assert!(VariantName::new("   ").is_err());
        assert!(VariantName::new("Insane").is_ok());
    }

    #[test]
    fn variant_name_serde_rejects_empty() {
        let result: Result<VariantName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());

        let parsed: VariantName = serde_json::from_str("\"Hard\"").unwrap();
        assert_eq!(parsed.as_str(), "Hard");
    }

    #[test]
    fn only_easy_and_normal_are_low() {
        assert!(Tier::Easy.is_low());
        assert!(Tier::Normal.is_low());
        assert!(!Tier::Hard.is_low());
        assert!(!Tier::Expert.is_low());
    }

    #[test]
    fn tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Insane).unwrap(), "\"insane\"");
    }
}
