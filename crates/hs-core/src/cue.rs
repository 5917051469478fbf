//! Hitsound cue descriptors.
//!
//! A [`CueDescriptor`] is the audio feedback attached to one edge of a playable
//! event: the auxiliary cues (whistle, clap, finish) plus the sample set and
//! addition set they are played from.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three auxiliary hitsound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CueKind {
    Whistle,
    Clap,
    Finish,
}

impl CueKind {
    /// All cue kinds in canonical order.
    pub const ALL: [Self; 3] = [Self::Whistle, Self::Clap, Self::Finish];

    /// Bit used for this cue in the osu! hitsound field.
    const fn bit(self) -> u8 {
        match self {
            Self::Whistle => 1 << 1,
            Self::Finish => 1 << 2,
            Self::Clap => 1 << 3,
        }
    }
}

impl fmt::Display for CueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Whistle => "Whistle",
            Self::Clap => "Clap",
            Self::Finish => "Finish",
        };
        write!(f, "{s}")
    }
}

/// Set of auxiliary cues, stored with the osu! hitsound bit layout.
///
/// The normal bit and any unknown bits are dropped on construction, so two
/// sets compare equal exactly when they hold the same auxiliary cues.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawCueFlags", into = "Vec<CueKind>")]
pub struct CueFlags(u8);

impl CueFlags {
    pub const EMPTY: Self = Self(0);

    const MASK: u8 = 0b1110;

    /// Builds a set from a raw osu! hitsound value, ignoring the normal bit.
    #[must_use]
    pub const fn from_bits_truncate(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn contains(self, kind: CueKind) -> bool {
        self.0 & kind.bit() != 0
    }

    #[must_use]
    pub const fn with(self, kind: CueKind) -> Self {
        Self(self.0 | kind.bit())
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Cues present in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    #[must_use]
    pub const fn whistle(self) -> bool {
        self.contains(CueKind::Whistle)
    }

    #[must_use]
    pub const fn clap(self) -> bool {
        self.contains(CueKind::Clap)
    }

    #[must_use]
    pub const fn finish(self) -> bool {
        self.contains(CueKind::Finish)
    }

    /// Iterates the contained cues in canonical order.
    pub fn iter(self) -> impl Iterator<Item = CueKind> {
        CueKind::ALL.into_iter().filter(move |kind| self.contains(*kind))
    }
}

impl FromIterator<CueKind> for CueFlags {
    fn from_iter<I: IntoIterator<Item = CueKind>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl From<CueFlags> for Vec<CueKind> {
    fn from(flags: CueFlags) -> Self {
        flags.iter().collect()
    }
}

impl fmt::Display for CueFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|kind| kind.to_string()).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Accepted encodings for cue sets: a list of names or a raw hitsound value.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCueFlags {
    Bits(u8),
    Kinds(Vec<CueKind>),
}

impl From<RawCueFlags> for CueFlags {
    fn from(raw: RawCueFlags) -> Self {
        match raw {
            RawCueFlags::Bits(bits) => Self::from_bits_truncate(bits),
            RawCueFlags::Kinds(kinds) => kinds.into_iter().collect(),
        }
    }
}

/// Sample bank a cue is played from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleSet {
    /// Inherit from the active timing point.
    #[default]
    Auto,
    Normal,
    Soft,
    Drum,
}

/// Audio feedback attached to one edge of a playable event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CueDescriptor {
    pub cues: CueFlags,
    pub sample_set: SampleSet,
    pub addition: SampleSet,
}

impl CueDescriptor {
    /// A descriptor with the given cues and automatic sample sets.
    #[must_use]
    pub fn with_cues(cues: impl IntoIterator<Item = CueKind>) -> Self {
        Self {
            cues: cues.into_iter().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bits_drops_normal_and_unknown_bits() {
        let flags = CueFlags::from_bits_truncate(0b1111_1111);
        assert_eq!(flags.iter().collect::<Vec<_>>(), CueKind::ALL.to_vec());
        assert!(CueFlags::from_bits_truncate(1).is_empty());
    }

    #[test]
    fn osu_bit_layout() {
        let flags = CueFlags::from_bits_truncate(2);
        assert!(flags.whistle());
        let flags = CueFlags::from_bits_truncate(4);
        assert!(flags.finish());
        let flags = CueFlags::from_bits_truncate(8);
        assert!(flags.clap());
    }

    #[test]
    fn difference_is_and_not() {
        let mine: CueFlags = [CueKind::Whistle].into_iter().collect();
        let theirs: CueFlags = [CueKind::Whistle, CueKind::Clap, CueKind::Finish]
            .into_iter()
            .collect();

        let missing = theirs.difference(mine);
        assert_eq!(missing.iter().collect::<Vec<_>>(), vec![CueKind::Clap, CueKind::Finish]);
        assert!(mine.difference(theirs).is_empty());
    }

    #[test]
    fn iter_uses_canonical_order() {
        let flags: CueFlags = [CueKind::Finish, CueKind::Whistle, CueKind::Clap]
            .into_iter()
            .collect();
        assert_eq!(flags.to_string(), "Whistle, Clap, Finish");
    }

    #[test]
    fn flags_deserialize_from_names_or_bits() {
        let from_names: CueFlags = serde_json::from_str(r#"["clap", "finish"]"#).unwrap();
        let from_bits: CueFlags = serde_json::from_str("12").unwrap();
        assert_eq!(from_names, from_bits);
        assert_eq!(serde_json::to_string(&from_bits).unwrap(), r#"["clap","finish"]"#);
    }

    #[test]
    fn descriptor_fields_default() {
        let cue: CueDescriptor = serde_json::from_str(r#"{"cues": ["whistle"]}"#).unwrap();
        assert_eq!(cue, CueDescriptor::with_cues([CueKind::Whistle]));
        assert_eq!(cue.sample_set, SampleSet::Auto);
        assert_eq!(cue.addition, SampleSet::Auto);
    }

    #[test]
    fn descriptor_equality_covers_sample_sets() {
        let soft = CueDescriptor {
            sample_set: SampleSet::Soft,
            ..CueDescriptor::default()
        };
        assert_ne!(soft, CueDescriptor::default());
    }
}
