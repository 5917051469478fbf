//! Human-readable finding messages.

use std::fmt::Display;

use hs_core::Finding;

/// Formats a song position as `mm:ss:mmm -`, the form mapping editors accept
/// as a clickable timestamp.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "clamped to non-negative and floored before the cast"
)]
pub fn format_timestamp(ms: f64) -> String {
    let total = ms.max(0.0).floor() as u64;
    let minutes = total / 60_000;
    let seconds = (total / 1000) % 60;
    let millis = total % 1000;
    format!("{minutes:02}:{seconds:02}:{millis:03} -")
}

/// The message shown for a finding, without its variant or severity.
pub fn describe(finding: &Finding) -> String {
    match finding {
        Finding::IndependentScheme { .. } => {
            "This difficulty appears to have its own hitsounding, make sure it makes sense.".to_string()
        }
        Finding::MissingCues {
            timestamp,
            missing,
            contributors,
            ..
        } => format!(
            "{} is missing ({}) which exists in {}",
            format_timestamp(*timestamp),
            join(missing),
            join(contributors)
        ),
        Finding::SpanBodyCue { timestamp, .. } => format!(
            "{} This sliderbody has additions, ensure this is intentional.",
            format_timestamp(*timestamp)
        ),
        Finding::SpanOnlySection {
            timestamp,
            span_count,
            duration_ms,
            ..
        } => format!(
            "{} Section is slider only ({span_count} objects, spanning {}s). \
             Ensure this includes plenty of time between objects.",
            format_timestamp(*timestamp),
            whole_seconds(*duration_ms)
        ),
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "durations are non-negative and well below u64::MAX"
)]
fn whole_seconds(ms: f64) -> u64 {
    ms.max(0.0) as u64 / 1000
}

fn join<T: Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use hs_core::{CueKind, VariantName};

    use super::*;

    fn name(s: &str) -> VariantName {
        VariantName::new(s).unwrap()
    }

    #[test]
    fn timestamps_are_zero_padded() {
        assert_eq!(format_timestamp(0.0), "00:00:000 -");
        assert_eq!(format_timestamp(5000.0), "00:05:000 -");
        assert_eq!(format_timestamp(65_123.9), "01:05:123 -");
        assert_eq!(format_timestamp(-20.0), "00:00:000 -");
    }

    #[test]
    fn missing_cues_name_cues_and_contributors() {
        let finding = Finding::MissingCues {
            timestamp: 5000.0,
            variant: name("Normal"),
            missing: vec![CueKind::Whistle, CueKind::Finish],
            contributors: vec![name("Easy"), name("Hard")],
        };
        assert_eq!(
            describe(&finding),
            "00:05:000 - is missing (Whistle, Finish) which exists in Easy, Hard"
        );
    }

    #[test]
    fn span_only_sections_report_whole_seconds() {
        let finding = Finding::SpanOnlySection {
            timestamp: 1000.0,
            variant: name("Easy"),
            span_count: 7,
            duration_ms: 5400.0,
        };
        assert_eq!(
            describe(&finding),
            "00:01:000 - Section is slider only (7 objects, spanning 5s). \
             Ensure this includes plenty of time between objects."
        );
    }
}
