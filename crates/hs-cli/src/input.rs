//! Mapset loading.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use hs_core::VariantSet;
use serde::Deserialize;

/// On-disk shape of a parsed mapset.
#[derive(Debug, Deserialize)]
struct MapsetFile {
    variants: VariantSet,
}

/// Reads a mapset from `path`, or from stdin when `path` is `-`.
pub fn load_mapset(path: &Path) -> Result<VariantSet> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read mapset from stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    let variants =
        parse_mapset(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(variants = variants.len(), "loaded mapset");
    Ok(variants)
}

/// Parses the JSON mapset format.
pub fn parse_mapset(json: &str) -> Result<VariantSet> {
    let file: MapsetFile = serde_json::from_str(json)?;
    Ok(file.variants)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use hs_core::{CueKind, EventTrack, PlayableEvent, SampleSet, Tier};
    use tempfile::TempDir;

    use super::*;

    const MAPSET: &str = r#"{"variants": [
        {"name": "Normal", "tier": "normal", "events": [
            {"type": "point", "time": 1000.0, "cue": {"cues": ["clap"], "sample_set": "soft"}},
            {"type": "span", "start": 1500.0, "end": 2000.0, "start_cue": {}, "end_cue": {"cues": 4}}
        ]},
        {"name": "Hard", "events": []}
    ]}"#;

    #[test]
    fn parses_events_and_defaults() {
        let set = parse_mapset(MAPSET).unwrap();
        assert_eq!(set.len(), 2);

        let normal = &set[0];
        assert_eq!(normal.name().as_str(), "Normal");
        assert_eq!(normal.tier(), Some(Tier::Normal));
        let PlayableEvent::Point { cue, .. } = normal.events()[0] else {
            panic!("expected a point");
        };
        assert!(cue.cues.contains(CueKind::Clap));
        assert_eq!(cue.sample_set, SampleSet::Soft);
        assert_eq!(cue.addition, SampleSet::Auto);

        let span = normal.events()[1];
        assert!(span.end_cue().unwrap().cues.contains(CueKind::Finish));

        assert_eq!(set[1].tier(), None);
    }

    #[test]
    fn rejects_duplicate_names() {
        let json = r#"{"variants": [{"name": "Easy", "events": []}, {"name": "Easy", "events": []}]}"#;
        let err = parse_mapset(json).unwrap_err();
        assert!(err.to_string().contains("duplicate variant name: Easy"), "{err}");
    }

    #[test]
    fn rejects_unsorted_events() {
        let json = r#"{"variants": [{"name": "Easy", "events": [
            {"type": "point", "time": 2000.0},
            {"type": "point", "time": 1000.0}
        ]}]}"#;
        assert!(parse_mapset(json).is_err());
    }

    #[test]
    fn load_reports_the_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        fs::write(&path, "{").unwrap();

        let err = load_mapset(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
