//! Schemes command: shows how each difficulty's hitsounding was classified.

use std::io::Write;

use anyhow::{Context, Result};
use hs_core::{CheckConfig, Classification, EventTrack, Scheme, VariantSet, classify};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct SchemeRow<'a> {
    name: &'a str,
    raw: usize,
    adjusted: usize,
    scheme: Scheme,
}

#[derive(Debug, Serialize)]
struct SchemeReport<'a> {
    min_score: usize,
    average_score: f64,
    comparisons: usize,
    variants: Vec<SchemeRow<'a>>,
}

pub fn run<W: Write>(
    writer: &mut W,
    variants: &VariantSet,
    config: &CheckConfig,
    json: bool,
) -> Result<()> {
    let classification = classify(variants, config.max_comparisons);
    let rows = rows(variants, &classification);

    if json {
        let report = SchemeReport {
            min_score: classification.min_score,
            average_score: classification.average_score,
            comparisons: classification.comparisons,
            variants: rows,
        };
        let out = serde_json::to_string_pretty(&report).context("failed to serialize schemes")?;
        writeln!(writer, "{out}")?;
        return Ok(());
    }

    if rows.is_empty() {
        writeln!(writer, "No difficulties.")?;
        return Ok(());
    }

    let width = rows.iter().map(|row| row.name.len()).max().unwrap_or(0).max("variant".len());
    writeln!(writer, "{:<width$}  {:>3}  {:>8}  scheme", "variant", "raw", "adjusted")?;
    for row in &rows {
        writeln!(
            writer,
            "{:<width$}  {:>3}  {:>8}  {}",
            row.name, row.raw, row.adjusted, row.scheme
        )?;
    }
    writeln!(writer)?;
    writeln!(
        writer,
        "min {}, average {:.2}",
        classification.min_score, classification.average_score
    )?;

    Ok(())
}

fn rows<'a>(variants: &'a VariantSet, classification: &Classification) -> Vec<SchemeRow<'a>> {
    variants
        .iter()
        .zip(&classification.scores)
        .map(|(variant, score)| SchemeRow {
            name: variant.name().as_str(),
            raw: score.raw,
            adjusted: score.adjusted,
            scheme: score.scheme,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;
    use crate::input::parse_mapset;

    /// Four difficulties with eight hits each; only Insane claps.
    fn mapset() -> VariantSet {
        let events = |cue: &str| {
            (0..8)
                .map(|i| format!(r#"{{"type": "point", "time": {}, "cue": {cue}}}"#, i * 500))
                .collect::<Vec<_>>()
                .join(",")
        };
        let variant = |name: &str, cue: &str| {
            format!(r#"{{"name": "{name}", "events": [{}]}}"#, events(cue))
        };
        let json = format!(
            r#"{{"variants": [{}, {}, {}, {}]}}"#,
            variant("Easy", "{}"),
            variant("Normal", "{}"),
            variant("Hard", "{}"),
            variant("Insane", r#"{"cues": ["clap"]}"#),
        );
        parse_mapset(&json).unwrap()
    }

    #[test]
    fn text_output_shows_scores() {
        let mut output = Vec::new();
        run(&mut output, &mapset(), &CheckConfig::default(), false).unwrap();

        assert_snapshot!(String::from_utf8(output).unwrap(), @r"
        variant  raw  adjusted  scheme
        Easy       2         0  shared
        Normal     2         0  shared
        Hard       2         0  shared
        Insane     6         4  independent

        min 2, average 3.00
        ");
    }

    #[test]
    fn json_output_lists_every_difficulty() {
        let mut output = Vec::new();
        run(&mut output, &mapset(), &CheckConfig::default(), true).unwrap();
        let report: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(report["min_score"], 2);
        assert_eq!(report["comparisons"], 96);
        assert_eq!(report["variants"][3]["name"], "Insane");
        assert_eq!(report["variants"][3]["scheme"], "independent");
        assert_eq!(report["variants"][0]["scheme"], "shared");
    }

    #[test]
    fn empty_set_has_no_rows() {
        let mut output = Vec::new();
        run(&mut output, &VariantSet::default(), &CheckConfig::default(), false).unwrap();
        assert_snapshot!(String::from_utf8(output).unwrap(), @"No difficulties.");
    }
}
