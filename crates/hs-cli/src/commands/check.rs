//! Check command: runs the registered checks over a mapset.

use std::io::Write;

use anyhow::{Context, Result};
use hs_core::{CheckConfig, CheckOutcome, CheckRegistry, Finding, Severity, VariantSet};
use serde::Serialize;

use crate::render::describe;

#[derive(Debug, Serialize)]
struct Report<'a> {
    variant_count: usize,
    total: usize,
    checks: Vec<Section<'a>>,
}

#[derive(Debug, Serialize)]
struct Section<'a> {
    id: &'static str,
    category: &'static str,
    message: &'static str,
    findings: Vec<Entry<'a>>,
}

#[derive(Debug, Serialize)]
struct Entry<'a> {
    severity: Severity,
    message: String,
    #[serde(flatten)]
    finding: &'a Finding,
}

/// Runs the checks named in `only` (all of them when empty) and writes the
/// findings. Returns the number of findings.
pub fn run<W: Write>(
    writer: &mut W,
    registry: &CheckRegistry,
    variants: &VariantSet,
    config: &CheckConfig,
    only: &[String],
    json: bool,
) -> Result<usize> {
    let outcomes = if only.is_empty() {
        registry.run_all(variants, config)
    } else {
        registry.run_selected(only, variants, config)?
    };
    let total = outcomes.iter().map(|outcome| outcome.findings.len()).sum();

    if json {
        let report = Report {
            variant_count: variants.len(),
            total,
            checks: outcomes.iter().map(|o| section(o, variants.len())).collect(),
        };
        let out = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        writeln!(writer, "{out}")?;
    } else {
        write_text(writer, &outcomes, variants.len())?;
        writeln!(writer)?;
        match total {
            0 => writeln!(writer, "No issues found.")?,
            1 => writeln!(writer, "1 issue found.")?,
            n => writeln!(writer, "{n} issues found.")?,
        }
    }

    Ok(total)
}

fn section(outcome: &CheckOutcome, variant_count: usize) -> Section<'_> {
    Section {
        id: outcome.info.id,
        category: outcome.info.category,
        message: outcome.info.message,
        findings: outcome
            .findings
            .iter()
            .map(|finding| Entry {
                severity: finding.severity(variant_count),
                message: describe(finding),
                finding,
            })
            .collect(),
    }
}

fn write_text<W: Write>(
    writer: &mut W,
    outcomes: &[CheckOutcome],
    variant_count: usize,
) -> Result<()> {
    for outcome in outcomes {
        writeln!(writer, "{} ({})", outcome.info.message, outcome.info.id)?;
        if outcome.findings.is_empty() {
            writeln!(writer, "  No issues.")?;
            continue;
        }
        for finding in &outcome.findings {
            writeln!(
                writer,
                "  [{}] {}: {}",
                finding.severity(variant_count),
                finding.variant(),
                describe(finding)
            )?;
        }
    }
    Ok(())
}
