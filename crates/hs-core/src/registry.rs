//! Explicit registry of mapset checks.

use thiserror::Error;

use crate::engine::{CheckConfig, check_hitsounds};
use crate::finding::Finding;
use crate::sections::check_span_only_sections;
use crate::variant::{Variant, VariantSet};

/// Registry errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("unknown check: {id}")]
    UnknownCheck { id: String },
}

/// Static description of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    /// Stable identifier used for selection, e.g. `inconsistent-hitsounds`.
    pub id: &'static str,
    pub category: &'static str,
    /// One-line summary shown as the section heading.
    pub message: &'static str,
    pub purpose: &'static str,
}

/// A check over a whole mapset.
pub trait Check: Send + Sync {
    fn info(&self) -> CheckInfo;

    fn run(&self, variants: &VariantSet, config: &CheckConfig) -> Vec<Finding>;
}

/// Findings produced by one check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub info: CheckInfo,
    pub findings: Vec<Finding>,
}

struct InconsistentHitsounds;

impl Check for InconsistentHitsounds {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "inconsistent-hitsounds",
            category: "Compose",
            message: "Inconsistent hitsounds.",
            purpose: "Points out hitsounds missing from some difficulties, \
                      difficulties with their own hitsounding, and sliderbody additions.",
        }
    }

    fn run(&self, variants: &VariantSet, config: &CheckConfig) -> Vec<Finding> {
        check_hitsounds::<Variant>(variants, config)
    }
}

struct SpanOnlySections;

impl Check for SpanOnlySections {
    fn info(&self) -> CheckInfo {
        CheckInfo {
            id: "span-only-sections",
            category: "Compose",
            message: "Slider only section.",
            purpose: "Avoids slider only sections in Easy and Normal difficulties.",
        }
    }

    fn run(&self, variants: &VariantSet, config: &CheckConfig) -> Vec<Finding> {
        check_span_only_sections::<Variant>(variants, config)
    }
}

/// Ordered list of checks, built once at startup.
pub struct CheckRegistry {
    checks: Vec<Box<dyn Check>>,
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self {
            checks: vec![Box::new(InconsistentHitsounds), Box::new(SpanOnlySections)],
        }
    }
}

impl CheckRegistry {
    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.checks.iter().map(|check| &**check)
    }

    pub fn get(&self, id: &str) -> Option<&dyn Check> {
        self.iter().find(|check| check.info().id == id)
    }

    /// Runs every registered check in registration order.
    pub fn run_all(&self, variants: &VariantSet, config: &CheckConfig) -> Vec<CheckOutcome> {
        self.iter().map(|check| run_check(check, variants, config)).collect()
    }

    /// Runs the named checks, still in registration order.
    pub fn run_selected<S: AsRef<str>>(
        &self,
        ids: &[S],
        variants: &VariantSet,
        config: &CheckConfig,
    ) -> Result<Vec<CheckOutcome>, CheckError> {
        if let Some(unknown) = ids.iter().find(|id| self.get(id.as_ref()).is_none()) {
            return Err(CheckError::UnknownCheck {
                id: unknown.as_ref().to_string(),
            });
        }

        Ok(self
            .iter()
            .filter(|check| ids.iter().any(|id| id.as_ref() == check.info().id))
            .map(|check| run_check(check, variants, config))
            .collect())
    }
}

fn run_check(check: &dyn Check, variants: &VariantSet, config: &CheckConfig) -> CheckOutcome {
    let info = check.info();
    let findings = check.run(variants, config);
    tracing::debug!(check = info.id, findings = findings.len(), "check finished");
    CheckOutcome { info, findings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::{CueDescriptor, CueKind};
    use crate::event::PlayableEvent;
    use crate::types::{Tier, VariantName};

    fn set() -> VariantSet {
        let variant = |name: &str, cue: CueDescriptor| {
            Variant::new(VariantName::new(name).unwrap(), vec![PlayableEvent::point(0.0, cue)])
                .unwrap()
                .with_tier(Some(Tier::Normal))
        };
        VariantSet::new(vec![
            variant("Normal", CueDescriptor::default()),
            variant("Hard", CueDescriptor::with_cues([CueKind::Clap])),
        ])
        .unwrap()
    }

    #[test]
    fn default_registry_order() {
        let registry = CheckRegistry::default();
        let ids: Vec<&str> = registry.iter().map(|check| check.info().id).collect();
        assert_eq!(ids, vec!["inconsistent-hitsounds", "span-only-sections"]);
    }

    #[test]
    fn run_all_reports_every_check() {
        let outcomes = CheckRegistry::default().run_all(&set(), &CheckConfig::default());

        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].findings.len(), 1);
        assert!(outcomes[1].findings.is_empty());
    }

    #[test]
    fn run_selected_keeps_registration_order() {
        let registry = CheckRegistry::default();
        let outcomes = registry
            .run_selected(
                &["span-only-sections", "inconsistent-hitsounds"],
                &set(),
                &CheckConfig::default(),
            )
            .unwrap();

        let ids: Vec<&str> = outcomes.iter().map(|o| o.info.id).collect();
        assert_eq!(ids, vec!["inconsistent-hitsounds", "span-only-sections"]);
    }

    #[test]
    fn run_selected_rejects_unknown_ids() {
        let err = CheckRegistry::default()
            .run_selected(&["metadata-tags"], &set(), &CheckConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown check: metadata-tags");
    }

    #[test]
    fn get_finds_checks_by_id() {
        let registry = CheckRegistry::default();
        assert!(registry.get("span-only-sections").is_some());
        assert!(registry.get("silent").is_none());
    }
}
