//! Behavior-set validation: unknown names, unmet requirements, conflicts.
//!
//! Every violation is collected; the scan never stops at the first one.

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use super::config::{BehaviorConfig, normalize_all};
use super::registry::BehaviorRegistry;
use crate::domain::error::DomainError;

/// One problem found in an entity's behavior list.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BehaviorViolation {
    #[error("Unknown behavior: '{name}'")]
    Unknown { name: String },

    #[error("Behavior '{behavior}' requires '{required}' to be enabled")]
    MissingRequirement { behavior: String, required: String },

    #[error("Behavior '{behavior}' conflicts with '{conflicts_with}'")]
    Conflict {
        behavior: String,
        conflicts_with: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<BehaviorViolation>,
    /// Reserved; always empty.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<BehaviorViolation>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings: Vec::new(),
        }
    }

    /// Human-readable messages, one per violation.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.valid {
            Ok(())
        } else {
            Err(DomainError::InvalidBehaviors {
                violations: self.errors,
            })
        }
    }
}

/// Check `configs` against `registry`.
///
/// Requirements are checked one hop deep. Conflicts are checked from the
/// side that declares them; since every enabled entry is visited, one
/// declaration per pair is enough.
pub fn validate(registry: &BehaviorRegistry, configs: &[BehaviorConfig]) -> ValidationResult {
    let normalized = normalize_all(configs);
    let enabled: HashSet<&str> = normalized.iter().map(|c| c.name.as_str()).collect();

    let mut errors = Vec::new();
    for config in &normalized {
        let Some(def) = registry.get(&config.name) else {
            errors.push(BehaviorViolation::Unknown {
                name: config.name.clone(),
            });
            continue;
        };

        for required in def.requires.iter().filter(|r| !enabled.contains(r.as_str())) {
            errors.push(BehaviorViolation::MissingRequirement {
                behavior: def.name.clone(),
                required: required.clone(),
            });
        }

        for other in def.conflicts.iter().filter(|c| enabled.contains(c.as_str())) {
            errors.push(BehaviorViolation::Conflict {
                behavior: def.name.clone(),
                conflicts_with: other.clone(),
            });
        }
    }

    ValidationResult::from_errors(errors)
}
