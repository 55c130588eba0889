// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

use crate::domain::behaviors::BehaviorViolation;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports are re-rendered by the CLI)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid entity name '{name}': {reason}")]
    InvalidEntityName { name: String, reason: String },

    #[error("Unknown output structure '{0}' (expected entity-first, concern-first or monolithic)")]
    InvalidStructureMode(String),

    #[error("Unknown behavior strategy '{0}' (expected base_class or inline)")]
    InvalidStrategy(String),

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes its root: {path}")]
    PathEscapesRoot { path: String },

    /// Every violation found in one entity's behavior list, in scan order.
    #[error("Invalid behavior configuration:\n{}", render_violations(.violations))]
    InvalidBehaviors { violations: Vec<BehaviorViolation> },

    // ========================================================================
    // Registry Errors
    // ========================================================================
    #[error("Behavior '{name}' is already registered")]
    DuplicateBehavior { name: String },
}

fn render_violations(violations: &[BehaviorViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {v}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidEntityName { name, .. } => vec![
                format!("'{}' cannot be used as a generated module name", name),
                "Use letters, digits, '-' or '_' (e.g. opportunity, line-item)".into(),
            ],
            Self::InvalidStructureMode(_) => vec![
                "Valid structures: entity-first, concern-first, monolithic".into(),
            ],
            Self::InvalidStrategy(_) => vec!["Valid strategies: base_class, inline".into()],
            Self::InvalidBehaviors { violations } => {
                let mut out = vec![format!(
                    "Fix the {} behavior violation(s) listed above",
                    violations.len()
                )];
                if violations
                    .iter()
                    .any(|v| matches!(v, BehaviorViolation::Unknown { .. }))
                {
                    out.push("List registered behaviors with: entigen behaviors".into());
                }
                out
            }
            Self::DuplicateBehavior { name } => vec![format!(
                "Rename one of the behaviors called '{}'",
                name
            )],
            Self::AbsolutePathNotAllowed { .. } | Self::PathEscapesRoot { .. } => {
                vec!["Configure paths relative to, and inside, the working directory".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidEntityName { .. }
            | Self::InvalidStructureMode(_)
            | Self::InvalidStrategy(_)
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Validation,
            Self::InvalidBehaviors { violations } => {
                if violations
                    .iter()
                    .all(|v| matches!(v, BehaviorViolation::Conflict { .. }))
                {
                    ErrorCategory::Compatibility
                } else {
                    ErrorCategory::Validation
                }
            }
            Self::DuplicateBehavior { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
