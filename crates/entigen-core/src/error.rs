//! Unified error handling for entigen core.
//!
//! Wraps domain and application errors behind one type with
//! user-actionable suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for entigen core operations.
#[derive(Debug, Error, Clone)]
pub enum EntigenError {
    /// Errors from the domain layer (invalid input, rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O and orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl EntigenError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { .. } => vec![
                "Check entigen.toml and ENTIGEN__* environment variables".into(),
                "Show the effective configuration with: entigen config".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in entigen".into(),
                "Re-run with -vv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Configuration,
    /// An external tool (generator, formatter) failed.
    External,
    Internal,
}

/// Convenient result type alias.
pub type EntigenResult<T> = Result<T, EntigenError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> EntigenResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> EntigenResult<T> {
        self.map_err(|e| EntigenError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BehaviorViolation;
    use std::path::PathBuf;

    #[test]
    fn conflict_only_violations_are_compatibility_errors() {
        let err: EntigenError = DomainError::InvalidBehaviors {
            violations: vec![BehaviorViolation::Conflict {
                behavior: "a".into(),
                conflicts_with: "b".into(),
            }],
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn invalid_behaviors_display_lists_every_violation() {
        let err: EntigenError = DomainError::InvalidBehaviors {
            violations: vec![
                BehaviorViolation::Unknown { name: "nope".into() },
                BehaviorViolation::MissingRequirement {
                    behavior: "x".into(),
                    required: "y".into(),
                },
            ],
        }
        .into();
        let text = err.to_string();
        assert!(text.contains("Unknown behavior: 'nope'"));
        assert!(text.contains("Behavior 'x' requires 'y' to be enabled"));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("entigen behaviors")));
    }

    #[test]
    fn fixture_failure_is_external() {
        let err: EntigenError = ApplicationError::FixtureFailed {
            fixture: PathBuf::from("fixtures/a.yaml"),
            reason: "exit status 1".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::External);
        assert!(err.to_string().contains("fixtures/a.yaml"));
    }

    #[test]
    fn context_wraps_as_internal() {
        let res: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        let err = res.context("reading snapshot").unwrap_err();
        assert!(matches!(err, EntigenError::Internal { .. }));
        assert!(err.to_string().contains("reading snapshot: boom"));
    }
}
