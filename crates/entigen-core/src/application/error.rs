//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not rule
//! violations. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The external generator failed for one fixture. Aborts the run.
    #[error("Generation failed for fixture {fixture}: {reason}")]
    FixtureFailed { fixture: PathBuf, reason: String },

    /// The post-generation formatter failed. Logged, never propagated by
    /// the harness.
    #[error("Formatter failed: {reason}")]
    FormatterFailed { reason: String },

    /// The fixtures directory does not exist.
    #[error("Fixtures directory not found: {path}")]
    FixturesNotFound { path: PathBuf },

    /// `compare` was asked to diff against a baseline that was never captured.
    #[error("No baseline snapshot at {path}")]
    BaselineMissing { path: PathBuf },

    /// A snapshot or output directory overlaps another harness directory.
    #[error("Invalid harness layout: {reason}")]
    InvalidLayout { reason: String },

    /// Shared adapter state lock poisoned by a panicking thread.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    pub fn filesystem(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::FilesystemError {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
            ],
            Self::FixtureFailed { fixture, .. } => vec![
                format!("Run the generator by hand on {} to see its output", fixture.display()),
                "Check harness.generator in entigen.toml".into(),
            ],
            Self::FormatterFailed { .. } => vec![
                "Check harness.formatter in entigen.toml, or set it to [] to disable".into(),
            ],
            Self::FixturesNotFound { path } => vec![
                format!("Create {} and add fixture definitions", path.display()),
                "Or point harness.fixtures_dir at an existing directory".into(),
            ],
            Self::BaselineMissing { .. } => vec![
                "Capture a known-good snapshot first: entigen baseline".into(),
            ],
            Self::InvalidLayout { .. } => vec![
                "Keep baseline_dir, scratch_dir and output_roots disjoint".into(),
            ],
            Self::LockPoisoned => vec!["A previous operation panicked; retry the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::LockPoisoned => ErrorCategory::Internal,
            Self::FixtureFailed { .. } | Self::FormatterFailed { .. } => ErrorCategory::External,
            Self::FixturesNotFound { .. } | Self::BaselineMissing { .. } => ErrorCategory::NotFound,
            Self::InvalidLayout { .. } => ErrorCategory::Configuration,
        }
    }
}
