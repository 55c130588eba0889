//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `entigen-adapters` crate provides implementations.

use crate::application::ApplicationError;
use crate::error::EntigenResult;
use std::path::{Path, PathBuf};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `entigen_adapters::filesystem::LocalFilesystem` (production)
/// - `entigen_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists (file or directory).
    fn exists(&self, path: &Path) -> bool;

    /// Read a file's exact bytes.
    fn read_bytes(&self, path: &Path) -> EntigenResult<Vec<u8>>;

    /// Read a UTF-8 file.
    fn read_to_string(&self, path: &Path) -> EntigenResult<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).map_err(|e| ApplicationError::filesystem(path, e).into())
    }

    /// Write a file, creating parent directories as needed.
    fn write_bytes(&self, path: &Path, content: &[u8]) -> EntigenResult<()>;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> EntigenResult<()>;

    /// Remove a directory and all contents. Absent paths are not an error.
    fn remove_dir_all(&self, path: &Path) -> EntigenResult<()>;

    /// Every regular file below `root`, relative to `root`, sorted.
    /// An absent root yields an empty list.
    fn list_files(&self, root: &Path) -> EntigenResult<Vec<PathBuf>>;
}

/// Port for the external entity generator.
///
/// Implemented by `entigen_adapters::process::CommandGenerator`.
#[cfg_attr(test, mockall::automock)]
pub trait FixtureGenerator: Send + Sync {
    /// Render one fixture definition into the output roots.
    fn generate(&self, fixture: &Path) -> EntigenResult<()>;
}

/// Port for the post-generation formatting pass.
///
/// Implemented by `entigen_adapters::process::CommandFormatter`.
#[cfg_attr(test, mockall::automock)]
pub trait OutputFormatter: Send + Sync {
    /// Format every file under `roots` in place.
    fn format(&self, roots: &[PathBuf]) -> EntigenResult<()>;
}
