//! Infrastructure adapters for entigen.
//!
//! This crate implements the ports defined in `entigen-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod codegen_config;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use codegen_config::{CodegenConfigLoader, default_config_yaml, validate_schema};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{CommandFormatter, CommandGenerator, CommandSpec};
