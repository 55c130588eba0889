//! entigen core - behavior resolution, output planning, and the baseline
//! regression harness.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           entigen-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (BehaviorService, BaselineHarness)     │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, FixtureGenerator, Format)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    entigen-adapters (Infrastructure)    │
//! │ (LocalFilesystem, CommandGenerator ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (BehaviorRegistry, PathPlan, Snapshot) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use entigen_core::prelude::*;
//!
//! let service = BehaviorService::builtin();
//! let configs: Vec<BehaviorConfig> = vec!["timestamps".into(), "soft_delete".into()];
//! let resolved = service.resolve(&configs, BehaviorStrategy::default()).unwrap();
//! assert_eq!(resolved.imports, ["timestamp"]);
//!
//! let entity = EntityName::try_new("opportunity").unwrap();
//! let plan = plan_paths(&entity, OutputStructureMode::EntityFirst, &GenerationFlags::default());
//! assert!(plan.contains(ArtifactKind::Index));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        BaselineHarness, BehaviorService, HarnessLayout,
        ports::{Filesystem, FixtureGenerator, OutputFormatter},
    };
    pub use crate::domain::{
        ArtifactKind, BehaviorConfig, BehaviorRegistry, BehaviorStrategy, CodegenConfig,
        CompareReport, EntityName, GenerateOptions, GenerationFlags, LoadedCodegenConfig,
        OutputStructureMode, PathPlan, ResolvedBehaviors, plan_paths,
    };
    pub use crate::error::{EntigenError, EntigenResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
