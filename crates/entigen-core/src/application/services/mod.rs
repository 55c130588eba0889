//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "resolve an entity's behaviors" or
//! "prove the generator output has not drifted".

pub mod baseline_service;
pub mod behavior_service;

pub use baseline_service::{BaselineHarness, CaptureSummary, GenerateSummary, HarnessLayout};
pub use behavior_service::{BehaviorInfo, BehaviorService};
