pub mod common;
pub mod path_plan;
pub mod snapshot;

pub use crate::domain::DomainError;
pub use path_plan::{GenerateOptions, GenerationFlags, PathPlan, plan_paths};
pub use snapshot::{CompareEntry, CompareOutcome, CompareReport, Snapshot, compare_snapshots};
