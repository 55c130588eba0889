//! Behavior resolution engine.
//!
//! ```text
//! [BehaviorConfig] ─normalize─▶ [NormalizedBehaviorConfig]
//!        │                               │
//!        └──validate (registry)──▶ ValidationResult
//!                                        │ valid
//!                                        ▼
//!                          resolve ─▶ ResolvedBehaviors
//! ```

pub mod catalog;
mod config;
mod definition;
mod registry;
mod resolver;
mod validation;

pub use config::{
    BehaviorConfig, BehaviorOptions, NormalizedBehaviorConfig, OptionValue, SoftDeleteOptions,
    TypedOptions, UserTrackingOptions, normalize, normalize_all,
};
pub use definition::{BehaviorDefinition, BehaviorField, SemanticType, UiHints};
pub use registry::BehaviorRegistry;
pub use resolver::{
    RepositoryConfig, ResolvedBehaviors, resolve, resolve_fields, resolve_imports,
    resolve_methods,
};
pub use validation::{BehaviorViolation, ValidationResult, validate};
