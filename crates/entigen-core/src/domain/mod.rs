// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for entigen.
//!
//! Pure decision logic: which behaviors apply to an entity and what they
//! contribute, which files get generated and where, and how two output
//! snapshots differ. Everything that touches the outside world goes through
//! ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, process, or network calls
//! - **Few crates**: std + serde + thiserror + tracing events
//! - **Immutable values**: registries and plans are built once, then read
//!
pub mod behaviors;
pub mod codegen_config;
pub mod entities;
pub mod error;
pub mod value_objects;

mod validation;

// Re-exports for convenience
pub use behaviors::{
    BehaviorConfig, BehaviorDefinition, BehaviorField, BehaviorOptions, BehaviorRegistry,
    BehaviorViolation, NormalizedBehaviorConfig, OptionValue, RepositoryConfig,
    ResolvedBehaviors, ValidationResult,
};
pub use codegen_config::{
    CODEGEN_CONFIG_FILE, CodegenConfig, ConfigOrigin, DefaultReason, LoadedCodegenConfig,
    resolve_strategy,
};
pub use entities::{
    CompareEntry, CompareOutcome, CompareReport, GenerateOptions, GenerationFlags, PathPlan,
    Snapshot, compare_snapshots, plan_paths,
};
pub use error::{DomainError, ErrorCategory};
pub use value_objects::{ArtifactKind, BehaviorStrategy, EntityName, Importance, OutputStructureMode};

pub use entities::common::RelativePath;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    // ========================================================================
    // Value Object Tests
    // ========================================================================

    #[test]
    fn strategy_parses_exact_values_only() {
        assert_eq!(BehaviorStrategy::from_str("inline").unwrap(), BehaviorStrategy::Inline);
        assert_eq!(
            BehaviorStrategy::from_str("base_class").unwrap(),
            BehaviorStrategy::BaseClass
        );
        assert!(BehaviorStrategy::from_str("INLINE").is_err());
        assert!(BehaviorStrategy::from_str("base-class").is_err());
    }

    #[test]
    fn structure_mode_parses_exactly_like_the_generate_block() {
        assert_eq!(
            OutputStructureMode::from_str("concern-first").unwrap(),
            OutputStructureMode::ConcernFirst
        );
        for loose in ["Concern-First", "entity_first", "MONOLITHIC"] {
            assert!(OutputStructureMode::from_str(loose).is_err(), "accepted {loose:?}");
            let yaml = serde_yaml_ng::from_str::<OutputStructureMode>(loose);
            assert!(yaml.is_err(), "serde accepted {loose:?}");
        }
        let err = OutputStructureMode::from_str("flat").unwrap_err();
        assert_eq!(err, DomainError::InvalidStructureMode("flat".into()));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for mode in OutputStructureMode::ALL {
            assert_eq!(mode.to_string().parse::<OutputStructureMode>().unwrap(), mode);
        }
        for strategy in BehaviorStrategy::ALL {
            assert_eq!(strategy.to_string().parse::<BehaviorStrategy>().unwrap(), strategy);
        }
    }

    #[test]
    fn entity_name_rejects_unsafe_values() {
        for bad in ["", "  ", ".hidden", "..", "a/b", "a\\b", "two words"] {
            assert!(EntityName::try_new(bad).is_err(), "accepted {bad:?}");
        }
        assert_eq!(EntityName::try_new("line-item").unwrap().as_str(), "line-item");
    }

    // ========================================================================
    // End-to-end: resolution + planning for one entity
    // ========================================================================

    #[test]
    fn opportunity_with_timestamps_and_soft_delete() {
        let registry = BehaviorRegistry::builtin();
        let configs: Vec<BehaviorConfig> = vec!["timestamps".into(), "soft_delete".into()];
        DomainValidator::validate_behaviors(&registry, &configs).unwrap();

        let resolved = behaviors::resolve(&registry, &configs, BehaviorStrategy::default());
        assert_eq!(resolved.field_names(), ["created_at", "updated_at", "deleted_at"]);
        assert_eq!(resolved.imports, ["timestamp"]);
        assert_eq!(
            resolved.repository_config,
            RepositoryConfig {
                timestamps: true,
                soft_delete: true,
                user_tracking: false,
                versionable: false,
            }
        );

        let plan = plan_paths(
            &EntityName::try_new("opportunity").unwrap(),
            OutputStructureMode::EntityFirst,
            &GenerationFlags::default(),
        );
        let resolved_paths = plan.resolve("generated");
        for kind in [ArtifactKind::Types, ArtifactKind::Collection, ArtifactKind::Hooks] {
            let expected = std::path::Path::new("generated/opportunity").join(format!("{kind}.ts"));
            assert_eq!(resolved_paths[&kind], expected);
        }
    }
}
