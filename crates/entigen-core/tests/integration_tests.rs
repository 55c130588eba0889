//! Integration tests for entigen-core: entity definition in, resolved
//! behaviors and path plan out.

use entigen_core::domain::{BehaviorViolation, DomainError};
use entigen_core::prelude::*;
use serde::Deserialize;

/// The slice of an entity definition this crate consumes.
#[derive(Debug, Deserialize)]
struct EntityDefinition {
    name: String,
    #[serde(default)]
    behaviors: Vec<BehaviorConfig>,
    #[serde(default, rename = "behaviorStrategy")]
    behavior_strategy: Option<String>,
    #[serde(default)]
    generate: GenerateOptions,
}

fn parse(yaml: &str) -> EntityDefinition {
    serde_yaml_ng::from_str(yaml).unwrap()
}

#[test]
fn opportunity_entity_first_end_to_end() {
    let def = parse(
        r#"
name: opportunity
behaviors:
  - timestamps
  - name: soft_delete
    options:
      cascade: true
generate:
  structure: entity-first
"#,
    );

    let service = BehaviorService::builtin();
    let resolved = service
        .resolve_for_entity(&def.behaviors, def.behavior_strategy.as_deref(), None)
        .unwrap();

    assert_eq!(resolved.field_names(), ["created_at", "updated_at", "deleted_at"]);
    assert_eq!(resolved.imports, ["timestamp"]);
    assert!(resolved.repository_config.timestamps);
    assert!(resolved.repository_config.soft_delete);
    assert!(!resolved.repository_config.user_tracking);
    assert!(!resolved.repository_config.versionable);
    assert_eq!(resolved.strategy, BehaviorStrategy::BaseClass);

    let entity = EntityName::try_new(def.name).unwrap();
    let plan = plan_paths(&entity, def.generate.structure, &def.generate.flags);
    let paths = plan.resolve("generated");
    for kind in [ArtifactKind::Types, ArtifactKind::Collection, ArtifactKind::Hooks] {
        assert!(paths[&kind].starts_with("generated/opportunity"));
    }
}

#[test]
fn monolithic_entity_with_inline_override() {
    let def = parse(
        r#"
name: contact
behaviorStrategy: inline
behaviors: [user_tracking]
generate:
  structure: monolithic
  hooks: false
  mutations: false
"#,
    );

    let global = CodegenConfig::default();
    let resolved = BehaviorService::builtin()
        .resolve_for_entity(&def.behaviors, def.behavior_strategy.as_deref(), Some(&global))
        .unwrap();
    assert_eq!(resolved.strategy, BehaviorStrategy::Inline);
    assert_eq!(resolved.methods, ["setActor"]);

    let plan = plan_paths(
        &EntityName::try_new(def.name).unwrap(),
        def.generate.structure,
        &def.generate.flags,
    );
    assert_eq!(plan.kinds(), [ArtifactKind::Combined]);
    assert_eq!(plan.get(ArtifactKind::Combined).unwrap().to_string(), "contact.ts");
}

#[test]
fn invalid_entity_reports_every_violation() {
    let def = parse(
        r#"
name: broken
behaviors: [timestamps, versioning, auditing]
"#,
    );

    let err = BehaviorService::builtin()
        .resolve_for_entity(&def.behaviors, None, None)
        .unwrap_err();

    let EntigenError::Domain(DomainError::InvalidBehaviors { violations }) = err else {
        panic!("expected InvalidBehaviors");
    };
    assert_eq!(
        violations,
        vec![
            BehaviorViolation::Unknown {
                name: "versioning".into()
            },
            BehaviorViolation::Unknown {
                name: "auditing".into()
            },
        ]
    );
}
