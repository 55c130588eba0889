//! Behavior Service - validation-gated resolution for one entity.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    domain::{
        BehaviorConfig, BehaviorRegistry, BehaviorStrategy, CodegenConfig, DomainValidator,
        ResolvedBehaviors, ValidationResult, behaviors, resolve_strategy,
    },
    error::EntigenResult,
};

/// Information about a registered behavior for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorInfo {
    pub name: String,
    pub description: String,
    pub config_key: String,
    pub fields: Vec<String>,
    pub imports: Vec<String>,
    pub requires: Vec<String>,
    pub conflicts: Vec<String>,
    pub methods: Vec<String>,
}

pub struct BehaviorService {
    registry: BehaviorRegistry,
}

impl BehaviorService {
    pub fn new(registry: BehaviorRegistry) -> Self {
        Self { registry }
    }

    /// Service over the built-in catalog.
    pub fn builtin() -> Self {
        Self::new(BehaviorRegistry::builtin())
    }

    pub fn registry(&self) -> &BehaviorRegistry {
        &self.registry
    }

    /// Every registered behavior, in registration order.
    pub fn list(&self) -> Vec<BehaviorInfo> {
        self.registry
            .iter()
            .map(|def| BehaviorInfo {
                name: def.name.clone(),
                description: def.description.clone(),
                config_key: def.config_key.clone(),
                fields: def.field_names().map(str::to_string).collect(),
                imports: def.drizzle_imports.clone(),
                requires: def.requires.clone(),
                conflicts: def.conflicts.clone(),
                methods: def.methods.clone(),
            })
            .collect()
    }

    pub fn validate(&self, configs: &[BehaviorConfig]) -> ValidationResult {
        behaviors::validate(&self.registry, configs)
    }

    /// Validate, then resolve. An invalid list never reaches resolution.
    #[instrument(skip_all, fields(behaviors = configs.len(), strategy = %strategy))]
    pub fn resolve(
        &self,
        configs: &[BehaviorConfig],
        strategy: BehaviorStrategy,
    ) -> EntigenResult<ResolvedBehaviors> {
        DomainValidator::validate_behaviors(&self.registry, configs)?;
        let resolved = behaviors::resolve(&self.registry, configs, strategy);
        debug!(
            fields = resolved.fields.len(),
            imports = resolved.imports.len(),
            "behaviors resolved"
        );
        Ok(resolved)
    }

    /// [`resolve`](Self::resolve) with the strategy picked from the entity's
    /// own override and the loaded codegen config.
    pub fn resolve_for_entity(
        &self,
        configs: &[BehaviorConfig],
        entity_strategy: Option<&str>,
        codegen: Option<&CodegenConfig>,
    ) -> EntigenResult<ResolvedBehaviors> {
        self.resolve(configs, resolve_strategy(entity_strategy, codegen))
    }
}
