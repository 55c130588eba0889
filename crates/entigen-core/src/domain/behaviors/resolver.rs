//! Field/import resolution and the resolved-behaviors artifact handed to
//! the template renderer.

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::debug;

use super::catalog::{SOFT_DELETE, TIMESTAMPS, USER_TRACKING};
use super::config::{BehaviorConfig, NormalizedBehaviorConfig, normalize_all};
use super::definition::BehaviorField;
use super::registry::BehaviorRegistry;
use crate::domain::value_objects::BehaviorStrategy;

/// Capability flags for the generated repository class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryConfig {
    pub timestamps: bool,
    pub soft_delete: bool,
    pub user_tracking: bool,
    /// No behavior provides this yet.
    pub versionable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBehaviors {
    pub configs: Vec<NormalizedBehaviorConfig>,
    pub behavior_names: Vec<String>,
    pub fields: Vec<BehaviorField>,
    pub imports: Vec<String>,
    pub methods: Vec<String>,
    pub repository_config: RepositoryConfig,
    pub strategy: BehaviorStrategy,
    pub has_behaviors: bool,
    pub has_timestamps: bool,
    pub has_soft_delete: bool,
    pub has_user_tracking: bool,
}

impl ResolvedBehaviors {
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// Fields contributed by the listed behaviors, first writer wins.
///
/// Unknown names are skipped; validation is expected to have run already.
pub fn resolve_fields(registry: &BehaviorRegistry, configs: &[BehaviorConfig]) -> Vec<BehaviorField> {
    fields_of(registry, &normalize_all(configs))
}

fn fields_of(registry: &BehaviorRegistry, configs: &[NormalizedBehaviorConfig]) -> Vec<BehaviorField> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut fields = Vec::new();

    for def in configs.iter().filter_map(|c| registry.get(&c.name)) {
        for field in &def.fields {
            if seen.insert(field.name.as_str()) {
                fields.push(field.clone());
            } else {
                debug!(
                    field = %field.name,
                    behavior = %def.name,
                    "field already contributed by an earlier behavior; dropping"
                );
            }
        }
    }
    fields
}

/// Sorted, de-duplicated union of the listed behaviors' imports.
pub fn resolve_imports(registry: &BehaviorRegistry, configs: &[BehaviorConfig]) -> Vec<String> {
    imports_of(registry, &normalize_all(configs))
}

fn imports_of(registry: &BehaviorRegistry, configs: &[NormalizedBehaviorConfig]) -> Vec<String> {
    configs
        .iter()
        .filter_map(|c| registry.get(&c.name))
        .flat_map(|def| def.drizzle_imports.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Union of the listed behaviors' methods, first contribution order.
pub fn resolve_methods(registry: &BehaviorRegistry, configs: &[BehaviorConfig]) -> Vec<String> {
    methods_of(registry, &normalize_all(configs))
}

fn methods_of(registry: &BehaviorRegistry, configs: &[NormalizedBehaviorConfig]) -> Vec<String> {
    let mut seen = HashSet::new();
    configs
        .iter()
        .filter_map(|c| registry.get(&c.name))
        .flat_map(|def| def.methods.iter())
        .filter(|m| seen.insert(m.as_str()))
        .cloned()
        .collect()
}

/// Build the resolved artifact for one entity. Pure; does not validate.
pub fn resolve(
    registry: &BehaviorRegistry,
    configs: &[BehaviorConfig],
    strategy: BehaviorStrategy,
) -> ResolvedBehaviors {
    let normalized = normalize_all(configs);
    let enabled: HashSet<&str> = normalized.iter().map(|c| c.name.as_str()).collect();

    let repository_config = RepositoryConfig {
        timestamps: enabled.contains(TIMESTAMPS),
        soft_delete: enabled.contains(SOFT_DELETE),
        user_tracking: enabled.contains(USER_TRACKING),
        versionable: false,
    };

    ResolvedBehaviors {
        behavior_names: normalized.iter().map(|c| c.name.clone()).collect(),
        fields: fields_of(registry, &normalized),
        imports: imports_of(registry, &normalized),
        methods: methods_of(registry, &normalized),
        has_behaviors: !configs.is_empty(),
        has_timestamps: repository_config.timestamps,
        has_soft_delete: repository_config.soft_delete,
        has_user_tracking: repository_config.user_tracking,
        repository_config,
        strategy,
        configs: normalized,
    }
}
