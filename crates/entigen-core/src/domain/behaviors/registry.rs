//! Name → definition lookup.
//!
//! The registry is an explicit value built once at start-up and passed to
//! whoever needs it. There is no global instance; tests build their own with
//! [`BehaviorRegistry::new`] and [`BehaviorRegistry::register`].

use std::collections::HashMap;

use tracing::{trace, warn};

use super::catalog;
use super::definition::BehaviorDefinition;
use crate::domain::error::DomainError;

#[derive(Debug, Clone, Default)]
pub struct BehaviorRegistry {
    definitions: Vec<BehaviorDefinition>,
    index: HashMap<String, usize>,
}

impl BehaviorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for def in catalog::builtin_definitions() {
            if let Err(e) = registry.register(def) {
                warn!(error = %e, "built-in behavior skipped");
                debug_assert!(false, "built-in catalog is inconsistent: {e}");
            }
        }
        registry
    }

    /// Add a definition. Names are unique; a second registration under the
    /// same name is rejected and the registry is left unchanged.
    pub fn register(&mut self, definition: BehaviorDefinition) -> Result<(), DomainError> {
        if self.index.contains_key(&definition.name) {
            return Err(DomainError::DuplicateBehavior {
                name: definition.name,
            });
        }
        trace!(behavior = %definition.name, "registering behavior");
        self.index
            .insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, definition: BehaviorDefinition) -> Result<Self, DomainError> {
        self.register(definition)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&BehaviorDefinition> {
        self.index.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered names in registration order.
    pub fn list_names(&self) -> Vec<&str> {
        self.definitions.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BehaviorDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
