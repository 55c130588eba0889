//! Behavior and field definitions.
//!
//! A [`BehaviorDefinition`] is immutable once registered. Both types are
//! serialised in camelCase because the renderer consumes them as template
//! data alongside the generated TypeScript.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::Importance;

/// Semantic type of a generated column, independent of any storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Text,
    Integer,
    Boolean,
    Timestamp,
    Uuid,
    Json,
}

/// Presentation hints for generated field metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiHints {
    pub label: String,
    /// Widget type, e.g. `datetime`, `user`.
    #[serde(rename = "type")]
    pub ui_type: String,
    pub importance: Importance,
    pub group: Option<String>,
    pub visible: bool,
}

impl UiHints {
    pub fn new(label: impl Into<String>, ui_type: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ui_type: ui_type.into(),
            importance: Importance::Tertiary,
            group: None,
            visible: true,
        }
    }

    pub fn importance(mut self, importance: Importance) -> Self {
        self.importance = importance;
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// One generated column/property contributed by a behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorField {
    /// Storage identifier (`created_at`). Unique within a resolved entity.
    pub name: String,
    /// In-memory identifier (`createdAt`).
    pub camel_name: String,
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    pub ts_type: String,
    /// Drizzle column builder expression.
    pub column: String,
    pub drizzle_imports: Vec<String>,
    /// Zod schema expression.
    pub zod_schema: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub foreign_key: Option<String>,
    pub ui: Option<UiHints>,
}

impl BehaviorField {
    /// Create a non-nullable field. The remaining attributes default to
    /// empty strings and are filled in with the fluent setters.
    pub fn new(
        name: impl Into<String>,
        camel_name: impl Into<String>,
        semantic_type: SemanticType,
    ) -> Self {
        Self {
            name: name.into(),
            camel_name: camel_name.into(),
            semantic_type,
            ts_type: String::new(),
            column: String::new(),
            drizzle_imports: Vec::new(),
            zod_schema: String::new(),
            nullable: false,
            default: None,
            foreign_key: None,
            ui: None,
        }
    }

    pub fn ts_type(mut self, ts_type: impl Into<String>) -> Self {
        self.ts_type = ts_type.into();
        self
    }

    pub fn column(mut self, column: impl Into<String>, imports: &[&str]) -> Self {
        self.column = column.into();
        self.drizzle_imports = imports.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn zod(mut self, schema: impl Into<String>) -> Self {
        self.zod_schema = schema.into();
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn default_value(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn foreign_key(mut self, reference: impl Into<String>) -> Self {
        self.foreign_key = Some(reference.into());
        self
    }

    pub fn ui(mut self, hints: UiHints) -> Self {
        self.ui = Some(hints);
        self
    }
}

/// A named, reusable cross-cutting concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorDefinition {
    pub name: String,
    pub description: String,
    /// Ordered: resolution keeps this order for first contributions.
    pub fields: Vec<BehaviorField>,
    pub drizzle_imports: Vec<String>,
    pub requires: Vec<String>,
    pub conflicts: Vec<String>,
    /// Generated-class capabilities this behavior switches on.
    pub methods: Vec<String>,
    /// Key in the per-entity runtime configuration object.
    pub config_key: String,
}

impl BehaviorDefinition {
    pub fn new(name: impl Into<String>, config_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
            drizzle_imports: Vec::new(),
            requires: Vec::new(),
            conflicts: Vec::new(),
            methods: Vec::new(),
            config_key: config_key.into(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn field(mut self, field: BehaviorField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn imports(mut self, imports: &[&str]) -> Self {
        self.drizzle_imports = imports.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn requires(mut self, names: &[&str]) -> Self {
        self.requires = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn conflicts(mut self, names: &[&str]) -> Self {
        self.conflicts = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn methods(mut self, names: &[&str]) -> Self {
        self.methods = names.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}
