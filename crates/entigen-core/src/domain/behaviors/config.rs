//! Behavior references as written in entity definitions, and their
//! normalised form.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog;

/// A single option value. Mirrors what a YAML scalar/sequence/mapping can
/// hold, so entity files deserialise without a schema per behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<OptionValue>),
    Map(BTreeMap<String, OptionValue>),
}

impl OptionValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Options attached to one behavior reference. Ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BehaviorOptions(BTreeMap<String, OptionValue>);

impl BehaviorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: OptionValue) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.0.iter()
    }
}

/// A behavior reference exactly as an entity declares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BehaviorConfig {
    /// `- timestamps`
    Name(String),
    /// `- { name: soft_delete, options: { cascade: true } }`
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        options: Option<BehaviorOptions>,
    },
}

impl BehaviorConfig {
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Detailed { name, .. } => name,
        }
    }
}

impl From<&str> for BehaviorConfig {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for BehaviorConfig {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<NormalizedBehaviorConfig> for BehaviorConfig {
    fn from(config: NormalizedBehaviorConfig) -> Self {
        Self::Detailed {
            name: config.name,
            options: Some(config.options),
        }
    }
}

/// Canonical `{name, options}` shape; `options` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBehaviorConfig {
    pub name: String,
    #[serde(default)]
    pub options: BehaviorOptions,
}

impl NormalizedBehaviorConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: BehaviorOptions::new(),
        }
    }

    pub fn with_options(mut self, options: BehaviorOptions) -> Self {
        self.options = options;
        self
    }

    /// Typed view of the options for behaviors whose option shape is known.
    pub fn typed_options(&self) -> TypedOptions {
        match self.name.as_str() {
            catalog::SOFT_DELETE => TypedOptions::SoftDelete(SoftDeleteOptions::from(&self.options)),
            catalog::USER_TRACKING => {
                TypedOptions::UserTracking(UserTrackingOptions::from(&self.options))
            }
            _ => TypedOptions::Opaque(&self.options),
        }
    }
}

/// Canonicalise one reference. Total: never fails.
pub fn normalize(config: &BehaviorConfig) -> NormalizedBehaviorConfig {
    match config {
        BehaviorConfig::Name(name) => NormalizedBehaviorConfig::new(name.clone()),
        BehaviorConfig::Detailed { name, options } => NormalizedBehaviorConfig {
            name: name.clone(),
            options: options.clone().unwrap_or_default(),
        },
    }
}

/// Order-preserving [`normalize`] over a list.
pub fn normalize_all(configs: &[BehaviorConfig]) -> Vec<NormalizedBehaviorConfig> {
    configs.iter().map(normalize).collect()
}

// ── Typed views ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TypedOptions<'a> {
    SoftDelete(SoftDeleteOptions),
    UserTracking(UserTrackingOptions),
    Opaque(&'a BehaviorOptions),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftDeleteOptions {
    pub cascade: bool,
}

impl From<&BehaviorOptions> for SoftDeleteOptions {
    fn from(options: &BehaviorOptions) -> Self {
        Self {
            cascade: options
                .get("cascade")
                .and_then(OptionValue::as_bool)
                .unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTrackingOptions {
    pub users_table: String,
}

impl Default for UserTrackingOptions {
    fn default() -> Self {
        Self {
            users_table: "users".into(),
        }
    }
}

impl From<&BehaviorOptions> for UserTrackingOptions {
    fn from(options: &BehaviorOptions) -> Self {
        match options.get("users_table").and_then(OptionValue::as_str) {
            Some(table) => Self {
                users_table: table.to_string(),
            },
            None => Self::default(),
        }
    }
}
