//! Process-wide generation settings and strategy resolution.
//!
//! Loading from disk happens in the adapters crate; this module only holds
//! the shape, the defaults, and the outcome type that records *why* defaults
//! were used.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::BehaviorStrategy;

/// Project configuration file, relative to the working directory.
pub const CODEGEN_CONFIG_FILE: &str = "codegen.config.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    pub behaviors: BehaviorsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorsConfig {
    pub strategy: BehaviorStrategy,
}

impl CodegenConfig {
    pub fn with_strategy(strategy: BehaviorStrategy) -> Self {
        Self {
            behaviors: BehaviorsConfig { strategy },
        }
    }
}

/// Pick the strategy for one entity.
///
/// The entity's own value wins only when it is exactly `base_class` or
/// `inline`; anything else falls back to the global config, then to the
/// hard default.
pub fn resolve_strategy(
    entity_override: Option<&str>,
    global: Option<&CodegenConfig>,
) -> BehaviorStrategy {
    entity_override
        .and_then(|s| s.parse().ok())
        .or_else(|| global.map(|c| c.behaviors.strategy))
        .unwrap_or_default()
}

// ── Load outcome ─────────────────────────────────────────────────────────────

/// Why the loader fell back to [`CodegenConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// No file at the fixed path. Not an error.
    Missing,
    /// The file exists but is not valid YAML.
    Unparseable(String),
    /// Valid YAML that breaks the schema; one entry per violation.
    SchemaViolations(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaulted(DefaultReason),
}

impl fmt::Display for ConfigOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Defaulted(DefaultReason::Missing) => f.write_str("defaults (no config file)"),
            Self::Defaulted(DefaultReason::Unparseable(_)) => {
                f.write_str("defaults (config file could not be parsed)")
            }
            Self::Defaulted(DefaultReason::SchemaViolations(v)) => {
                write!(f, "defaults ({} schema violation(s))", v.len())
            }
        }
    }
}

/// A config together with where it came from. `config` is always usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedCodegenConfig {
    pub config: CodegenConfig,
    pub origin: ConfigOrigin,
}

impl LoadedCodegenConfig {
    pub fn from_file(config: CodegenConfig, path: PathBuf) -> Self {
        Self {
            config,
            origin: ConfigOrigin::File(path),
        }
    }

    pub fn defaulted(reason: DefaultReason) -> Self {
        Self {
            config: CodegenConfig::default(),
            origin: ConfigOrigin::Defaulted(reason),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self.origin, ConfigOrigin::Defaulted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_strategy_is_base_class() {
        assert_eq!(CodegenConfig::default().behaviors.strategy, BehaviorStrategy::BaseClass);
    }

    #[test]
    fn valid_override_wins() {
        let global = CodegenConfig::with_strategy(BehaviorStrategy::BaseClass);
        assert_eq!(
            resolve_strategy(Some("inline"), Some(&global)),
            BehaviorStrategy::Inline
        );
    }

    #[test]
    fn invalid_override_falls_back_to_global() {
        let global = CodegenConfig::with_strategy(BehaviorStrategy::Inline);
        assert_eq!(
            resolve_strategy(Some("Inline"), Some(&global)),
            BehaviorStrategy::Inline
        );
        assert_eq!(
            resolve_strategy(Some("mixin"), Some(&global)),
            BehaviorStrategy::Inline
        );
    }

    #[test]
    fn no_override_no_global_is_hard_default() {
        assert_eq!(resolve_strategy(None, None), BehaviorStrategy::BaseClass);
        assert_eq!(resolve_strategy(Some(""), None), BehaviorStrategy::BaseClass);
    }

    #[test]
    fn partial_yaml_is_defaulted() {
        let cfg: CodegenConfig = serde_yaml_ng::from_str("behaviors: {}").unwrap();
        assert_eq!(cfg, CodegenConfig::default());

        let cfg: CodegenConfig = serde_yaml_ng::from_str("behaviors:\n  strategy: inline\n").unwrap();
        assert_eq!(cfg.behaviors.strategy, BehaviorStrategy::Inline);
    }

    #[test]
    fn origins_stay_distinguishable() {
        let missing = LoadedCodegenConfig::defaulted(DefaultReason::Missing);
        let broken = LoadedCodegenConfig::defaulted(DefaultReason::Unparseable("bad".into()));
        assert_eq!(missing.config, broken.config);
        assert_ne!(missing.origin, broken.origin);
        assert!(missing.is_defaulted());
        assert!(
            !LoadedCodegenConfig::from_file(CodegenConfig::default(), "x.yaml".into())
                .is_defaulted()
        );
    }
}
