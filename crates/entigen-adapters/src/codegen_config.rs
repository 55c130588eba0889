//! `codegen.config.yaml` loader.
//!
//! Never fails: a missing, unparseable, or schema-violating file yields the
//! default config, and the returned origin records which of those happened.

use std::path::Path;

use entigen_core::{
    application::ports::Filesystem,
    domain::{
        BehaviorStrategy, CODEGEN_CONFIG_FILE, CodegenConfig, DefaultReason, LoadedCodegenConfig,
    },
};
use serde_yaml_ng::Value;
use tracing::{debug, instrument, warn};

pub struct CodegenConfigLoader {
    filesystem: Box<dyn Filesystem>,
}

impl CodegenConfigLoader {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Load `<working_dir>/codegen.config.yaml`. Each call re-reads the file.
    #[instrument(skip_all, fields(dir = %working_dir.display()))]
    pub fn load(&self, working_dir: &Path) -> LoadedCodegenConfig {
        let path = working_dir.join(CODEGEN_CONFIG_FILE);
        if !self.filesystem.exists(&path) {
            debug!("no codegen config; using defaults");
            return LoadedCodegenConfig::defaulted(DefaultReason::Missing);
        }

        let parsed = self
            .filesystem
            .read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|text| parse_value(&text));
        let value = match parsed {
            Ok(value) => value,
            Err(reason) => {
                warn!(path = %path.display(), %reason, "could not parse codegen config; using defaults");
                return LoadedCodegenConfig::defaulted(DefaultReason::Unparseable(reason));
            }
        };

        let violations = validate_schema(&value);
        if !violations.is_empty() {
            for violation in &violations {
                warn!(path = %path.display(), %violation, "codegen config schema violation");
            }
            return LoadedCodegenConfig::defaulted(DefaultReason::SchemaViolations(violations));
        }

        match serde_yaml_ng::from_value::<CodegenConfig>(value) {
            Ok(config) => LoadedCodegenConfig::from_file(config, path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "codegen config rejected; using defaults");
                LoadedCodegenConfig::defaulted(DefaultReason::SchemaViolations(vec![e.to_string()]))
            }
        }
    }
}

/// An empty document is treated as an empty mapping.
fn parse_value(text: &str) -> Result<Value, String> {
    match serde_yaml_ng::from_str::<Value>(text) {
        Ok(Value::Null) => Ok(Value::Mapping(Default::default())),
        Ok(value) => Ok(value),
        Err(e) => Err(e.to_string()),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Every schema violation in `value`, in document order.
///
/// Unknown keys are allowed so newer config files still load.
pub fn validate_schema(value: &Value) -> Vec<String> {
    let mut violations = Vec::new();

    let Value::Mapping(root) = value else {
        violations.push(format!("top level must be a mapping, found {}", type_name(value)));
        return violations;
    };

    let Some(behaviors) = root.get("behaviors") else {
        return violations;
    };
    let Value::Mapping(behaviors) = behaviors else {
        violations.push(format!(
            "behaviors must be a mapping, found {}",
            type_name(behaviors)
        ));
        return violations;
    };

    if let Some(strategy) = behaviors.get("strategy") {
        let allowed: Vec<&str> = BehaviorStrategy::ALL.iter().map(|s| s.as_str()).collect();
        match strategy {
            Value::String(s) if allowed.contains(&s.as_str()) => {}
            Value::String(s) => violations.push(format!(
                "behaviors.strategy must be one of {}, found '{}'",
                allowed.join(", "),
                s
            )),
            other => violations.push(format!(
                "behaviors.strategy must be a string, found {}",
                type_name(other)
            )),
        }
    }

    violations
}

/// The file `entigen init` writes.
pub fn default_config_yaml() -> String {
    format!(
        "# entigen code generation settings\n\
         behaviors:\n  \
           # How behavior methods are emitted: {}\n  \
           strategy: {}\n",
        BehaviorStrategy::ALL.map(|s| s.as_str()).join(" | "),
        BehaviorStrategy::default()
    )
}
