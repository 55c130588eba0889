//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the [`HarnessLayout`]
//! and adapters built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. `ENTIGEN__*` environment variables, e.g. `ENTIGEN__HARNESS__SCRATCH_DIR`
//! 2. Config file (`--config <FILE>`, else `entigen.toml` in the working dir)
//! 3. Built-in defaults (always present)
//!
//! List values given through the environment are space separated.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use entigen_adapters::CommandSpec;
use entigen_core::{
    application::{
        HarnessLayout,
        services::baseline_service::{
            DEFAULT_BASELINE_DIR, DEFAULT_FIXTURE_EXTENSIONS, DEFAULT_FIXTURES_DIR,
            DEFAULT_OUTPUT_ROOT, DEFAULT_SCRATCH_DIR,
        },
    },
    error::{EntigenError, EntigenResult},
};

/// File looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "entigen.toml";

const ENV_PREFIX: &str = "ENTIGEN";

/// Keys whose environment values are split into lists.
const LIST_KEYS: [&str; 4] = [
    "harness.output_roots",
    "harness.fixture_extensions",
    "harness.generator",
    "harness.formatter",
];

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Baseline harness wiring.
    pub harness: HarnessConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub output_roots: Vec<String>,
    pub baseline_dir: String,
    pub scratch_dir: String,
    pub fixtures_dir: String,
    pub fixture_extensions: Vec<String>,
    /// Program and arguments; `{fixture}` is replaced by the fixture path.
    pub generator: Vec<String>,
    /// Program and arguments; `{roots}` expands to the output roots. Empty
    /// disables formatting.
    pub formatter: Vec<String>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            output_roots: vec![DEFAULT_OUTPUT_ROOT.into()],
            baseline_dir: DEFAULT_BASELINE_DIR.into(),
            scratch_dir: DEFAULT_SCRATCH_DIR.into(),
            fixtures_dir: DEFAULT_FIXTURES_DIR.into(),
            fixture_extensions: DEFAULT_FIXTURE_EXTENSIONS.map(String::from).to_vec(),
            generator: ["npx", "plop", "entity", "--", "{fixture}"]
                .map(String::from)
                .to_vec(),
            formatter: ["npx", "prettier", "--write", "{roots}"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit `config_file` must exist; the default `entigen.toml` is
    /// optional.
    pub fn load(config_file: Option<&Path>, working_dir: &Path) -> Result<Self, ConfigError> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(working_dir.join(CONFIG_FILE)).required(false),
        };

        let env = LIST_KEYS.into_iter().fold(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .list_separator(" "),
            |env, key| env.with_list_parse_key(key),
        );

        Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    /// Path of the config file [`AppConfig::load`] reads.
    pub fn config_path(config_file: Option<&Path>, working_dir: &Path) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(|| working_dir.join(CONFIG_FILE))
    }
}

impl HarnessConfig {
    /// Validated harness directories rooted at `working_dir`.
    pub fn layout(&self, working_dir: &Path) -> EntigenResult<HarnessLayout> {
        let layout = HarnessLayout::new(working_dir)
            .with_output_roots(&self.output_roots)?
            .with_baseline_dir(&self.baseline_dir)?
            .with_scratch_dir(&self.scratch_dir)?
            .with_fixtures_dir(&self.fixtures_dir)?
            .with_fixture_extensions(&self.fixture_extensions);
        layout.validate()?;
        Ok(layout)
    }

    pub fn generator_command(&self) -> EntigenResult<CommandSpec> {
        CommandSpec::from_argv(&self.generator)
            .ok_or_else(|| EntigenError::configuration("harness.generator must name a program"))
    }

    /// `None` when formatting is disabled.
    pub fn formatter_command(&self) -> Option<CommandSpec> {
        CommandSpec::from_argv(&self.formatter)
    }
}
