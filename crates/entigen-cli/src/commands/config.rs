//! `entigen config`: show the effective configuration and its sources.

use serde::Serialize;

use entigen_adapters::{CodegenConfigLoader, LocalFilesystem};
use entigen_core::domain::{CodegenConfig, ConfigOrigin, DefaultReason, LoadedCodegenConfig};

use crate::{
    cli::{GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Serialize)]
struct ConfigView<'a> {
    codegen: &'a CodegenConfig,
    codegen_source: String,
    codegen_problems: Vec<String>,
    app: &'a AppConfig,
    app_source: String,
}

pub fn execute(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let working_dir = global.working_dir();
    let codegen = CodegenConfigLoader::new(Box::new(LocalFilesystem::new())).load(&working_dir);

    let app_path = AppConfig::config_path(global.config.as_deref(), &working_dir);
    let app_source = if app_path.is_file() {
        app_path.display().to_string()
    } else {
        format!("defaults ({} not found)", app_path.display())
    };

    if output.format() == OutputFormat::Json {
        output.json(&ConfigView {
            codegen: &codegen.config,
            codegen_source: codegen.origin.to_string(),
            codegen_problems: problems(&codegen),
            app: &config,
            app_source,
        })?;
        return Ok(());
    }

    output.header("Codegen config:")?;
    output.print(&format!("  source:             {}", codegen.origin))?;
    output.print(&format!(
        "  behaviors.strategy: {}",
        codegen.config.behaviors.strategy
    ))?;
    for problem in problems(&codegen) {
        output.warning(&problem)?;
    }

    output.print("")?;
    output.header("Harness config:")?;
    output.print(&format!("  source: {app_source}"))?;
    let toml = toml::to_string_pretty(&config).with_cli_context(|| "Failed to serialise config")?;
    output.print(toml.trim_end())?;
    Ok(())
}

/// Why the codegen config fell back to defaults, if it did.
fn problems(loaded: &LoadedCodegenConfig) -> Vec<String> {
    match &loaded.origin {
        ConfigOrigin::Defaulted(DefaultReason::Unparseable(reason)) => vec![reason.clone()],
        ConfigOrigin::Defaulted(DefaultReason::SchemaViolations(violations)) => violations.clone(),
        _ => Vec::new(),
    }
}
