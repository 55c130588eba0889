//! `entigen resolve`: validate and resolve a behavior list.

use tracing::instrument;

use entigen_adapters::{CodegenConfigLoader, LocalFilesystem};
use entigen_core::{
    application::BehaviorService,
    domain::{BehaviorConfig, BehaviorStrategy, ResolvedBehaviors},
};

use crate::{
    cli::{GlobalArgs, ListFormat, ResolveArgs},
    error::CliResult,
    output::OutputManager,
};

/// `--strategy` wins; otherwise `behaviors.strategy` from the project's
/// `codegen.config.yaml`.
#[instrument(skip_all, fields(behaviors = args.behaviors.len()))]
pub fn execute(args: ResolveArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let configs: Vec<BehaviorConfig> = args
        .behaviors
        .iter()
        .map(|name| BehaviorConfig::from(name.trim()))
        .collect();

    let codegen = CodegenConfigLoader::new(Box::new(LocalFilesystem::new()))
        .load(&global.working_dir());
    let strategy = args.strategy.map(BehaviorStrategy::from);

    let resolved = BehaviorService::builtin().resolve_for_entity(
        &configs,
        strategy.as_ref().map(BehaviorStrategy::as_str),
        Some(&codegen.config),
    )?;

    match args.format {
        ListFormat::Json => output.json(&resolved)?,
        ListFormat::Table => {
            for line in table_lines(&resolved) {
                output.print(&line)?;
            }
        }
    }
    Ok(())
}

fn table_lines(resolved: &ResolvedBehaviors) -> Vec<String> {
    let mut lines = vec![
        format!("Strategy:  {}", resolved.strategy),
        format!("Behaviors: {}", resolved.behavior_names.join(", ")),
        "Fields:".to_string(),
    ];
    let width = resolved
        .fields
        .iter()
        .map(|f| f.name.len())
        .max()
        .unwrap_or(0);
    for field in &resolved.fields {
        let nullable = if field.nullable { "  nullable" } else { "" };
        lines.push(format!(
            "  {:<width$}  {}  {}{nullable}",
            field.name, field.ts_type, field.column
        ));
    }
    lines.push(format!("Imports:   {}", resolved.imports.join(", ")));
    lines.push(format!("Methods:   {}", resolved.methods.join(", ")));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lists_fields_in_resolution_order() {
        let configs: Vec<BehaviorConfig> = vec!["timestamps".into(), "soft_delete".into()];
        let resolved = BehaviorService::builtin()
            .resolve(&configs, BehaviorStrategy::Inline)
            .unwrap();
        let lines = table_lines(&resolved);

        assert_eq!(lines[0], "Strategy:  inline");
        assert_eq!(lines[1], "Behaviors: timestamps, soft_delete");
        let fields: Vec<&String> = lines.iter().filter(|l| l.starts_with("  ")).collect();
        assert_eq!(fields.len(), 3);
        assert!(fields[0].trim_start().starts_with("created_at"));
        assert!(fields[2].ends_with("nullable"));
        assert!(lines.contains(&"Imports:   timestamp".to_string()));
    }
}
