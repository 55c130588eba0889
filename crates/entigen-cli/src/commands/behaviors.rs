//! `entigen behaviors`: list the registry.

use entigen_core::application::{BehaviorInfo, BehaviorService};

use crate::{
    cli::{BehaviorsArgs, ListFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: BehaviorsArgs, output: OutputManager) -> CliResult<()> {
    let behaviors = BehaviorService::builtin().list();

    match args.format {
        ListFormat::Json => output.json(&behaviors)?,
        ListFormat::Table => {
            output.header("Available behaviors:")?;
            for info in &behaviors {
                for line in table_lines(info) {
                    output.print(&line)?;
                }
            }
        }
    }
    Ok(())
}

const NAME_WIDTH: usize = 16;

fn table_lines(info: &BehaviorInfo) -> Vec<String> {
    let mut lines = vec![format!("  {:<NAME_WIDTH$}{}", info.name, info.description)];
    let details = [
        ("fields", &info.fields),
        ("methods", &info.methods),
        ("requires", &info.requires),
        ("conflicts", &info.conflicts),
    ];
    for (label, values) in details {
        if !values.is_empty() {
            lines.push(format!(
                "  {:<NAME_WIDTH$}{label}: {}",
                "",
                values.join(", ")
            ));
        }
    }
    lines
}
