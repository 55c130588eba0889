//! `entigen plan`: show the output paths for one entity.

use std::collections::BTreeMap;

use serde::Serialize;

use entigen_core::{
    domain::{ArtifactKind, EntityName, OutputStructureMode, PathPlan, plan_paths},
    error::EntigenError,
};

use crate::{
    cli::{ListFormat, PlanArgs},
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanView {
    entity: String,
    structure: OutputStructureMode,
    files: BTreeMap<ArtifactKind, String>,
    barrel_exports: Vec<String>,
}

pub fn execute(args: PlanArgs, output: OutputManager) -> CliResult<()> {
    let entity = EntityName::try_new(args.entity.as_str()).map_err(EntigenError::from)?;
    let plan = plan_paths(&entity, args.structure.into(), &args.flags());
    let view = view(&plan, &args);

    match args.format {
        ListFormat::Json => output.json(&view)?,
        ListFormat::Table => {
            output.header(&format!("Plan for '{}' ({}):", view.entity, view.structure))?;
            for (kind, path) in &view.files {
                output.print(&format!("  {:<11}{path}", kind.as_str()))?;
            }
            if !view.barrel_exports.is_empty() {
                output.print(&format!("  barrel exports: {}", view.barrel_exports.join(", ")))?;
            }
        }
    }

    if plan.is_empty() {
        output.warning("Every artifact is disabled; nothing would be generated")?;
    }
    Ok(())
}

/// Paths use `/` separators, joined onto `--root` when given.
fn view(plan: &PathPlan, args: &PlanArgs) -> PlanView {
    let files = match &args.root {
        Some(root) => plan
            .resolve(root)
            .into_iter()
            .map(|(kind, path)| (kind, path.to_string_lossy().replace('\\', "/")))
            .collect(),
        None => plan
            .iter()
            .map(|(kind, path)| (kind, path.to_slash_string()))
            .collect(),
    };

    PlanView {
        entity: plan.entity().to_string(),
        structure: plan.mode(),
        files,
        barrel_exports: plan.barrel_exports(),
    }
}
