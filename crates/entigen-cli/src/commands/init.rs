//! `entigen init`: write a default `codegen.config.yaml`.

use entigen_adapters::{LocalFilesystem, default_config_yaml};
use entigen_core::{application::ports::Filesystem, domain::CODEGEN_CONFIG_FILE};

use crate::{
    cli::{GlobalArgs, InitArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: InitArgs, global: GlobalArgs, output: OutputManager) -> CliResult<()> {
    let filesystem = LocalFilesystem::new();
    let path = global.working_dir().join(CODEGEN_CONFIG_FILE);

    // Bail early if the file already exists and --force was not given.
    if filesystem.exists(&path) && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    filesystem.write_bytes(&path, default_config_yaml().as_bytes())?;
    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}
