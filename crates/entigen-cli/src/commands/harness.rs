//! `entigen baseline | generate | compare | full`: the regression harness.
//!
//! Wires the local filesystem and the configured generator/formatter
//! commands into a [`BaselineHarness`] rooted at the working directory.

use std::io::IsTerminal as _;

use serde::Serialize;
use tracing::{info, instrument};

use entigen_adapters::{CommandFormatter, CommandGenerator, LocalFilesystem};
use entigen_core::{
    application::{BaselineHarness, GenerateSummary},
    domain::{CompareEntry, CompareReport},
};

use crate::{
    cli::{BaselineArgs, CompareArgs, GlobalArgs, ListFormat},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

fn build_harness(global: &GlobalArgs, config: &AppConfig) -> CliResult<BaselineHarness> {
    let working_dir = global.working_dir();
    let layout = config.harness.layout(&working_dir)?;
    let generator = CommandGenerator::new(config.harness.generator_command()?, &working_dir);

    let mut harness = BaselineHarness::new(
        layout,
        Box::new(LocalFilesystem::new()),
        Box::new(generator),
    );
    if let Some(spec) = config.harness.formatter_command() {
        harness = harness.with_formatter(Box::new(CommandFormatter::new(spec, &working_dir)));
    }
    Ok(harness)
}

// ── baseline ──────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
pub fn baseline(
    args: BaselineArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let harness = build_harness(&global, &config)?;
    let dir = harness.layout().baseline_dir().to_string();

    if harness.has_baseline() && !args.yes && !global.quiet && !confirm_replace(&dir)? {
        return Err(CliError::Cancelled);
    }

    let summary = harness.baseline()?;
    output.success(&format!(
        "Baseline captured: {} file(s) from {} root(s) into {dir}",
        summary.files, summary.roots
    ))?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm_replace(dir: &str) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(non_interactive(dir));
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("Replace the existing baseline in {dir}?"))
        .default(false)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "could not read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_replace(dir: &str) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(non_interactive(dir));
    }
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

fn non_interactive(dir: &str) -> CliError {
    CliError::InvalidInput {
        message: format!("a baseline already exists in {dir}; pass --yes to replace it"),
        source: None,
    }
}

// ── generate ──────────────────────────────────────────────────────────────────

#[instrument(skip_all)]
pub fn generate(global: GlobalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let harness = build_harness(&global, &config)?;
    let summary = run_generate(&harness, &config, &output)?;
    output.success(&format!(
        "Generated {} fixture(s); {} file(s) captured into {}",
        summary.fixtures,
        summary.files,
        harness.layout().scratch_dir()
    ))?;
    Ok(())
}

fn run_generate(
    harness: &BaselineHarness,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<GenerateSummary> {
    let bar = output.progress(0);
    let result = harness.generate_with_progress(|index, total, fixture| {
        bar.set_length(total as u64);
        bar.set_position(index as u64);
        bar.set_message(fixture.display().to_string());
    });
    bar.finish_and_clear();
    let summary = result?;

    if summary.fixtures == 0 {
        output.warning(&format!(
            "No fixtures found in {}",
            harness.layout().fixtures_dir()
        ))?;
    }
    if !summary.formatted && config.harness.formatter_command().is_some() {
        output.warning("Formatter failed; output was captured unformatted")?;
    }
    info!(fixtures = summary.fixtures, files = summary.files, "generate finished");
    Ok(summary)
}

// ── compare / full ────────────────────────────────────────────────────────────

#[instrument(skip_all)]
pub fn compare(
    args: CompareArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let harness = build_harness(&global, &config)?;
    let report = harness.compare()?;
    render_report(&report, &args, &output)
}

#[instrument(skip_all)]
pub fn full(
    args: CompareArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let harness = build_harness(&global, &config)?;
    run_generate(&harness, &config, &output)?;
    let report = harness.compare()?;
    render_report(&report, &args, &output)
}

#[derive(Serialize)]
struct ReportJson<'a> {
    passed: bool,
    summary: String,
    entries: &'a [CompareEntry],
}

/// Prints the report and turns a failed comparison into exit code 1.
fn render_report(report: &CompareReport, args: &CompareArgs, output: &OutputManager) -> CliResult<()> {
    match args.format {
        ListFormat::Json => output.json(&ReportJson {
            passed: report.passed(),
            summary: report.summary(),
            entries: report.entries(),
        })?,
        ListFormat::Table => {
            for entry in report.entries() {
                if args.all || entry.outcome.is_failure() {
                    output.compare_entry(entry)?;
                }
            }
            if report.passed() {
                output.success(&report.summary())?;
            } else {
                output.warning(&report.summary())?;
            }
        }
    }

    if report.passed() {
        Ok(())
    } else {
        Err(CliError::ComparisonFailed {
            failures: report.failures().count(),
        })
    }
}
