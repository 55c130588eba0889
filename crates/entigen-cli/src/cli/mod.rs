//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use entigen_core::domain::{ArtifactKind, BehaviorStrategy, GenerationFlags, OutputStructureMode};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "entigen",
    bin_name = "entigen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Entity code generation: behaviors, output layout and baseline regression",
    long_about = "entigen resolves entity behaviors into fields and imports, plans \
                  where generated files go, and guards the generator with a \
                  byte-exact baseline regression harness.",
    after_help = "EXAMPLES:\n\
        \x20 entigen baseline --yes\n\
        \x20 entigen full\n\
        \x20 entigen resolve -b timestamps -b soft_delete\n\
        \x20 entigen plan opportunity --structure concern-first\n\
        \x20 entigen completions bash > /usr/share/bash-completion/completions/entigen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Capture the current generated output as the known-good baseline.
    #[command(
        about = "Capture a known-good snapshot of the output roots",
        after_help = "EXAMPLES:\n\
            \x20 entigen baseline\n\
            \x20 entigen baseline --yes   # replace an existing baseline without asking"
    )]
    Baseline(BaselineArgs),

    /// Regenerate every fixture and snapshot the result.
    #[command(
        visible_alias = "gen",
        about = "Regenerate all fixtures into the scratch snapshot"
    )]
    Generate,

    /// Diff the scratch snapshot against the baseline.
    #[command(
        about = "Compare the scratch snapshot with the baseline",
        after_help = "Exits 0 when every file matches and 1 otherwise."
    )]
    Compare(CompareArgs),

    /// `generate` followed by `compare`.
    #[command(about = "Generate, then compare")]
    Full(CompareArgs),

    /// List the behavior registry.
    #[command(
        visible_alias = "ls",
        about = "List available behaviors",
        after_help = "EXAMPLES:\n\
            \x20 entigen behaviors\n\
            \x20 entigen behaviors --format json"
    )]
    Behaviors(BehaviorsArgs),

    /// Validate and resolve a behavior list.
    #[command(
        about = "Resolve behaviors into fields, imports and methods",
        after_help = "EXAMPLES:\n\
            \x20 entigen resolve -b timestamps -b soft_delete\n\
            \x20 entigen resolve -b timestamps,user_tracking --strategy inline --format table"
    )]
    Resolve(ResolveArgs),

    /// Plan output paths for an entity.
    #[command(
        about = "Show where an entity's files would be generated",
        after_help = "EXAMPLES:\n\
            \x20 entigen plan opportunity\n\
            \x20 entigen plan opportunity --structure monolithic\n\
            \x20 entigen plan lead --no-barrel --root src/generated"
    )]
    Plan(PlanArgs),

    /// Write a default `codegen.config.yaml`.
    #[command(
        about = "Initialise codegen configuration",
        after_help = "EXAMPLES:\n\
            \x20 entigen init\n\
            \x20 entigen init --force   # overwrite an existing file"
    )]
    Init(InitArgs),

    /// Show the effective configuration.
    #[command(about = "Show effective configuration and where it came from")]
    Config,

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 entigen completions bash > ~/.local/share/bash-completion/completions/entigen\n\
            \x20 entigen completions zsh  > ~/.zfunc/_entigen\n\
            \x20 entigen completions fish > ~/.config/fish/completions/entigen.fish"
    )]
    Completions(CompletionsArgs),
}

// ── harness ───────────────────────────────────────────────────────────────────

/// Arguments for `entigen baseline`.
#[derive(Debug, Args)]
pub struct BaselineArgs {
    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Replace an existing baseline without asking"
    )]
    pub yes: bool,
}

/// Arguments for `entigen compare` and `entigen full`.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Also list files that match.
    #[arg(long = "all", help = "List matching files as well as failures")]
    pub all: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── behaviors / resolve ───────────────────────────────────────────────────────

/// Arguments for `entigen behaviors`.
#[derive(Debug, Args)]
pub struct BehaviorsArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Arguments for `entigen resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Behavior names, in declaration order. Repeat the flag or separate
    /// with commas.
    #[arg(
        short = 'b',
        long = "behavior",
        value_name = "NAME",
        value_delimiter = ',',
        required = true,
        help = "Behavior to enable (repeatable)"
    )]
    pub behaviors: Vec<String>,

    /// Overrides `behaviors.strategy` from `codegen.config.yaml`.
    #[arg(long = "strategy", value_enum, help = "Behavior strategy")]
    pub strategy: Option<Strategy>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "json",
        help = "Output format"
    )]
    pub format: ListFormat,
}

// ── plan ──────────────────────────────────────────────────────────────────────

/// Arguments for `entigen plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Entity name, used as directory or file stem.
    #[arg(value_name = "ENTITY", help = "Entity name")]
    pub entity: String,

    #[arg(
        short = 's',
        long = "structure",
        value_enum,
        default_value = "entity-first",
        help = "Output structure mode"
    )]
    pub structure: Structure,

    #[arg(long = "no-types", help = "Skip the types artifact")]
    pub no_types: bool,

    #[arg(long = "no-collections", help = "Skip the collection artifact")]
    pub no_collections: bool,

    #[arg(long = "no-hooks", help = "Skip the hooks artifact")]
    pub no_hooks: bool,

    #[arg(long = "no-mutations", help = "Skip the mutations artifact")]
    pub no_mutations: bool,

    #[arg(long = "no-field-metadata", help = "Skip the field metadata artifact")]
    pub no_field_metadata: bool,

    #[arg(long = "no-barrel", help = "Skip the index.ts barrel")]
    pub no_barrel: bool,

    /// Prefix every planned path with this directory.
    #[arg(long = "root", value_name = "DIR", help = "Output root to join paths onto")]
    pub root: Option<PathBuf>,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

impl PlanArgs {
    pub fn flags(&self) -> GenerationFlags {
        let disabled = [
            (self.no_types, ArtifactKind::Types),
            (self.no_collections, ArtifactKind::Collection),
            (self.no_hooks, ArtifactKind::Hooks),
            (self.no_mutations, ArtifactKind::Mutations),
            (self.no_field_metadata, ArtifactKind::Fields),
            (self.no_barrel, ArtifactKind::Index),
        ];
        disabled
            .into_iter()
            .filter(|(off, _)| *off)
            .fold(GenerationFlags::default(), |flags, (_, kind)| {
                flags.disable(kind)
            })
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `entigen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `entigen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    #[value(name = "base_class", alias = "base-class")]
    BaseClass,
    Inline,
}

impl From<Strategy> for BehaviorStrategy {
    fn from(value: Strategy) -> Self {
        match value {
            Strategy::BaseClass => Self::BaseClass,
            Strategy::Inline => Self::Inline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Structure {
    #[value(alias = "entity_first")]
    EntityFirst,
    #[value(alias = "concern_first")]
    ConcernFirst,
    Monolithic,
}

impl From<Structure> for OutputStructureMode {
    fn from(value: Structure) -> Self {
        match value {
            Structure::EntityFirst => Self::EntityFirst,
            Structure::ConcernFirst => Self::ConcernFirst,
            Structure::Monolithic => Self::Monolithic,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn resolve_accepts_repeated_and_comma_separated() {
        let cli = Cli::parse_from([
            "entigen",
            "resolve",
            "-b",
            "timestamps,soft_delete",
            "-b",
            "user_tracking",
        ]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected Resolve command");
        };
        assert_eq!(args.behaviors, ["timestamps", "soft_delete", "user_tracking"]);
        assert!(args.strategy.is_none());
        assert_eq!(args.format, ListFormat::Json);
    }

    #[test]
    fn resolve_requires_a_behavior() {
        assert!(Cli::try_parse_from(["entigen", "resolve"]).is_err());
    }

    #[test]
    fn strategy_uses_config_spelling() {
        let cli = Cli::parse_from(["entigen", "resolve", "-b", "timestamps", "--strategy", "base_class"]);
        let Commands::Resolve(args) = cli.command else {
            panic!("expected Resolve command");
        };
        assert_eq!(args.strategy.map(BehaviorStrategy::from), Some(BehaviorStrategy::BaseClass));
    }

    #[test]
    fn structure_accepts_underscore_alias() {
        let cli = Cli::parse_from(["entigen", "plan", "lead", "--structure", "concern_first"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected Plan command");
        };
        assert_eq!(OutputStructureMode::from(args.structure), OutputStructureMode::ConcernFirst);
    }

    #[test]
    fn plan_flags_disable_kinds() {
        let cli = Cli::parse_from(["entigen", "plan", "lead", "--no-hooks", "--no-barrel"]);
        let Commands::Plan(args) = cli.command else {
            panic!("expected Plan command");
        };
        let flags = args.flags();
        assert!(!flags.hooks);
        assert!(!flags.barrel);
        assert!(flags.types);
        assert!(flags.mutations);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["entigen", "--quiet", "--verbose", "behaviors"]);
        assert!(result.is_err());
    }

    #[test]
    fn dir_is_global() {
        let cli = Cli::parse_from(["entigen", "compare", "-C", "/tmp/project"]);
        assert_eq!(cli.global.working_dir(), PathBuf::from("/tmp/project"));
    }
}
