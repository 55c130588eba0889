//! Subprocess-backed generator and formatter.
//!
//! Both run synchronously in the working directory and block until the
//! child exits. There is no timeout.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use entigen_core::{
    application::{
        ApplicationError,
        ports::{FixtureGenerator, OutputFormatter},
    },
    error::{EntigenError, EntigenResult},
};
use tracing::{debug, instrument};

/// Replaced by the fixture path in generator arguments.
pub const FIXTURE_PLACEHOLDER: &str = "{fixture}";
/// An argument equal to this expands to one argument per output root.
pub const ROOTS_PLACEHOLDER: &str = "{roots}";

/// Lines of stderr kept in error messages.
const STDERR_TAIL: usize = 20;

/// A program plus its argument template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// `["npx", "plop", ...]` → program `npx`. `None` for an empty list.
    pub fn from_argv<S: AsRef<str>>(argv: &[S]) -> Option<Self> {
        let (program, args) = argv.split_first()?;
        Some(Self {
            program: program.as_ref().to_string(),
            args: args.iter().map(|a| a.as_ref().to_string()).collect(),
        })
    }

    fn display(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn run(spec: &CommandSpec, args: &[String], working_dir: &Path) -> Result<(), String> {
    let line = spec.display(args);
    debug!(command = %line, dir = %working_dir.display(), "spawning");

    let output = Command::new(&spec.program)
        .args(args)
        .current_dir(working_dir)
        .output()
        .map_err(|e| format!("failed to launch '{}': {}", spec.program, e))?;

    if output.status.success() {
        Ok(())
    } else {
        Err(failure_message(&line, &output))
    }
}

fn failure_message(line: &str, output: &Output) -> String {
    let status = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    let tail = lines[lines.len().saturating_sub(STDERR_TAIL)..].join("\n");

    if tail.trim().is_empty() {
        format!("'{line}' exited with status {status}")
    } else {
        format!("'{line}' exited with status {status}:\n{tail}")
    }
}

// ── Generator ────────────────────────────────────────────────────────────────

/// Runs the external generator once per fixture.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    spec: CommandSpec,
    working_dir: PathBuf,
}

impl CommandGenerator {
    pub fn new(spec: CommandSpec, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            spec,
            working_dir: working_dir.into(),
        }
    }

    /// Arguments with every `{fixture}` occurrence substituted. When no
    /// argument mentions the placeholder the fixture is appended.
    pub fn args_for(&self, fixture: &Path) -> Vec<String> {
        let fixture = fixture.to_string_lossy();
        let mut substituted = false;
        let mut args: Vec<String> = self
            .spec
            .args
            .iter()
            .map(|a| {
                if a.contains(FIXTURE_PLACEHOLDER) {
                    substituted = true;
                    a.replace(FIXTURE_PLACEHOLDER, &fixture)
                } else {
                    a.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(fixture.into_owned());
        }
        args
    }
}

impl FixtureGenerator for CommandGenerator {
    #[instrument(skip_all, fields(fixture = %fixture.display()))]
    fn generate(&self, fixture: &Path) -> EntigenResult<()> {
        run(&self.spec, &self.args_for(fixture), &self.working_dir).map_err(|reason| {
            EntigenError::from(ApplicationError::FixtureFailed {
                fixture: fixture.to_path_buf(),
                reason,
            })
        })
    }
}

// ── Formatter ────────────────────────────────────────────────────────────────

/// Runs the formatter once over every output root.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    spec: CommandSpec,
    working_dir: PathBuf,
}

impl CommandFormatter {
    pub fn new(spec: CommandSpec, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            spec,
            working_dir: working_dir.into(),
        }
    }

    /// Arguments with a `{roots}` argument expanded in place. When absent
    /// the roots are appended.
    pub fn args_for(&self, roots: &[PathBuf]) -> Vec<String> {
        let roots: Vec<String> = roots
            .iter()
            .map(|r| r.to_string_lossy().into_owned())
            .collect();

        if !self.spec.args.iter().any(|a| a == ROOTS_PLACEHOLDER) {
            return self.spec.args.iter().cloned().chain(roots).collect();
        }
        self.spec
            .args
            .iter()
            .flat_map(|a| {
                if a == ROOTS_PLACEHOLDER {
                    roots.clone()
                } else {
                    vec![a.clone()]
                }
            })
            .collect()
    }
}

impl OutputFormatter for CommandFormatter {
    #[instrument(skip_all, fields(roots = roots.len()))]
    fn format(&self, roots: &[PathBuf]) -> EntigenResult<()> {
        run(&self.spec, &self.args_for(roots), &self.working_dir)
            .map_err(|reason| ApplicationError::FormatterFailed { reason }.into())
    }
}
