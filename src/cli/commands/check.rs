//! Check-readiness command implementation.
//!
//! The `searchready check-readiness` command evaluates every precondition of
//! the search service and reports what is missing and how to fix it.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::{load_config_at, resolve_config_path, resolve_relative, CONFIG_ENV_VAR};
use crate::error::{ReadinessError, Result};
use crate::requirements::{ReadinessChecker, RuntimeDescription};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The check-readiness command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check-readiness command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the command arguments.
    pub fn args(&self) -> &CheckArgs {
        &self.args
    }

    /// Describe the host through `env_fn`, applying `--python-env`.
    fn describe_runtime<F>(&self, env_fn: &F) -> RuntimeDescription
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let runtime = RuntimeDescription::from_env_with(&self.project_root, env_fn);
        match &self.args.python_env {
            Some(prefix) => {
                runtime.with_python_prefix(&resolve_relative(&self.project_root, prefix))
            }
            None => runtime,
        }
    }

    /// Run the command with a custom environment lookup.
    pub fn run_with_env<F>(&self, ui: &mut dyn UserInterface, env_fn: F) -> Result<CommandResult>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let env_config = env_fn(CONFIG_ENV_VAR).ok();
        let location = resolve_config_path(
            self.args.config.as_deref(),
            env_config.as_deref(),
            &self.project_root,
        );
        let loaded = match &location {
            Some(location) => {
                tracing::debug!(
                    "Using config {} (from {})",
                    location.path.display(),
                    location.source
                );
                Some(load_config_at(location)?)
            }
            None => None,
        };

        let checker = ReadinessChecker::new(self.describe_runtime(&env_fn));
        let report = checker.check_loaded(
            location.as_ref().map(|l| l.path.as_path()),
            loaded,
            self.args.mode,
        );

        if self.args.json {
            let output = serde_json::to_string_pretty(&report)
                .map_err(|e| ReadinessError::Other(e.into()))?;
            ui.message(&output);
        } else {
            display::show_report(ui, &report);
        }

        let exit_code = display::exit_code(report.outcome());
        if exit_code == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(exit_code))
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run_with_env(ui, |key: &str| std::env::var(key))
    }
}
