//! Command dispatching.
//!
//! Every subcommand implements [`Command`]; [`CommandDispatcher`] turns the
//! parsed [`Cli`] into one and runs it. Running with no subcommand is the
//! same as `check-readiness` with default arguments.

use std::path::{Path, PathBuf};

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

use super::check::CheckCommand;
use super::completions::CompletionsCommand;
use super::launch::LaunchCommand;
use super::schema::SchemaCommand;

/// A runnable subcommand.
pub trait Command {
    /// Run the command, writing through `ui`.
    ///
    /// `Err` is reserved for conditions that abort the command (an
    /// unreadable config, an invalid override). Gaps found by a check are
    /// reported through the returned [`CommandResult`].
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Outcome of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    /// Process exit code.
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Routes parsed arguments to their command.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Directory relative paths and the default config are resolved against.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Build the command for a parsed subcommand.
    pub fn command_for(&self, command: Option<&Commands>) -> Box<dyn Command> {
        let root = &self.project_root;
        match command {
            Some(Commands::CheckReadiness(args)) => Box::new(CheckCommand::new(root, args.clone())),
            Some(Commands::LaunchPlan(args)) => Box::new(LaunchCommand::new(root, args.clone())),
            Some(Commands::Schema(args)) => Box::new(SchemaCommand::new(args.clone())),
            Some(Commands::Completions(args)) => Box::new(CompletionsCommand::new(args.clone())),
            None => Box::new(CheckCommand::new(root, CheckArgs::default())),
        }
    }

    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = self.command_for(cli.command.as_ref());
        command.execute(ui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_results_carry_exit_codes() {
        assert_eq!(CommandResult::success().exit_code, 0);
        let failed = CommandResult::failure(2);
        assert!(!failed.success);
        assert_eq!(failed.exit_code, 2);
    }

    #[test]
    fn dispatches_schema_command() {
        let cli = Cli::parse_from(["searchready", "schema", "report"]);
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("ReadinessReport"));
    }

    #[test]
    fn no_subcommand_runs_readiness_check() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = Cli::parse_from(["searchready"]);
        let mut ui = MockUI::new();
        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&cli, &mut ui)
            .unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("Config: none"));
    }
}
