//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::Mode;

/// searchready - Readiness checks for the offline search service.
#[derive(Debug, Parser)]
#[command(name = "searchready")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check whether the search service can start (default if no command specified)
    CheckReadiness(CheckArgs),

    /// Show how the search service would be launched
    LaunchPlan(LaunchArgs),

    /// Print the JSON Schema of the config file or the readiness report
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check-readiness` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Path to the service config (default: $SEARCH_CONFIG, then ./search_config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Retrieval mode to check for (overrides engine.type)
    #[arg(short, long, value_name = "bm25|dense")]
    pub mode: Option<Mode>,

    /// Python environment prefix (default: $CONDA_PREFIX, then $VIRTUAL_ENV)
    #[arg(long, value_name = "PREFIX")]
    pub python_env: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `launch-plan` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct LaunchArgs {
    /// Path to the service config (default: $SEARCH_CONFIG, then ./search_config.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind host (overrides $SEARCH_HOST and service.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides $SEARCH_PORT and service.port)
    #[arg(long)]
    pub port: Option<u16>,

    /// Output the plan as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which schema to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaTarget {
    /// The search_config.yaml file
    Config,
    /// The JSON readiness report
    Report,
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, clap::Args)]
pub struct SchemaArgs {
    /// Schema to print
    #[arg(value_enum)]
    pub target: SchemaTarget,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_readiness_flags() {
        let cli = Cli::parse_from([
            "searchready",
            "check-readiness",
            "--config",
            "svc.yaml",
            "--mode",
            "dense",
            "--python-env",
            "/opt/conda/envs/search",
            "--json",
        ]);
        let Some(Commands::CheckReadiness(args)) = cli.command else {
            panic!("expected check-readiness");
        };
        assert_eq!(args.config, Some(PathBuf::from("svc.yaml")));
        assert_eq!(args.mode, Some(Mode::Dense));
        assert_eq!(
            args.python_env,
            Some(PathBuf::from("/opt/conda/envs/search"))
        );
        assert!(args.json);
    }

    #[test]
    fn rejects_unknown_mode() {
        let result = Cli::try_parse_from(["searchready", "check-readiness", "--mode", "splade"]);
        assert!(result.is_err());
    }

    #[test]
    fn mode_is_case_insensitive() {
        let cli = Cli::parse_from(["searchready", "check-readiness", "--mode", "BM25"]);
        let Some(Commands::CheckReadiness(args)) = cli.command else {
            panic!("expected check-readiness");
        };
        assert_eq!(args.mode, Some(Mode::Bm25));
    }

    #[test]
    fn parses_launch_plan_flags() {
        let cli = Cli::parse_from([
            "searchready",
            "launch-plan",
            "--host",
            "127.0.0.1",
            "--port",
            "9000",
        ]);
        let Some(Commands::LaunchPlan(args)) = cli.command else {
            panic!("expected launch-plan");
        };
        assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
        assert_eq!(args.port, Some(9000));
    }

    #[test]
    fn rejects_out_of_range_port() {
        let result = Cli::try_parse_from(["searchready", "launch-plan", "--port", "70000"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["searchready", "check-readiness", "--quiet", "--debug"]);
        assert!(cli.quiet);
        assert!(cli.debug);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["searchready"]);
        assert!(cli.command.is_none());
    }
}
