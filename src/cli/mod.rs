//! Command-line interface: argument definitions in [`args`], subcommands
//! in [`commands`].

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs, LaunchArgs, SchemaArgs, SchemaTarget};
pub use commands::{Command, CommandDispatcher, CommandResult};
