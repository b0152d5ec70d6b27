//! Subcommand implementations.
//!
//! `check-readiness` and `launch-plan` read the project; `schema` and
//! `completions` only describe the tool itself. Output shared between them
//! lives in [`display`].

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod launch;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
