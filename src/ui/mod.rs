//! Terminal user interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for styled terminal output
//! - [`NonInteractiveUI`] for pipes, CI, and redirected output
//! - [`MockUI`] capturing output for tests
//!
//! # Example
//!
//! ```
//! use searchready::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Search service readiness");
//! ui.success("Ready");
//! ```

pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::{Channel, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ReadyTheme};

/// Output sink for commands.
///
/// Commands never print directly; they write through this trait so the
/// same rendering code drives a TTY, a pipe, or [`MockUI`] in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a line prefixed with a status icon.
    fn status_line(&mut self, kind: StatusKind, msg: &str);

    /// Show a section title.
    fn show_header(&mut self, title: &str);

    /// Show a contextual hint (e.g. a remediation command).
    fn show_hint(&mut self, hint: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}
