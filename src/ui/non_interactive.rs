//! Plain UI for pipes, CI, and redirected output.

use std::io::{self, Write};

use super::{OutputMode, StatusKind, UserInterface};

/// Plain-text UI. Status lines carry bracketed labels; warnings and
/// errors go to the error stream prefixed with `warning:` / `error:`.
pub struct NonInteractiveUI {
    mode: OutputMode,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl NonInteractiveUI {
    /// Write to the process stdout and stderr.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_writers(mode, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn with_writers(mode: OutputMode, out: Box<dyn Write>, err: Box<dyn Write>) -> Self {
        Self { mode, out, err }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "warning: {}", msg).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "error: {}", msg).ok();
    }

    fn status_line(&mut self, kind: StatusKind, msg: &str) {
        writeln!(self.out, "  {:<10} {}", kind.label(), msg).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "== {} ==", title).ok();
    }

    fn show_hint(&mut self, hint: &str) {
        writeln!(self.out, "             fix: {}", hint).ok();
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
