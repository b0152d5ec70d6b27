//! Styled terminal UI.

use console::Term;
use std::io::Write;

use super::{NonInteractiveUI, OutputMode, ReadyTheme, StatusKind, UserInterface};

/// Icons and colors on a TTY. The report goes to stdout; warnings and
/// errors go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: ReadyTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self::with_theme(mode, ReadyTheme::detect())
    }

    pub fn with_theme(mode: OutputMode, theme: ReadyTheme) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.emphasis(StatusKind::Satisfied, msg);
        writeln!(self.out, "{}", line).ok();
    }

    fn warning(&mut self, msg: &str) {
        let line = self.theme.emphasis(StatusKind::Optional, msg);
        writeln!(self.err, "{}", line).ok();
    }

    fn error(&mut self, msg: &str) {
        let line = self.theme.emphasis(StatusKind::Blocking, msg);
        writeln!(self.err, "{}", line).ok();
    }

    fn status_line(&mut self, kind: StatusKind, msg: &str) {
        writeln!(self.out, "  {}", self.theme.status_line(kind, msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        writeln!(self.out, "\n{}\n", self.theme.heading(title)).ok();
    }

    fn show_hint(&mut self, hint: &str) {
        writeln!(self.out, "      {}", self.theme.remediation(hint)).ok();
    }

    fn is_interactive(&self) -> bool {
        self.out.is_term()
    }
}

/// Pick the styled UI when stdout is a terminal, the plain one otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_output_mode() {
        let ui = TerminalUI::with_theme(OutputMode::Quiet, ReadyTheme::plain());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn non_interactive_request_gets_plain_ui() {
        let ui = create_ui(false, OutputMode::Verbose);
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
