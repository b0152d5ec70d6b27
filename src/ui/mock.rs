//! Capturing UI for tests.
//!
//! ```
//! use searchready::ui::{MockUI, StatusKind, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.status_line(StatusKind::Blocking, "java-runtime: `java` not found on PATH");
//! ui.show_hint("conda install -c conda-forge openjdk=21");
//!
//! assert_eq!(ui.status_of("java-runtime"), Some(StatusKind::Blocking));
//! assert!(ui.has_hint("openjdk=21"));
//! ```

use super::{OutputMode, StatusKind, UserInterface};

/// Which trait method produced a captured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Message,
    Success,
    Warning,
    Error,
    Header,
    Hint,
}

/// Records everything written to it, in order.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    log: Vec<(Channel, String)>,
    status_lines: Vec<(StatusKind, String)>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Lines written to one channel, in order.
    pub fn lines(&self, channel: Channel) -> Vec<&str> {
        self.log
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.lines(Channel::Message)
    }

    pub fn successes(&self) -> Vec<&str> {
        self.lines(Channel::Success)
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.lines(Channel::Warning)
    }

    pub fn errors(&self) -> Vec<&str> {
        self.lines(Channel::Error)
    }

    pub fn headers(&self) -> Vec<&str> {
        self.lines(Channel::Header)
    }

    pub fn status_lines(&self) -> &[(StatusKind, String)] {
        &self.status_lines
    }

    fn contains(&self, channel: Channel, needle: &str) -> bool {
        self.log
            .iter()
            .any(|(c, line)| *c == channel && line.contains(needle))
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.contains(Channel::Message, needle)
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.contains(Channel::Success, needle)
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.contains(Channel::Warning, needle)
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.contains(Channel::Error, needle)
    }

    pub fn has_hint(&self, needle: &str) -> bool {
        self.contains(Channel::Hint, needle)
    }

    /// Kind of the first status line for precondition `name`.
    ///
    /// Lines look like `name`, `name: detail` or `name (only required for
    /// dense): detail`; only the leading word is compared.
    pub fn status_of(&self, name: &str) -> Option<StatusKind> {
        self.status_lines
            .iter()
            .find(|(_, line)| {
                line.split_whitespace()
                    .next()
                    .map(|word| word.trim_end_matches(':'))
                    == Some(name)
            })
            .map(|(kind, _)| *kind)
    }

    fn record(&mut self, channel: Channel, line: &str) {
        self.log.push((channel, line.to_string()));
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.record(Channel::Message, msg);
    }

    fn success(&mut self, msg: &str) {
        self.record(Channel::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.record(Channel::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.record(Channel::Error, msg);
    }

    fn status_line(&mut self, kind: StatusKind, msg: &str) {
        self.status_lines.push((kind, msg.to_string()));
    }

    fn show_header(&mut self, title: &str) {
        self.record(Channel::Header, title);
    }

    fn show_hint(&mut self, hint: &str) {
        self.record(Channel::Hint, hint);
    }

    fn is_interactive(&self) -> bool {
        false
    }
}
