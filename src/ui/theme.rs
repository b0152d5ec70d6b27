//! Colors for readiness output.

use console::Style;

use super::StatusKind;

/// One style per status kind, plus headings and remediation hints.
#[derive(Debug, Clone)]
pub struct ReadyTheme {
    satisfied: Style,
    blocking: Style,
    optional: Style,
    unknown: Style,
    heading: Style,
    remediation: Style,
}

impl ReadyTheme {
    /// Green satisfied, red blocking, orange optional, magenta unknown.
    pub fn colored() -> Self {
        Self {
            satisfied: Style::new().green(),
            blocking: Style::new().red().bold(),
            optional: Style::new().color256(208),
            unknown: Style::new().magenta(),
            heading: Style::new().bold(),
            remediation: Style::new().dim(),
        }
    }

    pub fn plain() -> Self {
        Self {
            satisfied: Style::new(),
            blocking: Style::new(),
            optional: Style::new(),
            unknown: Style::new(),
            heading: Style::new(),
            remediation: Style::new(),
        }
    }

    /// Colored unless `NO_COLOR` is set or stdout is not a terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    fn style(&self, kind: StatusKind) -> &Style {
        match kind {
            StatusKind::Satisfied => &self.satisfied,
            StatusKind::Blocking => &self.blocking,
            StatusKind::Optional => &self.optional,
            StatusKind::Unknown => &self.unknown,
        }
    }

    /// A precondition line: colored icon, plain text.
    pub fn status_line(&self, kind: StatusKind, msg: &str) -> String {
        format!("{} {}", self.style(kind).apply_to(kind.icon()), msg)
    }

    /// A whole line in the color of `kind`, e.g. the verdict.
    pub fn emphasis(&self, kind: StatusKind, msg: &str) -> String {
        self.style(kind)
            .apply_to(format!("{} {}", kind.icon(), msg))
            .to_string()
    }

    pub fn heading(&self, title: &str) -> String {
        self.heading.apply_to(title).to_string()
    }

    pub fn remediation(&self, hint: &str) -> String {
        format!("fix: {}", self.remediation.apply_to(hint))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}
