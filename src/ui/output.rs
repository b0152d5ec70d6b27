//! Output verbosity.

/// How much of the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Every precondition, with what was observed for satisfied ones.
    Verbose,
    /// Every precondition; details only for gaps.
    #[default]
    Normal,
    /// Only gaps and the verdict.
    Quiet,
}

impl OutputMode {
    /// Build a mode from the global `--verbose` / `--quiet` flags.
    /// `--quiet` wins when both are given.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        match (verbose, quiet) {
            (_, true) => Self::Quiet,
            (true, false) => Self::Verbose,
            (false, false) => Self::Normal,
        }
    }

    /// Whether satisfied preconditions show their detail.
    pub fn shows_details(self) -> bool {
        self == Self::Verbose
    }

    /// Whether satisfied preconditions are listed at all.
    pub fn shows_satisfied(self) -> bool {
        self != Self::Quiet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
    }

    #[test]
    fn details_only_in_verbose() {
        assert!(OutputMode::Verbose.shows_details());
        assert!(!OutputMode::Normal.shows_details());
        assert!(!OutputMode::Quiet.shows_details());
    }

    #[test]
    fn quiet_hides_satisfied() {
        assert!(OutputMode::Verbose.shows_satisfied());
        assert!(OutputMode::Normal.shows_satisfied());
        assert!(!OutputMode::Quiet.shows_satisfied());
    }

    #[test]
    fn default_is_normal() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
