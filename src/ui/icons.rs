//! Status vocabulary for precondition output.

use crate::requirements::{Precondition, Status};

/// How a precondition line is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Precondition holds.
    Satisfied,
    /// Missing and blocks readiness.
    Blocking,
    /// Missing but not mandatory in the effective mode.
    Optional,
    /// The check could not be performed.
    Unknown,
}

impl StatusKind {
    /// Classify an evaluated precondition.
    pub fn of(pre: &Precondition) -> Self {
        match pre.status {
            Status::Satisfied => Self::Satisfied,
            Status::Missing if pre.mandatory => Self::Blocking,
            Status::Missing => Self::Optional,
            Status::Unknown => Self::Unknown,
        }
    }

    /// Icon for terminal output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Satisfied => "✓",
            Self::Blocking => "✗",
            Self::Optional => "○",
            Self::Unknown => "?",
        }
    }

    /// Label for piped output, where icons make logs hard to grep.
    pub fn label(self) -> &'static str {
        match self {
            Self::Satisfied => "[ok]",
            Self::Blocking => "[MISSING]",
            Self::Optional => "[optional]",
            Self::Unknown => "[unknown]",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{Category, RequiredFor};

    fn torch(status: Status, mandatory: bool) -> Precondition {
        let mut pre = match status {
            Status::Satisfied => {
                Precondition::satisfied("torch", Category::Package, RequiredFor::Dense, "pip")
            }
            Status::Missing => {
                Precondition::missing("torch", Category::Package, RequiredFor::Dense, "pip")
            }
            Status::Unknown => {
                Precondition::unknown("torch", Category::Package, RequiredFor::Dense, "pip")
            }
        };
        pre.mandatory = mandatory;
        pre
    }

    #[test]
    fn classifies_preconditions() {
        assert_eq!(StatusKind::of(&torch(Status::Satisfied, true)), StatusKind::Satisfied);
        assert_eq!(StatusKind::of(&torch(Status::Missing, true)), StatusKind::Blocking);
        assert_eq!(StatusKind::of(&torch(Status::Missing, false)), StatusKind::Optional);
        assert_eq!(StatusKind::of(&torch(Status::Unknown, false)), StatusKind::Unknown);
    }

    #[test]
    fn labels_are_distinct_from_icons() {
        assert_eq!(StatusKind::Blocking.label(), "[MISSING]");
        assert_eq!(StatusKind::Blocking.icon(), "✗");
        assert_eq!(StatusKind::Unknown.label(), "[unknown]");
    }
}
