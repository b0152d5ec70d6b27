//! Precondition status types.
//!
//! Each evaluated check produces a [`Precondition`] describing what was
//! checked, whether it holds, and what to do when it does not.

use crate::config::Mode;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Group a precondition belongs to. Also the presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Python package importable by the service.
    Package,
    /// Managed runtime (the JVM).
    Runtime,
    /// Bundled binary assets (Lucene JARs).
    Asset,
    /// Data files referenced by the configuration.
    Data,
}

impl Category {
    /// All categories in presentation order.
    pub const ALL: [Category; 4] = [
        Category::Package,
        Category::Runtime,
        Category::Asset,
        Category::Data,
    ];

    /// Section heading for human-readable output.
    pub fn heading(self) -> &'static str {
        match self {
            Category::Package => "Packages",
            Category::Runtime => "Runtime",
            Category::Asset => "Assets",
            Category::Data => "Data",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Package => "package",
            Category::Runtime => "runtime",
            Category::Asset => "asset",
            Category::Data => "data",
        };
        f.write_str(s)
    }
}

/// Modes in which a precondition is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RequiredFor {
    /// Mandatory regardless of mode.
    All,
    /// Mandatory only when serving BM25.
    Bm25,
    /// Mandatory only when serving dense retrieval.
    Dense,
}

impl RequiredFor {
    /// Requirement scoped to a single mode.
    pub fn only(mode: Mode) -> Self {
        match mode {
            Mode::Bm25 => RequiredFor::Bm25,
            Mode::Dense => RequiredFor::Dense,
        }
    }

    /// The mode this requirement is scoped to, if any.
    pub fn mode(self) -> Option<Mode> {
        match self {
            RequiredFor::All => None,
            RequiredFor::Bm25 => Some(Mode::Bm25),
            RequiredFor::Dense => Some(Mode::Dense),
        }
    }

    /// Whether the precondition blocks readiness in the effective mode.
    ///
    /// With no effective mode, only mode-independent preconditions are
    /// mandatory; the rest are informational.
    pub fn is_mandatory(self, effective: Option<Mode>) -> bool {
        match self.mode() {
            None => true,
            Some(mode) => effective == Some(mode),
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The precondition holds.
    Satisfied,
    /// The precondition was checked and does not hold.
    Missing,
    /// The check could not be performed.
    Unknown,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Satisfied => "satisfied",
            Status::Missing => "missing",
            Status::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// An evaluated precondition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Precondition {
    /// Identifier, e.g. `pyserini`, `java-runtime`, `corpus-parquet`.
    pub name: String,
    pub category: Category,
    pub required_for: RequiredFor,
    pub status: Status,
    /// Whether this precondition blocks readiness in the effective mode.
    /// Filled in when the report is assembled.
    #[serde(default)]
    pub mandatory: bool,
    /// What was observed: a resolved path, a count, or why the check
    /// could not run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Instruction that fixes the precondition when it is missing.
    pub remediation: String,
}

impl Precondition {
    fn new(
        name: impl Into<String>,
        category: Category,
        required_for: RequiredFor,
        status: Status,
        remediation: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            required_for,
            status,
            mandatory: false,
            detail: None,
            remediation: remediation.into(),
        }
    }

    pub fn satisfied(
        name: impl Into<String>,
        category: Category,
        required_for: RequiredFor,
        remediation: impl Into<String>,
    ) -> Self {
        Self::new(name, category, required_for, Status::Satisfied, remediation)
    }

    pub fn missing(
        name: impl Into<String>,
        category: Category,
        required_for: RequiredFor,
        remediation: impl Into<String>,
    ) -> Self {
        Self::new(name, category, required_for, Status::Missing, remediation)
    }

    pub fn unknown(
        name: impl Into<String>,
        category: Category,
        required_for: RequiredFor,
        remediation: impl Into<String>,
    ) -> Self {
        Self::new(name, category, required_for, Status::Unknown, remediation)
    }

    /// Attach an observation.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_satisfied(&self) -> bool {
        self.status == Status::Satisfied
    }

    pub fn is_missing(&self) -> bool {
        self.status == Status::Missing
    }

    /// A missing precondition that blocks readiness.
    pub fn is_blocking(&self) -> bool {
        self.mandatory && self.is_missing()
    }
}
