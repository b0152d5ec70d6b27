//! Aggregated readiness report.

use super::status::{Category, Precondition, Status};
use crate::config::{ConfigIssue, Mode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overall verdict of a report, in decreasing severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// At least one mandatory precondition is missing.
    MissingDependencies,
    /// Nothing mandatory is missing, but the configuration had problems.
    ConfigIssues,
    /// Nothing mandatory is missing and the configuration is sound.
    Ready,
}

/// Result of one readiness run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReadinessReport {
    /// Mode the mandatory set was computed for, if one could be determined.
    pub mode: Option<Mode>,
    /// Configuration file consulted, if any.
    pub config_path: Option<PathBuf>,
    /// Evaluated preconditions in evaluation order.
    pub preconditions: Vec<Precondition>,
    /// Problems that downgraded data checks to `unknown`.
    pub config_issues: Vec<ConfigIssue>,
    /// True iff no mandatory precondition is missing.
    pub ready: bool,
}

impl ReadinessReport {
    /// Assemble a report, marking which preconditions are mandatory for
    /// `mode` and deriving `ready`.
    pub fn new(
        mode: Option<Mode>,
        config_path: Option<PathBuf>,
        mut preconditions: Vec<Precondition>,
        config_issues: Vec<ConfigIssue>,
    ) -> Self {
        for pre in &mut preconditions {
            pre.mandatory = pre.required_for.is_mandatory(mode);
        }
        let ready = !preconditions.iter().any(Precondition::is_blocking);

        Self {
            mode,
            config_path,
            preconditions,
            config_issues,
            ready,
        }
    }

    /// Look up a precondition by name.
    pub fn get(&self, name: &str) -> Option<&Precondition> {
        self.preconditions.iter().find(|p| p.name == name)
    }

    /// Status of a precondition by name.
    pub fn status_of(&self, name: &str) -> Option<Status> {
        self.get(name).map(|p| p.status)
    }

    /// Preconditions of one category, in order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &Precondition> {
        self.preconditions
            .iter()
            .filter(move |p| p.category == category)
    }

    /// All missing preconditions, mandatory or not.
    pub fn missing(&self) -> impl Iterator<Item = &Precondition> {
        self.preconditions.iter().filter(|p| p.is_missing())
    }

    /// Missing preconditions that block readiness.
    pub fn blocking(&self) -> impl Iterator<Item = &Precondition> {
        self.preconditions.iter().filter(|p| p.is_blocking())
    }

    /// Remediation steps for every missing precondition, blocking ones
    /// first, duplicates removed.
    pub fn remediation_plan(&self) -> Vec<&Precondition> {
        let informational = self.missing().filter(|p| !p.mandatory);
        let mut plan: Vec<&Precondition> = Vec::new();
        for pre in self.blocking().chain(informational) {
            if !plan.iter().any(|p| p.remediation == pre.remediation) {
                plan.push(pre);
            }
        }
        plan
    }

    pub fn has_config_issues(&self) -> bool {
        !self.config_issues.is_empty()
    }

    pub fn outcome(&self) -> Outcome {
        if !self.ready {
            Outcome::MissingDependencies
        } else if self.has_config_issues() {
            Outcome::ConfigIssues
        } else {
            Outcome::Ready
        }
    }
}
