//! Shared display helpers for readiness output.
//!
//! Used by `check-readiness` to render a [`ReadinessReport`] and by
//! `launch-plan` to render a [`LaunchPlan`].

use crate::launch::LaunchPlan;
use crate::requirements::{Category, Outcome, Precondition, ReadinessReport};
use crate::ui::{StatusKind, UserInterface};

/// Render one precondition line, with its remediation when missing.
pub fn show_precondition(ui: &mut dyn UserInterface, pre: &Precondition) {
    let kind = StatusKind::of(pre);
    let mode = ui.output_mode();

    if kind == StatusKind::Satisfied && !mode.shows_satisfied() {
        return;
    }

    let mut line = pre.name.clone();
    if let (StatusKind::Optional, Some(needed)) = (kind, pre.required_for.mode()) {
        line.push_str(&format!(" (only required for {})", needed));
    }
    let show_detail = kind != StatusKind::Satisfied || mode.shows_details();
    if let Some(detail) = pre.detail.as_deref().filter(|_| show_detail) {
        line.push_str(&format!(": {}", detail));
    }
    ui.status_line(kind, &line);

    if pre.is_missing() {
        ui.show_hint(&pre.remediation);
    }
}

/// Render the whole report grouped by category.
pub fn show_report(ui: &mut dyn UserInterface, report: &ReadinessReport) {
    let mode = report
        .mode
        .map(|m| m.to_string())
        .unwrap_or_else(|| "undetermined".to_string());
    ui.show_header(&format!("Search service readiness (mode: {})", mode));

    match &report.config_path {
        Some(path) => ui.message(&format!("Config: {}", path.display())),
        None => ui.message("Config: none"),
    }

    for category in Category::ALL {
        let mut entries = report.in_category(category).peekable();
        if entries.peek().is_none() {
            continue;
        }
        ui.message("");
        ui.message(&format!("{}:", category.heading()));
        for pre in entries {
            show_precondition(ui, pre);
        }
    }

    if report.has_config_issues() {
        ui.message("");
        ui.message("Configuration issues:");
        for issue in &report.config_issues {
            ui.warning(&issue.to_string());
        }
    }

    let plan = report.remediation_plan();
    if !plan.is_empty() {
        ui.message("");
        ui.message("Remediation plan:");
        for (i, pre) in plan.iter().enumerate() {
            ui.message(&format!("  {}. [{}] {}", i + 1, pre.name, pre.remediation));
        }
    }

    ui.message("");
    show_verdict(ui, report);
}

/// Render the one-line verdict.
pub fn show_verdict(ui: &mut dyn UserInterface, report: &ReadinessReport) {
    match report.outcome() {
        Outcome::Ready => ui.success("Ready to launch the search service"),
        Outcome::ConfigIssues => ui.warning(&format!(
            "Dependencies present, but the configuration has {} issue(s)",
            report.config_issues.len()
        )),
        Outcome::MissingDependencies => {
            let blocking = report.blocking().count();
            ui.error(&format!(
                "Not ready: {} mandatory precondition{} missing",
                blocking,
                if blocking == 1 { "" } else { "s" }
            ));
        }
    }
}

/// Render a launch plan as an env block followed by the command.
pub fn show_launch_plan(ui: &mut dyn UserInterface, plan: &LaunchPlan) {
    ui.show_header(&format!("Launch plan ({} on {}:{})", plan.mode, plan.host, plan.port));
    ui.message("Environment:");
    for assignment in &plan.env {
        ui.message(&format!("  {}", assignment));
    }
    ui.message("");
    ui.message("Command:");
    ui.message(&format!("  {}", plan.command_line()));
}

/// Exit code for a report outcome.
pub fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Ready => 0,
        Outcome::MissingDependencies => 1,
        Outcome::ConfigIssues => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigIssue, Mode};
    use crate::requirements::RequiredFor;
    use crate::ui::{MockUI, OutputMode};

    fn report(mode: Option<Mode>, issues: Vec<ConfigIssue>) -> ReadinessReport {
        ReadinessReport::new(
            mode,
            None,
            vec![
                Precondition::satisfied("duckdb", Category::Package, RequiredFor::All, "pip install duckdb")
                    .with_detail("/env/site-packages/duckdb"),
                Precondition::missing("torch", Category::Package, RequiredFor::Dense, "pip install torch"),
                Precondition::missing("java-runtime", Category::Runtime, RequiredFor::All, "install jdk 21")
                    .with_detail("`java` not found on PATH"),
                Precondition::unknown("corpus-parquet", Category::Data, RequiredFor::All, "set corpus")
                    .with_detail("no configuration file provided"),
            ],
            issues,
        )
    }

    #[test]
    fn shows_every_category_present() {
        let mut ui = MockUI::new();
        show_report(&mut ui, &report(Some(Mode::Bm25), Vec::new()));
        assert!(ui.has_message("Packages:"));
        assert!(ui.has_message("Runtime:"));
        assert!(ui.has_message("Data:"));
        assert!(!ui.has_message("Assets:"));
        assert_eq!(ui.headers(), &["Search service readiness (mode: bm25)"]);
    }

    #[test]
    fn classifies_lines_by_mode() {
        let mut ui = MockUI::new();
        show_report(&mut ui, &report(Some(Mode::Bm25), Vec::new()));
        assert_eq!(ui.status_of("duckdb"), Some(StatusKind::Satisfied));
        assert_eq!(ui.status_of("torch"), Some(StatusKind::Optional));
        assert_eq!(ui.status_of("java-runtime"), Some(StatusKind::Blocking));
        assert_eq!(ui.status_of("corpus-parquet"), Some(StatusKind::Unknown));
    }

    #[test]
    fn missing_preconditions_get_hints_and_plan() {
        let mut ui = MockUI::new();
        show_report(&mut ui, &report(Some(Mode::Dense), Vec::new()));
        assert!(ui.has_hint("pip install torch"));
        assert!(ui.has_hint("install jdk 21"));
        assert!(ui.has_message("Remediation plan:"));
        assert!(ui.has_message("1. [torch] pip install torch"));
        assert!(ui.has_error("2 mandatory preconditions missing"));
    }

    #[test]
    fn satisfied_detail_only_in_verbose() {
        let mut ui = MockUI::new();
        show_report(&mut ui, &report(None, Vec::new()));
        let duckdb = &ui.status_lines().iter().find(|(_, l)| l.starts_with("duckdb")).unwrap().1;
        assert_eq!(duckdb, "duckdb");

        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        show_report(&mut ui, &report(None, Vec::new()));
        assert!(ui
            .status_lines()
            .iter()
            .any(|(_, l)| l == "duckdb: /env/site-packages/duckdb"));
    }

    #[test]
    fn quiet_hides_satisfied() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        show_report(&mut ui, &report(None, Vec::new()));
        assert_eq!(ui.status_of("duckdb"), None);
        assert_eq!(ui.status_of("java-runtime"), Some(StatusKind::Blocking));
    }

    #[test]
    fn config_issues_are_warnings() {
        let ready = ReadinessReport::new(
            None,
            None,
            Vec::new(),
            vec![ConfigIssue::new("engine.type", "engine.type is required")],
        );
        let mut ui = MockUI::new();
        show_report(&mut ui, &ready);
        assert!(ui.has_warning("engine.type: engine.type is required"));
        assert!(ui.has_warning("1 issue(s)"));
        assert_eq!(exit_code(ready.outcome()), 2);
    }

    #[test]
    fn exit_codes_follow_outcome() {
        assert_eq!(exit_code(Outcome::Ready), 0);
        assert_eq!(exit_code(Outcome::MissingDependencies), 1);
        assert_eq!(exit_code(Outcome::ConfigIssues), 2);
    }
}
