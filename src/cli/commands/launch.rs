//! Launch-plan command implementation.
//!
//! The `searchready launch-plan` command shows the `uvicorn` invocation and
//! environment the search service would start with. It never starts it.

use std::path::{Path, PathBuf};

use crate::cli::args::LaunchArgs;
use crate::config::{load_required_config, resolve_config_path, CONFIG_ENV_VAR};
use crate::error::{ReadinessError, Result};
use crate::launch::{BindOverrides, LaunchPlan};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::display;

/// The launch-plan command implementation.
pub struct LaunchCommand {
    project_root: PathBuf,
    args: LaunchArgs,
}

impl LaunchCommand {
    /// Create a new launch-plan command.
    pub fn new(project_root: &Path, args: LaunchArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Build the plan, reading overrides through `env_fn`.
    pub fn plan_with_env<F>(&self, env_fn: F) -> Result<LaunchPlan>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let env_config = env_fn(CONFIG_ENV_VAR).ok();
        let location = resolve_config_path(
            self.args.config.as_deref(),
            env_config.as_deref(),
            &self.project_root,
        )
        .ok_or(ReadinessError::ConfigMissing)?;

        let config = load_required_config(&location.path)?;
        let overrides = BindOverrides {
            cli_host: self.args.host.clone(),
            cli_port: self.args.port,
            ..Default::default()
        }
        .with_env(env_fn);
        let bind = overrides.resolve(&config.service)?;

        LaunchPlan::build(&config, &location.path, &self.project_root, bind)
    }

    /// Run the command with a custom environment lookup.
    pub fn run_with_env<F>(&self, ui: &mut dyn UserInterface, env_fn: F) -> Result<CommandResult>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let plan = self.plan_with_env(env_fn)?;

        if self.args.json {
            let output = serde_json::to_string_pretty(&plan)
                .map_err(|e| ReadinessError::Other(e.into()))?;
            ui.message(&output);
        } else {
            display::show_launch_plan(ui, &plan);
        }

        Ok(CommandResult::success())
    }
}

impl Command for LaunchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run_with_env(ui, |key: &str| std::env::var(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    const BM25: &str = r#"
service:
  host: 127.0.0.1
  port: 9000
corpus:
  parquet_path: data/*.parquet
engine:
  type: bm25
  bm25:
    index_dir: indexes/bm25
"#;

    fn no_env(_: &str) -> std::result::Result<String, std::env::VarError> {
        Err(std::env::VarError::NotPresent)
    }

    fn project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("search_config.yaml"), config).unwrap();
        temp
    }

    #[test]
    fn uses_config_bind_address() {
        let temp = project(BM25);
        let plan = LaunchCommand::new(temp.path(), LaunchArgs::default())
            .plan_with_env(no_env)
            .unwrap();
        assert_eq!(plan.host, "127.0.0.1");
        assert_eq!(plan.port, 9000);
    }

    #[test]
    fn env_overrides_config_and_flag_overrides_env() {
        let temp = project(BM25);
        let env = |key: &str| match key {
            "SEARCH_HOST" => Ok("10.1.1.1".to_string()),
            "SEARCH_PORT" => Ok("9100".to_string()),
            _ => Err(std::env::VarError::NotPresent),
        };

        let plan = LaunchCommand::new(temp.path(), LaunchArgs::default())
            .plan_with_env(env)
            .unwrap();
        assert_eq!(plan.host, "10.1.1.1");
        assert_eq!(plan.port, 9100);

        let args = LaunchArgs {
            port: Some(7000),
            ..Default::default()
        };
        let plan = LaunchCommand::new(temp.path(), args)
            .plan_with_env(env)
            .unwrap();
        assert_eq!(plan.host, "10.1.1.1");
        assert_eq!(plan.port, 7000);
    }

    #[test]
    fn requires_a_config() {
        let temp = TempDir::new().unwrap();
        let err = LaunchCommand::new(temp.path(), LaunchArgs::default())
            .plan_with_env(no_env)
            .unwrap_err();
        assert!(matches!(err, ReadinessError::ConfigMissing));
    }

    #[test]
    fn malformed_config_is_rejected() {
        let temp = project("engine: [");
        let err = LaunchCommand::new(temp.path(), LaunchArgs::default())
            .plan_with_env(no_env)
            .unwrap_err();
        assert!(matches!(err, ReadinessError::ConfigInvalid { .. }));
    }

    #[test]
    fn renders_env_and_command() {
        let temp = project(BM25);
        let mut ui = MockUI::new();
        let result = LaunchCommand::new(temp.path(), LaunchArgs::default())
            .run_with_env(&mut ui, no_env)
            .unwrap();
        assert!(result.success);
        assert!(ui.has_message("SEARCHER_TYPE=bm25"));
        assert!(ui.has_message(&format!(
            "LUCENE_INDEX_DIR={}",
            temp.path().join("indexes/bm25").display()
        )));
        assert!(ui.has_message("uvicorn scripts.search_webui:app --host 127.0.0.1 --port 9000"));
    }

    #[test]
    fn json_output_serializes_plan() {
        let temp = project(BM25);
        let args = LaunchArgs {
            json: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        LaunchCommand::new(temp.path(), args)
            .run_with_env(&mut ui, no_env)
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(json["mode"], "bm25");
        assert_eq!(json["port"], 9000);
        assert_eq!(json["program"], "uvicorn");
        assert_eq!(json["env"][1]["name"], "SEARCHER_TYPE");
    }
}
