//! Launch plan rendering.

use super::bind::BindAddress;
use crate::config::{
    resolve_relative, validate, ConfigIssue, Mode, ServiceConfig, DEFAULT_MAX_SNIPPET_LEN,
};
use crate::error::{ReadinessError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// ASGI server executable.
pub const SERVER_PROGRAM: &str = "uvicorn";

/// ASGI application the server loads.
pub const APP_TARGET: &str = "scripts.search_webui:app";

/// Device used when the configuration lists none.
const DEFAULT_DEVICE: &str = "0";

/// One environment variable the service reads at start-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvAssignment {
    pub name: String,
    pub value: String,
}

impl EnvAssignment {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

impl fmt::Display for EnvAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, shell_quote(&self.value))
    }
}

/// How the search service would be started. Never executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchPlan {
    pub mode: Mode,
    pub host: String,
    pub port: u16,
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<EnvAssignment>,
}

impl LaunchPlan {
    /// Build the plan for a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` listing every issue when a key the service
    /// needs is absent or `engine.type` is not recognized.
    pub fn build(
        config: &ServiceConfig,
        config_path: &Path,
        project_root: &Path,
        bind: BindAddress,
    ) -> Result<Self> {
        let issues = validate(config);
        if !issues.is_empty() {
            return Err(invalid(config_path, &issues));
        }
        let reject = |issue: ConfigIssue| invalid(config_path, &[issue]);

        let mode = config.engine_mode().map_err(reject)?;
        let snippet_len = config
            .service
            .max_snippet_len
            .unwrap_or(DEFAULT_MAX_SNIPPET_LEN);

        let located = |path: &Path| resolve_relative(project_root, path).display().to_string();
        let corpus = Path::new(config.parquet_pattern().map_err(reject)?);

        let mut env = vec![
            EnvAssignment::new("SEARCH_CONFIG", config_path.display().to_string()),
            EnvAssignment::new("SEARCHER_TYPE", mode.as_str()),
            EnvAssignment::new("CORPUS_PARQUET_PATH", located(corpus)),
            EnvAssignment::new("MAX_SNIPPET_LEN", snippet_len.to_string()),
            EnvAssignment::new(
                "LUCENE_EXTRA_DIR",
                config.lucene_dir(project_root).display().to_string(),
            ),
        ];

        match mode {
            Mode::Bm25 => {
                let index_dir = config.bm25_index_dir().map_err(reject)?;
                env.push(EnvAssignment::new("LUCENE_INDEX_DIR", located(index_dir)));
            }
            Mode::Dense => {
                let index_path = config.dense_index_path().map_err(reject)?;
                let dense = config.engine.as_ref().and_then(|e| e.dense.as_ref());
                let model = dense
                    .and_then(|d| d.model_name.clone())
                    .unwrap_or_default();
                let gpu_ids = dense
                    .filter(|d| !d.gpu_ids.is_empty())
                    .map(|d| {
                        d.gpu_ids
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(",")
                    })
                    .unwrap_or_else(|| DEFAULT_DEVICE.to_string());
                let visible = dense
                    .and_then(|d| d.cuda_visible_devices.as_ref())
                    .map(ToString::to_string)
                    .unwrap_or_else(|| DEFAULT_DEVICE.to_string());

                env.push(EnvAssignment::new("DENSE_INDEX_PATH", located(index_path)));
                env.push(EnvAssignment::new("DENSE_MODEL_NAME", model));
                env.push(EnvAssignment::new("GPU_IDS", gpu_ids));
                env.push(EnvAssignment::new("CUDA_VISIBLE_DEVICES", visible));
            }
        }

        tracing::debug!(mode = %mode, host = %bind.host, port = bind.port, "Built launch plan");

        Ok(Self {
            mode,
            args: vec![
                APP_TARGET.to_string(),
                "--host".to_string(),
                bind.host.clone(),
                "--port".to_string(),
                bind.port.to_string(),
            ],
            host: bind.host,
            port: bind.port,
            program: SERVER_PROGRAM.to_string(),
            env,
        })
    }

    /// The server command line, shell-quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(shell_quote)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Look up an environment value by name.
    pub fn env_value(&self, name: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }
}

fn invalid(path: &Path, issues: &[ConfigIssue]) -> ReadinessError {
    ReadinessError::ConfigInvalid {
        path: path.to_path_buf(),
        message: issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    }
}

/// Single-quote a value for POSIX shells when it needs it.
fn shell_quote(value: &str) -> String {
    let plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:,=@+".contains(c));
    if plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}
