//! Configuration validation.
//!
//! Validation never rejects a file outright. It produces [`ConfigIssue`]s
//! that the readiness checker attaches to its report, and per-key accessors
//! the checker uses to decide whether a data check can run at all.

use super::loader::resolve_relative;
use super::schema::{Mode, ServiceConfig, DEFAULT_LUCENE_DIR};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A problem found in the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ConfigIssue {
    /// Dotted key path the issue refers to (e.g. `engine.bm25.index_dir`),
    /// or `<file>` for problems with the document as a whole.
    pub key: String,
    /// Human-readable description.
    pub message: String,
}

impl ConfigIssue {
    pub fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }

    fn missing(key: &str) -> Self {
        Self::new(key, format!("{} is required", key))
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.message)
    }
}

impl ServiceConfig {
    /// The engine type declared by `engine.type`.
    pub fn engine_mode(&self) -> Result<Mode, ConfigIssue> {
        let raw = self
            .engine
            .as_ref()
            .and_then(|e| e.engine_type.as_deref())
            .ok_or_else(|| ConfigIssue::missing("engine.type"))?;
        raw.parse::<Mode>()
            .map_err(|message| ConfigIssue::new("engine.type", message))
    }

    /// The corpus glob declared by `corpus.parquet_path`.
    pub fn parquet_pattern(&self) -> Result<&str, ConfigIssue> {
        self.corpus
            .as_ref()
            .and_then(|c| c.parquet_path.as_deref())
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| ConfigIssue::missing("corpus.parquet_path"))
    }

    /// The Lucene index directory declared by `engine.bm25.index_dir`.
    pub fn bm25_index_dir(&self) -> Result<&Path, ConfigIssue> {
        self.engine
            .as_ref()
            .and_then(|e| e.bm25.as_ref())
            .and_then(|b| b.index_dir.as_deref())
            .ok_or_else(|| ConfigIssue::missing("engine.bm25.index_dir"))
    }

    /// Directory the Lucene JARs live in: `lucene.extra_dir`, or
    /// `<project_root>/tevatron`.
    pub fn lucene_dir(&self, project_root: &Path) -> PathBuf {
        match self.lucene.extra_dir.as_deref() {
            Some(dir) => resolve_relative(project_root, dir),
            None => project_root.join(DEFAULT_LUCENE_DIR),
        }
    }

    /// The FAISS index declared by `engine.dense.index_path`.
    pub fn dense_index_path(&self) -> Result<&Path, ConfigIssue> {
        self.engine
            .as_ref()
            .and_then(|e| e.dense.as_ref())
            .and_then(|d| d.index_path.as_deref())
            .ok_or_else(|| ConfigIssue::missing("engine.dense.index_path"))
    }
}

/// Collect every issue in a parsed configuration.
///
/// Mode-specific keys are only required for the engine the file selects.
pub fn validate(config: &ServiceConfig) -> Vec<ConfigIssue> {
    validate_for(config, None)
}

/// Collect every issue, requiring the keys of `requested` when given.
///
/// A requested mode takes the place of `engine.type` when deciding which
/// engine section must be complete. An unusable `engine.type` is still
/// reported.
pub fn validate_for(config: &ServiceConfig, requested: Option<Mode>) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    if let Err(issue) = config.parquet_pattern() {
        issues.push(issue);
    }

    let declared = config.engine_mode();
    if let Err(issue) = &declared {
        issues.push(issue.clone());
    }

    match requested.or(declared.ok()) {
        Some(Mode::Bm25) => {
            if let Err(issue) = config.bm25_index_dir() {
                issues.push(issue);
            }
        }
        Some(Mode::Dense) => {
            if let Err(issue) = config.dense_index_path() {
                issues.push(issue);
            }
            let has_model = config
                .engine
                .as_ref()
                .and_then(|e| e.dense.as_ref())
                .and_then(|d| d.model_name.as_deref())
                .is_some();
            if !has_model {
                issues.push(ConfigIssue::missing("engine.dense.model_name"));
            }
        }
        None => {}
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ServiceConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn complete_bm25_config_has_no_issues() {
        let config = parse(
            r#"
corpus:
  parquet_path: corpus/*.parquet
engine:
  type: bm25
  bm25:
    index_dir: idx
"#,
        );
        assert!(validate(&config).is_empty());
    }

    #[test]
    fn empty_config_reports_corpus_and_engine() {
        let issues = validate(&ServiceConfig::default());
        let keys: Vec<_> = issues.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(keys, vec!["corpus.parquet_path", "engine.type"]);
    }

    #[test]
    fn unknown_engine_type_is_reported() {
        let config = parse(
            r#"
corpus:
  parquet_path: a.parquet
engine:
  type: splade
"#,
        );
        let issues = validate(&config);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].key, "engine.type");
        assert!(issues[0].message.contains("splade"));
    }

    #[test]
    fn bm25_without_index_dir_is_reported() {
        let config = parse(
            r#"
corpus:
  parquet_path: a.parquet
engine:
  type: BM25
"#,
        );
        let issues = validate(&config);
        assert_eq!(issues, vec![ConfigIssue::missing("engine.bm25.index_dir")]);
    }

    #[test]
    fn dense_requires_index_and_model() {
        let config = parse(
            r#"
corpus:
  parquet_path: a.parquet
engine:
  type: dense
  dense: {}
"#,
        );
        let keys: Vec<_> = validate(&config).into_iter().map(|i| i.key).collect();
        assert_eq!(
            keys,
            vec!["engine.dense.index_path", "engine.dense.model_name"]
        );
    }

    #[test]
    fn blank_parquet_path_counts_as_missing() {
        let config = parse(
            r#"
corpus:
  parquet_path: "  "
"#,
        );
        assert!(config.parquet_pattern().is_err());
    }

    #[test]
    fn issue_display_includes_key() {
        let issue = ConfigIssue::new("engine.type", "engine.type is required");
        assert_eq!(issue.to_string(), "engine.type: engine.type is required");
    }

    #[test]
    fn lucene_dir_defaults_under_project_root() {
        let root = Path::new("/srv/search");
        let config = parse("corpus:\n  parquet_path: x\n");
        assert_eq!(config.lucene_dir(root), root.join("tevatron"));

        let config = parse("lucene:\n  extra_dir: jars\n");
        assert_eq!(config.lucene_dir(root), root.join("jars"));
    }

    #[test]
    fn requested_mode_requires_its_own_section() {
        let config = parse(
            r#"
corpus:
  parquet_path: a.parquet
engine:
  type: dense
  dense:
    index_path: idx.faiss
    model_name: bge
"#,
        );
        assert!(validate(&config).is_empty());
        assert_eq!(
            validate_for(&config, Some(Mode::Bm25)),
            vec![ConfigIssue::missing("engine.bm25.index_dir")]
        );
    }

    #[test]
    fn requested_mode_does_not_hide_bad_engine_type() {
        let config = parse(
            r#"
corpus:
  parquet_path: a.parquet
engine:
  bm25:
    index_dir: idx
"#,
        );
        let keys: Vec<_> = validate_for(&config, Some(Mode::Bm25))
            .into_iter()
            .map(|i| i.key)
            .collect();
        assert_eq!(keys, vec!["engine.type"]);
    }
}
