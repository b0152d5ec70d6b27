//! Readiness checker.
//!
//! The `ReadinessChecker` evaluates the whole precondition catalogue against
//! a [`RuntimeDescription`] and an optional configuration file. Every check
//! runs on every call; failures are collected, never short-circuited.

use crate::config::{
    load_config_file, resolve_relative, validate_for, ConfigIssue, LoadedConfig, Mode,
    ServiceConfig, DEFAULT_LUCENE_DIR,
};
use crate::error::Result;
use crate::requirements::inspect::{
    query_java_version, resolve_package, resolve_tool_path, RuntimeDescription, VersionCheck,
};
use crate::requirements::registry::{AssetSpec, Catalog, PackageSpec};
use crate::requirements::report::ReadinessReport;
use crate::requirements::status::{Category, Precondition, RequiredFor};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Name of the corpus data precondition.
pub const CORPUS_PARQUET: &str = "corpus-parquet";
/// Name of the Lucene index data precondition.
pub const BM25_INDEX: &str = "bm25-index";
/// Name of the FAISS index data precondition.
pub const DENSE_INDEX: &str = "dense-index";

const CORPUS_REMEDIATION: &str =
    "Download the corpus parquet shards and point corpus.parquet_path at them";
const BM25_REMEDIATION: &str =
    "Build or download the Lucene index into engine.bm25.index_dir (python -m pyserini.index.lucene ...)";
const DENSE_REMEDIATION: &str =
    "Place the FAISS index at engine.dense.index_path (convert a pickled index with scripts/convert_index.py)";

/// Evaluates readiness of the search service environment.
#[derive(Debug, Clone)]
pub struct ReadinessChecker {
    runtime: RuntimeDescription,
    catalog: Catalog,
}

impl ReadinessChecker {
    /// Create a checker for the built-in catalogue.
    pub fn new(runtime: RuntimeDescription) -> Self {
        Self::with_catalog(runtime, Catalog::builtin())
    }

    /// Create a checker for a custom catalogue.
    pub fn with_catalog(runtime: RuntimeDescription, catalog: Catalog) -> Self {
        Self { runtime, catalog }
    }

    pub fn runtime(&self) -> &RuntimeDescription {
        &self.runtime
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Run every check and assemble a report.
    ///
    /// `config_path` of `None` means no configuration: data checks are
    /// reported `unknown`. `mode_override` takes precedence over the
    /// configuration's `engine.type`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigUnreadable` when `config_path` is given but the file
    /// cannot be read. Everything else is reported inside the report.
    pub fn check(
        &self,
        config_path: Option<&Path>,
        mode_override: Option<Mode>,
    ) -> Result<ReadinessReport> {
        let loaded = config_path.map(load_config_file).transpose()?;
        Ok(self.check_loaded(config_path, loaded, mode_override))
    }

    /// Run every check against a configuration that was already consulted.
    ///
    /// Unparsable and unreadable files become a `<file>` issue with every
    /// data check `unknown`. Keys missing for the effective mode are
    /// recorded as issues even when the mode comes from `mode_override`.
    pub fn check_loaded(
        &self,
        config_path: Option<&Path>,
        loaded: Option<LoadedConfig>,
        mode_override: Option<Mode>,
    ) -> ReadinessReport {
        let config = loaded.as_ref().and_then(LoadedConfig::parsed);

        let mut issues = match &loaded {
            None => Vec::new(),
            Some(LoadedConfig::Malformed { message } | LoadedConfig::Unreadable { message }) => {
                vec![ConfigIssue::new("<file>", message.clone())]
            }
            Some(LoadedConfig::Parsed(config)) => validate_for(config, mode_override),
        };

        let mode = mode_override.or_else(|| config.and_then(|c| c.engine_mode().ok()));
        tracing::debug!(
            mode = mode.map(Mode::as_str).unwrap_or("undetermined"),
            config = ?config_path,
            "Starting readiness check"
        );

        let mut preconditions = self.check_packages();
        preconditions.push(self.check_runtime());
        preconditions.push(self.check_assets(config));
        preconditions.extend(self.check_data(loaded.as_ref(), mode, &mut issues));

        let report = ReadinessReport::new(
            mode,
            config_path.map(Path::to_path_buf),
            preconditions,
            issues,
        );
        tracing::info!(
            ready = report.ready,
            missing = report.missing().count(),
            blocking = report.blocking().count(),
            "Readiness check complete"
        );
        report
    }

    /// Evaluate every package in the catalogue.
    pub fn check_packages(&self) -> Vec<Precondition> {
        self.catalog
            .packages
            .iter()
            .map(|spec| self.check_package(spec))
            .collect()
    }

    fn check_package(&self, spec: &PackageSpec) -> Precondition {
        if self.runtime.site_packages.is_empty() {
            return Precondition::unknown(
                &spec.name,
                Category::Package,
                spec.required_for,
                &spec.remediation,
            )
            .with_detail(
                "no Python environment described (pass --python-env or activate a conda env / virtualenv)",
            );
        }

        match resolve_package(
            &self.runtime.site_packages,
            &spec.import_name,
            &spec.distributions,
        ) {
            Some(found) => {
                tracing::debug!("Package {} resolved at {}", spec.name, found.display());
                Precondition::satisfied(
                    &spec.name,
                    Category::Package,
                    spec.required_for,
                    &spec.remediation,
                )
                .with_detail(found.display().to_string())
            }
            None => {
                tracing::debug!("Package {} not found", spec.name);
                Precondition::missing(
                    &spec.name,
                    Category::Package,
                    spec.required_for,
                    &spec.remediation,
                )
                .with_detail(format!("cannot import '{}'", spec.import_name))
            }
        }
    }

    /// Evaluate the managed runtime.
    pub fn check_runtime(&self) -> Precondition {
        let spec = &self.catalog.runtime;
        let search_path = self.runtime.java_search_path();
        let unknown = || {
            Precondition::unknown(
                &spec.name,
                Category::Runtime,
                RequiredFor::All,
                &spec.remediation,
            )
        };
        let missing = || {
            Precondition::missing(
                &spec.name,
                Category::Runtime,
                RequiredFor::All,
                &spec.remediation,
            )
        };

        if search_path.is_empty() {
            return unknown().with_detail("no search path or JAVA_HOME to search");
        }

        let Some(binary) = resolve_tool_path(
            &spec.binary,
            &search_path,
            &self.runtime.path_extensions,
        ) else {
            return missing().with_detail(format!("`{}` not found on PATH", spec.binary));
        };

        let satisfied = || {
            Precondition::satisfied(
                &spec.name,
                Category::Runtime,
                RequiredFor::All,
                &spec.remediation,
            )
        };

        let reason = match query_java_version(&binary, self.runtime.version_timeout) {
            VersionCheck::Version(major) if major >= spec.min_major => {
                return satisfied()
                    .with_detail(format!("Java {} at {}", major, binary.display()));
            }
            VersionCheck::Version(major) => {
                return missing().with_detail(format!(
                    "found Java {} at {}, {} or newer required",
                    major,
                    binary.display(),
                    spec.min_major
                ));
            }
            VersionCheck::TimedOut => "version check timed out".to_string(),
            VersionCheck::Unrecognized(line) => format!("unrecognized output '{}'", line),
            VersionCheck::Failed(e) => e,
        };

        // Present but unverifiable: don't block on it.
        tracing::warn!("Could not determine Java version: {}", reason);
        satisfied().with_detail(format!(
            "{} (version unverified: {})",
            binary.display(),
            reason
        ))
    }

    /// Directory the Lucene JARs are expected in.
    pub fn lucene_dir(&self, config: Option<&ServiceConfig>) -> PathBuf {
        let root = &self.runtime.project_root;
        match config {
            Some(config) => config.lucene_dir(root),
            None => root.join(DEFAULT_LUCENE_DIR),
        }
    }

    /// Evaluate the bundled assets.
    pub fn check_assets(&self, config: Option<&ServiceConfig>) -> Precondition {
        let spec = &self.catalog.assets;
        let dir = self.lucene_dir(config);

        let found = match fs::read_dir(&dir) {
            Ok(entries) => count_matching_assets(entries, spec),
            Err(e) if e.kind() == ErrorKind::NotFound => 0,
            Err(e) => {
                return Precondition::unknown(
                    &spec.name,
                    Category::Asset,
                    RequiredFor::All,
                    &spec.remediation,
                )
                .with_detail(format!("cannot list {}: {}", dir.display(), e));
            }
        };

        let detail = format!(
            "{} found, {} required in {}",
            found,
            spec.required,
            dir.display()
        );
        if found >= spec.required {
            Precondition::satisfied(&spec.name, Category::Asset, RequiredFor::All, &spec.remediation)
                .with_detail(detail)
        } else {
            Precondition::missing(&spec.name, Category::Asset, RequiredFor::All, &spec.remediation)
                .with_detail(detail)
        }
    }

    fn check_data(
        &self,
        loaded: Option<&LoadedConfig>,
        mode: Option<Mode>,
        issues: &mut Vec<ConfigIssue>,
    ) -> Vec<Precondition> {
        let config = match loaded {
            None => return data_unknown("no configuration file provided"),
            Some(LoadedConfig::Malformed { .. }) => {
                return data_unknown("configuration could not be parsed")
            }
            Some(LoadedConfig::Unreadable { .. }) => {
                return data_unknown("configuration could not be read")
            }
            Some(LoadedConfig::Parsed(config)) => config,
        };

        vec![
            self.check_corpus(config, issues),
            self.check_bm25_index(config, mode),
            self.check_dense_index(config, mode),
        ]
    }

    fn check_corpus(&self, config: &ServiceConfig, issues: &mut Vec<ConfigIssue>) -> Precondition {
        let unknown = || {
            Precondition::unknown(
                CORPUS_PARQUET,
                Category::Data,
                RequiredFor::All,
                CORPUS_REMEDIATION,
            )
        };

        let pattern = match config.parquet_pattern() {
            Ok(pattern) => pattern,
            Err(issue) => return unknown().with_detail(issue.to_string()),
        };

        let full_pattern = if Path::new(pattern).is_absolute() {
            pattern.to_string()
        } else {
            let root = glob::Pattern::escape(&self.runtime.project_root.to_string_lossy());
            format!("{}/{}", root.trim_end_matches('/'), pattern)
        };

        let matches = match glob::glob(&full_pattern) {
            Ok(paths) => paths.filter_map(|p| p.ok()).filter(|p| p.is_file()).count(),
            Err(e) => {
                let issue = ConfigIssue::new("corpus.parquet_path", format!("invalid glob: {}", e));
                let detail = issue.to_string();
                issues.push(issue);
                return unknown().with_detail(detail);
            }
        };

        if matches == 0 {
            Precondition::missing(CORPUS_PARQUET, Category::Data, RequiredFor::All, CORPUS_REMEDIATION)
                .with_detail(format!("no files match {}", pattern))
        } else {
            Precondition::satisfied(CORPUS_PARQUET, Category::Data, RequiredFor::All, CORPUS_REMEDIATION)
                .with_detail(format!("{} files match {}", matches, pattern))
        }
    }

    fn check_bm25_index(&self, config: &ServiceConfig, mode: Option<Mode>) -> Precondition {
        let required_for = RequiredFor::only(Mode::Bm25);
        let unknown =
            || Precondition::unknown(BM25_INDEX, Category::Data, required_for, BM25_REMEDIATION);

        if let Some(reason) = not_applicable(config, mode, Mode::Bm25) {
            return unknown().with_detail(reason);
        }

        let dir = match config.bm25_index_dir() {
            Ok(dir) => resolve_relative(&self.runtime.project_root, dir),
            Err(issue) => return unknown().with_detail(issue.to_string()),
        };

        let missing =
            || Precondition::missing(BM25_INDEX, Category::Data, required_for, BM25_REMEDIATION);

        match fs::read_dir(&dir) {
            Ok(mut entries) => {
                if entries.next().is_some() {
                    Precondition::satisfied(BM25_INDEX, Category::Data, required_for, BM25_REMEDIATION)
                        .with_detail(dir.display().to_string())
                } else {
                    missing().with_detail(format!("{} exists but is empty", dir.display()))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                missing().with_detail(format!("{} does not exist", dir.display()))
            }
            Err(_) if dir.is_file() => {
                missing().with_detail(format!("{} is not a directory", dir.display()))
            }
            Err(e) => unknown().with_detail(format!("cannot list {}: {}", dir.display(), e)),
        }
    }

    fn check_dense_index(&self, config: &ServiceConfig, mode: Option<Mode>) -> Precondition {
        let required_for = RequiredFor::only(Mode::Dense);
        let unknown =
            || Precondition::unknown(DENSE_INDEX, Category::Data, required_for, DENSE_REMEDIATION);

        if let Some(reason) = not_applicable(config, mode, Mode::Dense) {
            return unknown().with_detail(reason);
        }

        let path = match config.dense_index_path() {
            Ok(path) => resolve_relative(&self.runtime.project_root, path),
            Err(issue) => return unknown().with_detail(issue.to_string()),
        };

        if path.exists() {
            Precondition::satisfied(DENSE_INDEX, Category::Data, required_for, DENSE_REMEDIATION)
                .with_detail(path.display().to_string())
        } else {
            Precondition::missing(DENSE_INDEX, Category::Data, required_for, DENSE_REMEDIATION)
                .with_detail(format!("{} does not exist", path.display()))
        }
    }
}

fn count_matching_assets(entries: fs::ReadDir, spec: &AssetSpec) -> usize {
    entries
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .filter(|e| spec.matches(&e.file_name().to_string_lossy()))
        .count()
}

/// Why an index check for `index_mode` does not apply, if it does not.
///
/// An index is checked when it belongs to the effective mode or to the
/// engine the file declares.
fn not_applicable(config: &ServiceConfig, mode: Option<Mode>, index_mode: Mode) -> Option<String> {
    let declared = config.engine_mode();
    if mode == Some(index_mode) || declared == Ok(index_mode) {
        return None;
    }
    Some(match declared {
        Ok(other) => format!("not configured (engine.type is {})", other),
        Err(issue) => issue.to_string(),
    })
}

/// All data preconditions as `unknown` with the same reason.
fn data_unknown(reason: &str) -> Vec<Precondition> {
    vec![
        Precondition::unknown(CORPUS_PARQUET, Category::Data, RequiredFor::All, CORPUS_REMEDIATION)
            .with_detail(reason),
        Precondition::unknown(
            BM25_INDEX,
            Category::Data,
            RequiredFor::only(Mode::Bm25),
            BM25_REMEDIATION,
        )
        .with_detail(reason),
        Precondition::unknown(
            DENSE_INDEX,
            Category::Data,
            RequiredFor::only(Mode::Dense),
            DENSE_REMEDIATION,
        )
        .with_detail(reason),
    ]
}
