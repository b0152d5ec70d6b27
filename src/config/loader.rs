//! Configuration file discovery and loading.
//!
//! This module decides which configuration file a command consults and
//! reads it. Parse failures are not errors here: they come back as
//! [`LoadedConfig::Malformed`] so the checker can keep going. Read failures
//! are fatal only for a file the caller named.

use crate::config::schema::ServiceConfig;
use crate::error::{ReadinessError, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "SEARCH_CONFIG";

/// File name looked up in the project root when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "search_config.yaml";

/// Where a configuration path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `--config` flag.
    Flag,
    /// `SEARCH_CONFIG` environment variable.
    Environment,
    /// Default file found in the project root.
    Discovered,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Flag => f.write_str("--config"),
            ConfigSource::Environment => f.write_str(CONFIG_ENV_VAR),
            ConfigSource::Discovered => f.write_str("project default"),
        }
    }
}

/// A resolved configuration path and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    pub source: ConfigSource,
}

impl ConfigLocation {
    /// Whether the caller asked for this file explicitly.
    pub fn is_explicit(&self) -> bool {
        !matches!(self.source, ConfigSource::Discovered)
    }
}

/// Resolve the configuration path.
///
/// Precedence: flag, then environment value, then
/// `<project_root>/search_config.yaml` if that file exists. Relative paths
/// are resolved against the project root.
pub fn resolve_config_path(
    flag: Option<&Path>,
    env_value: Option<&str>,
    project_root: &Path,
) -> Option<ConfigLocation> {
    if let Some(path) = flag {
        return Some(ConfigLocation {
            path: resolve_relative(project_root, path),
            source: ConfigSource::Flag,
        });
    }

    if let Some(value) = env_value.map(str::trim).filter(|v| !v.is_empty()) {
        return Some(ConfigLocation {
            path: resolve_relative(project_root, Path::new(value)),
            source: ConfigSource::Environment,
        });
    }

    let default = project_root.join(DEFAULT_CONFIG_FILE);
    if default.is_file() {
        Some(ConfigLocation {
            path: default,
            source: ConfigSource::Discovered,
        })
    } else {
        None
    }
}

/// Join `path` onto `root` unless it is already absolute.
pub fn resolve_relative(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Outcome of consulting a configuration file.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedConfig {
    /// The YAML parsed into a [`ServiceConfig`].
    Parsed(ServiceConfig),
    /// The YAML could not be parsed.
    Malformed { message: String },
    /// A discovered file could not be read.
    Unreadable { message: String },
}

impl LoadedConfig {
    /// The parsed configuration, if any.
    pub fn parsed(&self) -> Option<&ServiceConfig> {
        match self {
            LoadedConfig::Parsed(config) => Some(config),
            LoadedConfig::Malformed { .. } | LoadedConfig::Unreadable { .. } => None,
        }
    }
}

/// Read and parse a configuration file.
///
/// # Errors
///
/// Returns `ConfigUnreadable` if the file cannot be read. Parse errors are
/// reported through [`LoadedConfig::Malformed`].
pub fn load_config_file(path: &Path) -> Result<LoadedConfig> {
    let content = fs::read_to_string(path).map_err(|source| ReadinessError::ConfigUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_config(&content))
}

/// Read the file at `location`.
///
/// # Errors
///
/// Returns `ConfigUnreadable` only for explicitly requested files. A
/// discovered default that cannot be read comes back as
/// [`LoadedConfig::Unreadable`].
pub fn load_config_at(location: &ConfigLocation) -> Result<LoadedConfig> {
    match load_config_file(&location.path) {
        Err(ReadinessError::ConfigUnreadable { path, source }) if !location.is_explicit() => {
            tracing::warn!("Cannot read {}: {}", path.display(), source);
            Ok(LoadedConfig::Unreadable {
                message: format!("cannot read {}: {}", path.display(), source),
            })
        }
        other => other,
    }
}

/// Parse YAML content into a [`LoadedConfig`].
pub fn parse_config(content: &str) -> LoadedConfig {
    if content.trim().is_empty() {
        return LoadedConfig::Malformed {
            message: "configuration file is empty".to_string(),
        };
    }

    match serde_yaml::from_str::<ServiceConfig>(content) {
        Ok(config) => LoadedConfig::Parsed(config),
        Err(e) => LoadedConfig::Malformed {
            message: e.to_string(),
        },
    }
}

/// Load a configuration that a command cannot work without.
///
/// # Errors
///
/// Returns `ConfigUnreadable` if the file cannot be read and
/// `ConfigInvalid` if it does not parse.
pub fn load_required_config(path: &Path) -> Result<ServiceConfig> {
    match load_config_file(path)? {
        LoadedConfig::Parsed(config) => Ok(config),
        LoadedConfig::Malformed { message } | LoadedConfig::Unreadable { message } => {
            Err(ReadinessError::ConfigInvalid {
                path: path.to_path_buf(),
                message,
            })
        }
    }
}
