//! Error types for searchready operations.
//!
//! This module defines [`ReadinessError`], the error type returned by the
//! checker and the CLI commands, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! Missing dependencies are not errors: they are reported as `missing`
//! preconditions inside a [`ReadinessReport`](crate::requirements::ReadinessReport).
//! Malformed configuration is folded into the report as well. Only conditions
//! that make the run itself meaningless surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for searchready operations.
#[derive(Debug, Error)]
pub enum ReadinessError {
    /// A configuration file was explicitly requested but could not be read.
    #[error("Cannot read configuration at {path}: {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is present but unusable for the requested operation.
    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    /// An operation needed a configuration file but none was found.
    #[error("No configuration found (pass --config or set SEARCH_CONFIG)")]
    ConfigMissing,

    /// A value supplied on the command line or environment is not usable.
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Failure writing command output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for searchready operations.
pub type Result<T> = std::result::Result<T, ReadinessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_unreadable_displays_path_and_cause() {
        let err = ReadinessError::ConfigUnreadable {
            path: PathBuf::from("/etc/search_config.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/etc/search_config.yaml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn config_invalid_displays_message() {
        let err = ReadinessError::ConfigInvalid {
            path: PathBuf::from("search_config.yaml"),
            message: "engine.type is required".into(),
        };
        assert!(err.to_string().contains("engine.type is required"));
    }

    #[test]
    fn config_missing_mentions_env_var() {
        assert!(ReadinessError::ConfigMissing
            .to_string()
            .contains("SEARCH_CONFIG"));
    }

    #[test]
    fn invalid_value_displays_field() {
        let err = ReadinessError::InvalidValue {
            field: "SEARCH_PORT".into(),
            message: "not a number".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SEARCH_PORT"));
        assert!(msg.contains("not a number"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ReadinessError = io_err.into();
        assert!(matches!(err, ReadinessError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(ReadinessError::ConfigMissing)
        }
        assert!(returns_error().is_err());
    }
}
