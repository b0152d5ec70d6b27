//! Bind address resolution.

use crate::config::{ServiceSettings, DEFAULT_HOST, DEFAULT_PORT};
use crate::error::{ReadinessError, Result};
use serde::Serialize;

/// Environment variable overriding the bind host.
pub const HOST_ENV_VAR: &str = "SEARCH_HOST";

/// Environment variable overriding the bind port.
pub const PORT_ENV_VAR: &str = "SEARCH_PORT";

/// Host and port the service will listen on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindAddress {
    pub host: String,
    pub port: u16,
}

/// Raw host/port overrides gathered from the command line and environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindOverrides {
    pub cli_host: Option<String>,
    pub cli_port: Option<u16>,
    pub env_host: Option<String>,
    pub env_port: Option<String>,
}

impl BindOverrides {
    /// Read `SEARCH_HOST` / `SEARCH_PORT` through `env_fn`.
    pub fn with_env<F>(mut self, env_fn: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let non_empty = |key: &str| env_fn(key).ok().filter(|v| !v.trim().is_empty());
        self.env_host = non_empty(HOST_ENV_VAR);
        self.env_port = non_empty(PORT_ENV_VAR);
        self
    }

    /// Resolve the bind address: flag, then environment, then config, then default.
    ///
    /// # Errors
    ///
    /// Returns `InvalidValue` when `SEARCH_PORT` is not a valid port number.
    pub fn resolve(&self, service: &ServiceSettings) -> Result<BindAddress> {
        let host = self
            .cli_host
            .clone()
            .or_else(|| self.env_host.clone())
            .or_else(|| service.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match (self.cli_port, &self.env_port) {
            (Some(port), _) => port,
            (None, Some(raw)) => parse_port(raw)?,
            (None, None) => service.port.unwrap_or(DEFAULT_PORT),
        };

        Ok(BindAddress { host, port })
    }
}

fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .map_err(|e| ReadinessError::InvalidValue {
            field: PORT_ENV_VAR.to_string(),
            message: format!("'{}' is not a valid port ({})", raw, e),
        })
}
