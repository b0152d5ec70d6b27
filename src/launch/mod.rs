//! Launch plan for the search service.
//!
//! Renders how the ASGI server would be started for a configuration: the
//! `uvicorn` command line, the bind address, and the environment variables
//! the service reads at start-up. Nothing is executed.
//!
//! # Bind Address Precedence
//!
//! 1. `--host` / `--port` flags
//! 2. `SEARCH_HOST` / `SEARCH_PORT` environment variables
//! 3. `service.host` / `service.port` in the configuration
//! 4. `0.0.0.0:8000`

pub mod bind;
pub mod plan;

pub use bind::{BindAddress, BindOverrides, HOST_ENV_VAR, PORT_ENV_VAR};
pub use plan::{EnvAssignment, LaunchPlan, APP_TARGET, SERVER_PROGRAM};
