//! Search service configuration.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Key validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use searchready::config::{parse_config, validate, Mode};
//!
//! let loaded = parse_config(
//!     "corpus:\n  parquet_path: data/*.parquet\nengine:\n  type: dense\n",
//! );
//! let config = loaded.parsed().unwrap();
//! assert_eq!(config.engine_mode(), Ok(Mode::Dense));
//! assert_eq!(validate(config).len(), 2);
//! ```
//!
//! # Configuration File Location
//!
//! 1. `--config PATH`
//! 2. `SEARCH_CONFIG` environment variable
//! 3. `search_config.yaml` in the project root, if present

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config_at, load_config_file, load_required_config, parse_config, resolve_config_path,
    resolve_relative, ConfigLocation, ConfigSource, LoadedConfig, CONFIG_ENV_VAR,
    DEFAULT_CONFIG_FILE,
};
pub use schema::{
    Bm25Settings, CorpusSettings, DenseSettings, DeviceId, EngineSettings, LuceneSettings, Mode,
    ServiceConfig, ServiceSettings, DEFAULT_CORPUS_NAME, DEFAULT_HOST, DEFAULT_LUCENE_DIR,
    DEFAULT_MAX_SNIPPET_LEN, DEFAULT_PORT,
};
pub use validator::{validate, validate_for, ConfigIssue};
