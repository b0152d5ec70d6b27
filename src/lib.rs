//! searchready - Readiness checks for an offline search service.
//!
//! The search service serves BM25 retrieval over a Lucene index or dense
//! retrieval over a FAISS index. Before it can start, a set of Python
//! packages, a Java runtime, the Lucene extension JARs, and the configured
//! data files must all be in place. This crate inspects those preconditions
//! and reports every gap with the command that fixes it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`launch`] - Launch plan rendering for the ASGI server
//! - [`requirements`] - Precondition catalogue, host inspection, and the readiness checker
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use searchready::requirements::{ReadinessChecker, RuntimeDescription, Status};
//! use std::path::Path;
//!
//! // No Python environment and no config: packages and data are unknown.
//! let checker = ReadinessChecker::new(RuntimeDescription::new(Path::new("/nonexistent")));
//! let report = checker.check(None, None).unwrap();
//! assert_eq!(report.status_of("pyserini"), Some(Status::Unknown));
//! assert_eq!(report.status_of("corpus-parquet"), Some(Status::Unknown));
//! assert!(!report.ready); // the Lucene JARs are missing
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod launch;
pub mod requirements;
pub mod ui;

pub use error::{ReadinessError, Result};
