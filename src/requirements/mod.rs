//! Readiness checking for the search service environment.
//!
//! # Modules
//!
//! - [`registry`] - Catalogue of packages, runtime, and assets the service needs
//! - [`inspect`] - Runtime description and low-level filesystem/process lookups
//! - [`status`] - Precondition status types
//! - [`report`] - Aggregated readiness report
//! - [`checker`] - Evaluates every precondition and builds the report

pub mod checker;
pub mod inspect;
pub mod registry;
pub mod report;
pub mod status;

pub use checker::{ReadinessChecker, BM25_INDEX, CORPUS_PARQUET, DENSE_INDEX};
pub use inspect::RuntimeDescription;
pub use registry::{AssetSpec, Catalog, PackageSpec, RuntimeSpec};
pub use report::{Outcome, ReadinessReport};
pub use status::{Category, Precondition, RequiredFor, Status};
