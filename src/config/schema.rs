//! Configuration schema for the search service YAML file.
//!
//! Every field is optional at the serde level so that a partially written
//! file still parses; required keys are enforced by
//! [`validator`](super::validator), which reports gaps instead of failing
//! the parse. Unknown keys are ignored.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Default bind host used when neither flag, environment nor config sets one.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default bind port used when neither flag, environment nor config sets one.
pub const DEFAULT_PORT: u16 = 8000;

/// Default snippet length the service truncates summaries to.
pub const DEFAULT_MAX_SNIPPET_LEN: usize = 300;

/// Default display name of the corpus.
pub const DEFAULT_CORPUS_NAME: &str = "Custom Corpus";

/// Directory under the project root holding the Lucene JARs by default.
pub const DEFAULT_LUCENE_DIR: &str = "tevatron";

/// Retrieval strategy served by the search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Sparse retrieval over a Lucene index.
    Bm25,
    /// Dense retrieval over a FAISS index.
    Dense,
}

impl Mode {
    /// Lowercase identifier used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Bm25 => "bm25",
            Mode::Dense => "dense",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bm25" => Ok(Mode::Bm25),
            "dense" => Ok(Mode::Dense),
            _ => Err(format!("unknown engine type '{}' (expected bm25 or dense)", s)),
        }
    }
}

/// Root of the search service configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServiceConfig {
    /// Web service settings.
    pub service: ServiceSettings,

    /// Document corpus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corpus: Option<CorpusSettings>,

    /// Retrieval engine selection and per-engine settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<EngineSettings>,

    /// Location of the extra Lucene JARs.
    pub lucene: LuceneSettings,
}

/// `service:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ServiceSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Maximum summary length returned by search results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_snippet_len: Option<usize>,
}

/// `corpus:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CorpusSettings {
    /// Display name shown in the web UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Glob matching the corpus parquet shards.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parquet_path: Option<String>,
}

/// `engine:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct EngineSettings {
    /// `bm25` or `dense`. Kept as text so a typo is reported, not a parse error.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub engine_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bm25: Option<Bm25Settings>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dense: Option<DenseSettings>,
}

/// `engine.bm25:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Bm25Settings {
    /// Directory holding the Lucene index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_dir: Option<PathBuf>,
}

/// `engine.dense:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DenseSettings {
    /// FAISS index file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_path: Option<PathBuf>,

    /// Embedding model used to encode queries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub gpu_ids: Vec<DeviceId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuda_visible_devices: Option<DeviceId>,
}

/// A GPU identifier, written either as a number or as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum DeviceId {
    Index(u32),
    Name(String),
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceId::Index(i) => write!(f, "{}", i),
            DeviceId::Name(s) => f.write_str(s),
        }
    }
}

/// `lucene:` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LuceneSettings {
    /// Directory containing the extra Lucene JARs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_dir: Option<PathBuf>,
}
