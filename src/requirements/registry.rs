//! Precondition catalogue.
//!
//! Defines which packages, runtime, and assets the search service needs,
//! and how each gap is remediated. The data preconditions are derived from
//! the configuration file and live in the checker.

use super::status::RequiredFor;

/// A Python package the service imports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    /// Name shown in the report (the usual distribution name).
    pub name: String,
    /// Top-level module name used by `import`.
    pub import_name: String,
    /// Distribution names whose metadata also counts as installed.
    pub distributions: Vec<String>,
    pub required_for: RequiredFor,
    /// Install instruction.
    pub remediation: String,
}

impl PackageSpec {
    /// A package whose import name and distribution name are both `name`.
    pub fn new(name: &str, required_for: RequiredFor) -> Self {
        Self {
            name: name.to_string(),
            import_name: name.to_string(),
            distributions: vec![name.to_string()],
            required_for,
            remediation: format!("pip install {}", name),
        }
    }

    /// Override the module name imported at runtime.
    pub fn import_as(mut self, import_name: &str) -> Self {
        self.import_name = import_name.to_string();
        self
    }

    /// Add distribution names that provide this package.
    pub fn provided_by(mut self, distributions: &[&str]) -> Self {
        self.distributions = distributions.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Override the install instruction.
    pub fn remediate_with(mut self, remediation: &str) -> Self {
        self.remediation = remediation.to_string();
        self
    }
}

/// The managed runtime the service embeds (a JVM, through pyjnius).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeSpec {
    pub name: String,
    /// Executable looked up on the search path.
    pub binary: String,
    /// Lowest acceptable major version.
    pub min_major: u32,
    pub remediation: String,
}

impl Default for RuntimeSpec {
    fn default() -> Self {
        Self {
            name: "java-runtime".to_string(),
            binary: "java".to_string(),
            min_major: 21,
            remediation: "Install OpenJDK 21 or newer (e.g. `conda install -c conda-forge openjdk=21`) and put `java` on PATH or set JAVA_HOME".to_string(),
        }
    }
}

/// Files that must be present in a known directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSpec {
    pub name: String,
    /// File name prefix that identifies a matching asset.
    pub prefix: String,
    /// File name suffix that identifies a matching asset.
    pub suffix: String,
    /// Minimum number of matching files.
    pub required: usize,
    pub remediation: String,
}

/// Version of the Lucene extras pulled from Maven Central.
pub const LUCENE_VERSION: &str = "9.9.1";

const LUCENE_ARTIFACTS: [&str; 3] = ["lucene-highlighter", "lucene-queries", "lucene-memory"];

impl Default for AssetSpec {
    fn default() -> Self {
        let downloads = LUCENE_ARTIFACTS
            .iter()
            .map(|artifact| {
                format!(
                    "wget https://repo1.maven.org/maven2/org/apache/lucene/{a}/{v}/{a}-{v}.jar",
                    a = artifact,
                    v = LUCENE_VERSION
                )
            })
            .collect::<Vec<_>>()
            .join(" && ");

        Self {
            name: "lucene-jars".to_string(),
            prefix: "lucene-".to_string(),
            suffix: ".jar".to_string(),
            required: LUCENE_ARTIFACTS.len(),
            remediation: format!("Download into the Lucene extra directory: {}", downloads),
        }
    }
}

impl AssetSpec {
    /// Whether a file name counts as one of these assets.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.len() > self.prefix.len() + self.suffix.len()
            && file_name.starts_with(&self.prefix)
            && file_name.ends_with(&self.suffix)
    }
}

/// The full set of environment preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    /// Packages in evaluation order.
    pub packages: Vec<PackageSpec>,
    pub runtime: RuntimeSpec,
    pub assets: AssetSpec,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The preconditions of the offline search service.
    pub fn builtin() -> Self {
        let packages = vec![
            PackageSpec::new("pyserini", RequiredFor::All),
            PackageSpec::new("pyjnius", RequiredFor::All).import_as("jnius"),
            PackageSpec::new("duckdb", RequiredFor::All),
            PackageSpec::new("pyarrow", RequiredFor::All),
            PackageSpec::new("fastapi", RequiredFor::All),
            PackageSpec::new("uvicorn", RequiredFor::All),
            PackageSpec::new("pydantic", RequiredFor::All),
            PackageSpec::new("pyyaml", RequiredFor::All)
                .import_as("yaml")
                .provided_by(&["pyyaml"]),
            PackageSpec::new("loguru", RequiredFor::All),
            PackageSpec::new("torch", RequiredFor::Dense),
            PackageSpec::new("faiss", RequiredFor::Dense)
                .provided_by(&["faiss-cpu", "faiss-gpu"])
                .remediate_with("conda install -c pytorch faiss-gpu (or pip install faiss-cpu)"),
            PackageSpec::new("transformers", RequiredFor::Dense),
            PackageSpec::new("tevatron", RequiredFor::Dense)
                .remediate_with("pip install -e ./tevatron"),
        ];

        Self {
            packages,
            runtime: RuntimeSpec::default(),
            assets: AssetSpec::default(),
        }
    }

    /// Look up a package by report name.
    pub fn package(&self, name: &str) -> Option<&PackageSpec> {
        self.packages.iter().find(|p| p.name == name)
    }

    /// Report names of all packages.
    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(|p| p.name.as_str())
    }
}
