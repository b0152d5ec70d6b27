//! Integration tests for the readiness checker API.
//!
//! These build a throwaway project with a fake Python environment and a
//! fake `java` executable, so they only run on Unix.
#![cfg(unix)]

use searchready::config::Mode;
use searchready::requirements::{
    Catalog, ReadinessChecker, ReadinessReport, RequiredFor, RuntimeDescription, Status,
};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ALWAYS_REQUIRED: &[&str] = &[
    "pyserini", "jnius", "duckdb", "pyarrow", "fastapi", "uvicorn", "pydantic", "yaml", "loguru",
];

struct Project {
    temp: TempDir,
}

impl Project {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("site-packages")).unwrap();
        fs::create_dir_all(temp.path().join("bin")).unwrap();
        Self { temp }
    }

    fn root(&self) -> &Path {
        self.temp.path()
    }

    fn install(&self, import_names: &[&str]) -> &Self {
        for name in import_names {
            fs::create_dir_all(self.root().join("site-packages").join(name)).unwrap();
        }
        self
    }

    fn java(&self, version: &str) -> &Self {
        let java = self.root().join("bin").join("java");
        fs::write(
            &java,
            format!(
                "#!/bin/sh\necho 'openjdk version \"{}\" 2024-01-16' >&2\n",
                version
            ),
        )
        .unwrap();
        fs::set_permissions(&java, fs::Permissions::from_mode(0o755)).unwrap();
        self
    }

    fn jars(&self, count: usize) -> &Self {
        let dir = self.root().join("tevatron");
        fs::create_dir_all(&dir).unwrap();
        for artifact in ["highlighter", "queries", "memory", "analysis"]
            .iter()
            .take(count)
        {
            fs::write(dir.join(format!("lucene-{}-9.9.1.jar", artifact)), "").unwrap();
        }
        self
    }

    fn file(&self, relative: &str) -> &Self {
        let path = self.root().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
        self
    }

    fn config(&self, yaml: &str) -> PathBuf {
        let path = self.root().join("search_config.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    fn checker(&self) -> ReadinessChecker {
        let runtime = RuntimeDescription::new(self.root())
            .with_site_packages(vec![self.root().join("site-packages")])
            .with_search_path(vec![self.root().join("bin")]);
        ReadinessChecker::new(runtime)
    }

    fn check(&self, config: Option<&Path>, mode: Option<Mode>) -> ReadinessReport {
        self.checker().check(config, mode).unwrap()
    }
}

const BM25_CONFIG: &str = r#"
corpus:
  parquet_path: data/*.parquet
engine:
  type: bm25
  bm25:
    index_dir: indexes/bm25
"#;

#[test]
fn bm25_with_empty_corpus_glob_is_not_ready() {
    let project = Project::new();
    project
        .install(&["pyserini", "jnius"])
        .java("21.0.2")
        .jars(3)
        .file("indexes/bm25/segments_1");
    let config = project.config(BM25_CONFIG);

    let report = project.check(Some(&config), None);

    assert_eq!(report.mode, Some(Mode::Bm25));
    assert_eq!(report.status_of("corpus-parquet"), Some(Status::Missing));
    assert!(report.get("corpus-parquet").unwrap().mandatory);
    assert_eq!(report.status_of("bm25-index"), Some(Status::Satisfied));
    assert_eq!(report.status_of("java-runtime"), Some(Status::Satisfied));

    let torch = report.get("torch").unwrap();
    assert_eq!(torch.status, Status::Missing);
    assert_eq!(torch.required_for, RequiredFor::Dense);
    assert!(!torch.mandatory);

    assert!(!report.ready);
}

#[test]
fn no_config_with_core_packages_is_ready_for_bm25() {
    let project = Project::new();
    project.install(ALWAYS_REQUIRED).java("21").jars(3);

    let report = project.check(None, Some(Mode::Bm25));

    for name in ["corpus-parquet", "bm25-index", "dense-index"] {
        assert_eq!(report.status_of(name), Some(Status::Unknown), "{}", name);
    }
    assert_eq!(report.status_of("torch"), Some(Status::Missing));
    assert!(report.ready);
    assert!(report.config_issues.is_empty());
}

#[test]
fn fully_provisioned_bm25_project_is_ready() {
    let project = Project::new();
    project
        .install(ALWAYS_REQUIRED)
        .java("21.0.2")
        .jars(3)
        .file("data/part-00000.parquet")
        .file("indexes/bm25/segments_1");
    let config = project.config(BM25_CONFIG);

    let report = project.check(Some(&config), None);

    assert!(report.ready, "blocking: {:?}", report.blocking().collect::<Vec<_>>());
    assert!(report.remediation_plan().iter().all(|p| !p.mandatory));
}

#[test]
fn checking_twice_yields_identical_json() {
    let project = Project::new();
    project.install(&["pyserini", "duckdb"]).java("17").jars(2);
    let config = project.config(BM25_CONFIG);
    let checker = project.checker();

    let first = serde_json::to_string(&checker.check(Some(&config), None).unwrap()).unwrap();
    let second = serde_json::to_string(&checker.check(Some(&config), None).unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn installing_one_package_flips_only_that_status() {
    let project = Project::new();
    project.install(&["pyserini"]).java("21").jars(3);

    let before = project.check(None, Some(Mode::Dense));
    project.install(&["torch"]);
    let after = project.check(None, Some(Mode::Dense));

    for (old, new) in before.preconditions.iter().zip(&after.preconditions) {
        assert_eq!(old.name, new.name);
        if old.name == "torch" {
            assert_eq!(old.status, Status::Missing);
            assert_eq!(new.status, Status::Satisfied);
        } else {
            assert_eq!(old.status, new.status, "{} changed", old.name);
        }
    }
}

#[test]
fn dense_override_ignores_bm25_index() {
    let project = Project::new();
    project
        .install(ALWAYS_REQUIRED)
        .install(&["torch", "faiss", "transformers", "tevatron"])
        .java("21")
        .jars(3)
        .file("data/part-00000.parquet");
    let config = project.config(BM25_CONFIG);

    let report = project.check(Some(&config), Some(Mode::Dense));

    let index = report.get("bm25-index").unwrap();
    assert_eq!(index.status, Status::Missing);
    assert!(!index.mandatory);
    assert!(report.ready);

    let keys: Vec<&str> = report.config_issues.iter().map(|i| i.key.as_str()).collect();
    assert_eq!(keys, ["engine.dense.index_path", "engine.dense.model_name"]);
    assert_eq!(report.status_of("dense-index"), Some(Status::Unknown));
}

#[test]
fn two_lucene_jars_are_not_enough() {
    let project = Project::new();
    project.jars(2);
    let report = project.check(None, None);
    let jars = report.get("lucene-jars").unwrap();
    assert_eq!(jars.status, Status::Missing);
    assert!(jars.detail.as_deref().unwrap().contains("2 found, 3 required"));

    project.jars(3);
    let report = project.check(None, None);
    assert_eq!(report.status_of("lucene-jars"), Some(Status::Satisfied));
}

#[test]
fn old_java_blocks_every_mode() {
    let project = Project::new();
    project.install(ALWAYS_REQUIRED).java("11.0.22").jars(3);

    let report = project.check(None, Some(Mode::Bm25));

    assert_eq!(report.status_of("java-runtime"), Some(Status::Missing));
    assert!(!report.ready);
    let plan = report.remediation_plan();
    assert_eq!(plan[0].name, "java-runtime");
    assert!(plan[0].remediation.contains("openjdk=21"));
}

#[test]
fn catalog_packages_all_appear_in_report() {
    let project = Project::new();
    let report = project.check(None, None);
    for name in Catalog::builtin().package_names() {
        assert!(report.get(name).is_some(), "{} not reported", name);
    }
}
