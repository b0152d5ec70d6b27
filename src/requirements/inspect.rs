//! Runtime description and low-level lookups.
//!
//! The checker never reads process environment variables itself. Everything
//! it needs to know about the host (search path, Python environment, Java
//! home) is captured once in a [`RuntimeDescription`], usually at the CLI
//! edge via [`RuntimeDescription::from_env`]. Tests build one by hand.
//!
//! # Example
//!
//! ```no_run
//! use searchready::requirements::inspect::{resolve_tool_path, RuntimeDescription};
//! use std::path::Path;
//!
//! let runtime = RuntimeDescription::from_env(Path::new("."));
//! if let Some(java) = resolve_tool_path("java", &runtime.java_search_path(), &runtime.path_extensions) {
//!     println!("java at {}", java.display());
//! }
//! for dir in &runtime.site_packages {
//!     println!("site-packages: {}", dir.display());
//! }
//! ```

use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::time::{Duration, Instant};

/// Upper bound on how long the runtime version check may run.
pub const DEFAULT_VERSION_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Explicit description of the host environment the checker inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeDescription {
    /// Directory relative config paths and default asset locations resolve against.
    pub project_root: PathBuf,
    /// Executable search path, in lookup order.
    pub search_path: Vec<PathBuf>,
    /// Executable extensions tried on Windows (`PATHEXT`), lowercase.
    pub path_extensions: Vec<String>,
    /// Prefix of the Python environment (conda env or virtualenv).
    pub python_prefix: Option<PathBuf>,
    /// site-packages directories searched for installed packages.
    pub site_packages: Vec<PathBuf>,
    /// `JAVA_HOME`, searched before the search path.
    pub java_home: Option<PathBuf>,
    /// Timeout for subprocess version checks.
    pub version_timeout: Duration,
}

impl RuntimeDescription {
    /// An empty description rooted at `project_root`.
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            search_path: Vec::new(),
            path_extensions: Vec::new(),
            python_prefix: None,
            site_packages: Vec::new(),
            java_home: None,
            version_timeout: DEFAULT_VERSION_TIMEOUT,
        }
    }

    /// Describe the current process environment.
    pub fn from_env(project_root: &Path) -> Self {
        Self::from_env_with(project_root, |key: &str| std::env::var(key))
    }

    /// Describe an environment using a custom variable lookup.
    ///
    /// Reads `PATH`, `PATHEXT` (Windows only), `CONDA_PREFIX` then
    /// `VIRTUAL_ENV`, and `JAVA_HOME`.
    pub fn from_env_with<F>(project_root: &Path, env_fn: F) -> Self
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let non_empty = |key: &str| env_fn(key).ok().filter(|v| !v.trim().is_empty());

        let search_path = non_empty("PATH")
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();

        let path_extensions = if cfg!(windows) {
            non_empty("PATHEXT")
                .map(|value| parse_path_extensions(&value))
                .unwrap_or_else(|| vec![".exe".to_string(), ".bat".to_string(), ".cmd".to_string()])
        } else {
            Vec::new()
        };

        let python_prefix = non_empty("CONDA_PREFIX")
            .or_else(|| non_empty("VIRTUAL_ENV"))
            .map(PathBuf::from);

        let mut runtime = Self::new(project_root)
            .with_search_path(search_path)
            .with_java_home(non_empty("JAVA_HOME").map(PathBuf::from));
        runtime.path_extensions = path_extensions;

        if let Some(prefix) = python_prefix {
            runtime = runtime.with_python_prefix(&prefix);
        }

        tracing::debug!(
            search_path_entries = runtime.search_path.len(),
            site_packages = runtime.site_packages.len(),
            "Described runtime environment"
        );
        runtime
    }

    /// Use the Python environment at `prefix`, discovering its site-packages.
    pub fn with_python_prefix(mut self, prefix: &Path) -> Self {
        self.site_packages = discover_site_packages(prefix);
        self.python_prefix = Some(prefix.to_path_buf());
        self
    }

    /// Use exactly these site-packages directories.
    pub fn with_site_packages(mut self, dirs: Vec<PathBuf>) -> Self {
        self.site_packages = dirs;
        self
    }

    pub fn with_search_path(mut self, entries: Vec<PathBuf>) -> Self {
        self.search_path = entries;
        self
    }

    pub fn with_java_home(mut self, java_home: Option<PathBuf>) -> Self {
        self.java_home = java_home;
        self
    }

    pub fn with_version_timeout(mut self, timeout: Duration) -> Self {
        self.version_timeout = timeout;
        self
    }

    /// Directories searched for the Java executable: `JAVA_HOME/bin` first.
    pub fn java_search_path(&self) -> Vec<PathBuf> {
        let mut entries = Vec::with_capacity(self.search_path.len() + 1);
        if let Some(home) = &self.java_home {
            entries.push(home.join("bin"));
        }
        entries.extend(self.search_path.iter().cloned());
        entries
    }
}

fn parse_path_extensions(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Find the site-packages directories of a Python environment.
///
/// Covers the POSIX layout (`lib/python3.X/site-packages`) and the Windows
/// layout (`Lib/site-packages`).
pub fn discover_site_packages(prefix: &Path) -> Vec<PathBuf> {
    let escaped = glob::Pattern::escape(&prefix.to_string_lossy());
    let pattern = format!("{}/lib/python3*/site-packages", escaped);

    let mut dirs: Vec<PathBuf> = glob::glob(&pattern)
        .map(|paths| paths.filter_map(|p| p.ok()).filter(|p| p.is_dir()).collect())
        .unwrap_or_default();

    let windows_layout = prefix.join("Lib").join("site-packages");
    if windows_layout.is_dir() && !dirs.contains(&windows_layout) {
        dirs.push(windows_layout);
    }

    dirs
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over search path entries.
///
/// Returns the first match that exists and is executable. `extensions` are
/// tried after the bare name (empty on Unix).
pub fn resolve_tool_path(
    tool: &str,
    path_entries: &[PathBuf],
    extensions: &[String],
) -> Option<PathBuf> {
    for dir in path_entries {
        let bare = dir.join(tool);
        if bare.is_file() && is_executable(&bare) {
            return Some(bare);
        }
        for ext in extensions {
            let candidate = dir.join(format!("{}{}", tool, ext));
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Normalize a distribution name the way installers name metadata dirs.
fn normalize_distribution(name: &str) -> String {
    name.to_lowercase().replace(['-', '.'], "_")
}

/// Distribution name encoded in a `.dist-info` / `.egg-info` entry.
fn metadata_distribution(file_name: &str) -> Option<&str> {
    let stem = file_name
        .strip_suffix(".dist-info")
        .or_else(|| file_name.strip_suffix(".egg-info"))?;
    stem.split('-').next().filter(|s| !s.is_empty())
}

fn sorted_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

/// Locate an installed Python package.
///
/// A package resolves if any site-packages directory holds the importable
/// module (package directory, `.py` file, or extension module) or install
/// metadata for one of `distributions`. Returns the matching path.
pub fn resolve_package(
    site_packages: &[PathBuf],
    import_name: &str,
    distributions: &[String],
) -> Option<PathBuf> {
    let wanted: Vec<String> = distributions
        .iter()
        .map(|d| normalize_distribution(d))
        .collect();
    let extension_prefix = format!("{}.", import_name);

    for dir in site_packages {
        let package_dir = dir.join(import_name);
        if package_dir.is_dir() {
            return Some(package_dir);
        }

        let module_file = dir.join(format!("{}.py", import_name));
        if module_file.is_file() {
            return Some(module_file);
        }

        for name in sorted_entries(dir) {
            let is_extension = name.starts_with(&extension_prefix)
                && (name.ends_with(".so") || name.ends_with(".pyd"));
            if is_extension {
                return Some(dir.join(name));
            }

            if let Some(dist) = metadata_distribution(&name) {
                if wanted.contains(&normalize_distribution(dist)) {
                    return Some(dir.join(name));
                }
            }
        }
    }

    None
}

/// Result of asking a Java executable for its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// Major version reported by `java -version`.
    Version(u32),
    /// The command ran but its output had no recognizable version.
    Unrecognized(String),
    /// The command did not finish within the timeout and was killed.
    TimedOut,
    /// The command could not be run.
    Failed(String),
}

static JAVA_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s+"(\d+)(?:\.(\d+))?"#).unwrap());

/// Extract the major version from `java -version` output.
///
/// Handles both the modern scheme (`"21.0.2"`) and the legacy one
/// (`"1.8.0_392"`, major 8).
pub fn parse_java_major(output: &str) -> Option<u32> {
    let caps = JAVA_VERSION.captures(output)?;
    let first: u32 = caps.get(1)?.as_str().parse().ok()?;
    if first == 1 {
        caps.get(2).and_then(|m| m.as_str().parse().ok())
    } else {
        Some(first)
    }
}

/// Run `<binary> -version`, killing it if it outlives `timeout`.
pub fn query_java_version(binary: &Path, timeout: Duration) -> VersionCheck {
    let mut child = match Command::new(binary)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return VersionCheck::Failed(e.to_string()),
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_)) => break,
            Ok(None) if Instant::now() >= deadline => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::debug!("{} -version timed out after {:?}", binary.display(), timeout);
                return VersionCheck::TimedOut;
            }
            Ok(None) => std::thread::sleep(POLL_INTERVAL),
            Err(e) => return VersionCheck::Failed(e.to_string()),
        }
    }

    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => return VersionCheck::Failed(e.to_string()),
    };

    // The JVM prints its version banner on stderr.
    let mut text = String::from_utf8_lossy(&output.stderr).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stdout));

    match parse_java_major(&text) {
        Some(major) => VersionCheck::Version(major),
        None => VersionCheck::Unrecognized(text.lines().next().unwrap_or("").trim().to_string()),
    }
}
