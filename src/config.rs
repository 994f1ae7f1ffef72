//! Configuration for the curriculum browser.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (SYLLABUS_BASE_URL, SYLLABUS_DATA, SYLLABUS_LOAD_TIMEOUT)
//! 2. Config file (.syllabus/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .syllabus/config.yaml
//! - Falls back to ~/.syllabus/config.yaml
//! - Paths in config file are relative to the project root (parent of .syllabus/)
//!
//! The resolved configuration is returned by value and handed to whoever
//! needs it; nothing is cached globally.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{LoadPolicy, ResourceLocator};

/// Default root of the remote resource store
pub const DEFAULT_BASE_URL: &str = "https://example-bucket.s3.amazonaws.com/discussions";

/// Default curriculum data file (relative)
pub const DEFAULT_DATA_FILE: &str = "data/curriculum.json";

const CONFIG_DIR: &str = ".syllabus";
const CONFIG_FILE: &str = "config.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub loading: Option<LoadingConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourcesConfig {
    /// Root URL of the resource store
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Curriculum JSON file (relative to project root)
    pub curriculum: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadingConfig {
    pub timeout_seconds: Option<u64>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Root URL of the resource store
    pub base_url: String,
    /// Curriculum data file
    pub data_file: PathBuf,
    /// Bound on pending resource loads
    pub load_timeout: Duration,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            load_timeout: LoadPolicy::default().timeout,
            config_file: None,
        }
    }
}

impl ResolvedConfig {
    /// Locator rooted at the configured base URL
    pub fn locator(&self) -> ResourceLocator {
        ResourceLocator::new(self.base_url.clone())
    }

    /// Load policy built from the configured timeout
    pub fn load_policy(&self) -> LoadPolicy {
        LoadPolicy {
            timeout: self.load_timeout,
        }
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = dirs::home_dir()?.join(CONFIG_DIR).join(CONFIG_FILE);
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Merge config file, environment and defaults
fn resolve<F>(config_file: Option<PathBuf>, env: F) -> Result<ResolvedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut resolved = ResolvedConfig::default();

    if let Some(ref config_path) = config_file {
        let config = load_config_file(config_path)?;

        // Project root is the parent of .syllabus/ (grandparent of config.yaml)
        let base_dir = config_path
            .parent()
            .and_then(|p| p.parent())
            .unwrap_or(Path::new("."));

        if let Some(base_url) = config.resources.base_url {
            resolved.base_url = base_url;
        }
        resolved.data_file = resolve_path(
            base_dir,
            config.data.curriculum.as_deref().unwrap_or(DEFAULT_DATA_FILE),
        );
        if let Some(seconds) = config.loading.and_then(|l| l.timeout_seconds) {
            resolved.load_timeout = Duration::from_secs(seconds);
        }
    }

    if let Some(base_url) = env("SYLLABUS_BASE_URL") {
        resolved.base_url = base_url;
    }
    if let Some(data) = env("SYLLABUS_DATA") {
        resolved.data_file = PathBuf::from(data);
    }
    if let Some(timeout) = env("SYLLABUS_LOAD_TIMEOUT") {
        let seconds: u64 = timeout
            .trim()
            .parse()
            .with_context(|| format!("Invalid SYLLABUS_LOAD_TIMEOUT: {}", timeout))?;
        resolved.load_timeout = Duration::from_secs(seconds);
    }

    resolved.config_file = config_file;
    Ok(resolved)
}

/// Load configuration from all sources
///
/// An explicit `config_path` replaces config file discovery.
pub fn load_config(config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let config_file = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(),
    };

    resolve(config_file, |key| std::env::var(key).ok())
}
