//! Loader configuration.
//!
//! Discovers and loads `blueprint.toml` from a root directory. Explicit overrides passed to
//! [`ConfigMerger`] take precedence over file values.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "blueprint.toml";

/// Default glob used when scanning a directory for blueprints.
pub const DEFAULT_PATTERN: &str = "*.json";

/// Top-level configuration from blueprint.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    pub dispatch: DispatchConfig,
    pub scan: ScanConfig,
}

/// Controls which API identifiers the dispatcher accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Accept test-only identifiers such as `test/empty`.
    pub allow_test_apis: bool,
}

/// Directory scan settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob pattern, relative to the scanned directory.
    pub pattern: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

/// Search for `blueprint.toml` in `root`. Returns `None` if there is none.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<LoaderConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<LoaderConfig> {
    let config: LoaderConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return the default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<LoaderConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(LoaderConfig::default()),
    }
}

/// Builder for merging a loaded config with explicit overrides.
pub struct ConfigMerger {
    config: LoaderConfig,
}

impl ConfigMerger {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// A `true` flag enables test identifiers even if the file leaves them off.
    pub fn allow_test_apis(mut self, allow: bool) -> Self {
        self.config.dispatch.allow_test_apis |= allow;
        self
    }

    pub fn pattern(mut self, pattern: Option<String>) -> Self {
        if let Some(pattern) = pattern {
            self.config.scan.pattern = pattern;
        }
        self
    }

    pub fn merge(self) -> LoaderConfig {
        self.config
    }
}
