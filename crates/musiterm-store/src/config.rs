//! Application configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use musiterm_core::Category;
use serde::{Deserialize, Serialize};

/// File name searched for in the working directory.
pub const CONFIG_FILE_NAME: &str = "musiterm.toml";
/// Settings file, relative to [`AppConfig::data_dir`].
pub const SETTINGS_FILE_NAME: &str = "app_config.enc";
/// History file, relative to [`AppConfig::data_dir`].
pub const HISTORY_FILE_NAME: &str = "test_history.enc";

pub const RESOURCE_DIR_ENV: &str = "MUSITERM_RESOURCE_DIR";
pub const DATA_DIR_ENV: &str = "MUSITERM_DATA_DIR";

/// Top-level musiterm configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the encoded dictionary resources.
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,
    /// Directory where settings and history are written.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Category used when a command is not given one.
    #[serde(default = "default_category")]
    pub default_category: Category,
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from("./resources")
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}
fn default_category() -> Category {
    Category::Complete
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resource_dir: default_resource_dir(),
            data_dir: default_data_dir(),
            default_category: default_category(),
        }
    }
}

impl AppConfig {
    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE_NAME)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(HISTORY_FILE_NAME)
    }

    /// Replace directories with values from `lookup`, when present and non-empty.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(RESOURCE_DIR_ENV).filter(|v| !v.is_empty()) {
            self.resource_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `musiterm.toml` in the current directory
/// 2. `~/.config/musiterm/config.toml`
///
/// `MUSITERM_RESOURCE_DIR` and `MUSITERM_DATA_DIR` override the file.
pub fn load_config() -> Result<AppConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => search_paths().into_iter().find(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config loaded");
            config
        }
        None => AppConfig::default(),
    };

    config.apply_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn parse_config(content: &str) -> Result<AppConfig> {
    Ok(toml::from_str(content)?)
}

fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs_path() {
        paths.push(home.join("config.toml"));
    }
    paths
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("musiterm"))
}
