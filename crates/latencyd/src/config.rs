//! Configuration management for latencyd.
//!
//! Loads settings from $LATENCYD_CONFIG or /etc/latencyd/config.toml,
//! falling back to defaults when neither exists.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/latencyd/config.toml";

/// Environment variable overriding the config path
pub const CONFIG_ENV: &str = "LATENCYD_CONFIG";

/// Dataset file name, looked up next to the installation root
pub const DATASET_FILE: &str = "q-vercel-latency.json";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Request body cap in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dataset location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Explicit dataset path; installation-relative default when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl DatasetConfig {
    pub fn resolve_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(default_dataset_path)
    }
}

/// `<dir of executable>/../q-vercel-latency.json`, or the bare file name
/// in the working directory if the executable path is unavailable.
pub fn default_dataset_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().and_then(Path::parent).map(Path::to_path_buf))
        .map(|root| root.join(DATASET_FILE))
        .unwrap_or_else(|| PathBuf::from(DATASET_FILE))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Config file to read, if any.
    ///
    /// An explicit $LATENCYD_CONFIG is returned even if the file is absent,
    /// so a typo surfaces as a load error instead of silent defaults.
    pub fn locate() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let path = Path::new(CONFIG_PATH);
        path.exists().then(|| path.to_path_buf())
    }

    /// Load config from specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
