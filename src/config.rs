//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`AURA_*`)
//! 2. Config file (`~/.aura/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Endpoint the companion backend listens on by default.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/chat";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,

    /// Chat backend configuration.
    pub backend: BackendConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the aura home directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_aura_home(),
        }
    }
}

/// Chat backend configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// URL messages are POSTed to.
    pub url: String,

    /// Request timeout in seconds. Zero waits indefinitely.
    pub timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout_seconds: 120,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `warn` or `aura=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Get the default aura home directory.
fn default_aura_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".aura"), |h| h.join(".aura"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = parse_config(&contents)?;
    }

    apply_env_overrides(&mut config);

    Ok(config)
}

/// Parse a TOML config document.
///
/// # Errors
///
/// Returns [`Error::Config`] if the document is not valid.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| Error::Config(e.to_string()))
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("AURA_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("AURA_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_aura_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    apply_overrides(config, |key| env::var(key).ok());
}

/// Apply overrides from an arbitrary key lookup.
fn apply_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(path) = lookup("AURA_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Some(home) = lookup("AURA_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    if let Some(url) = lookup("AURA_BACKEND_URL") {
        config.backend.url = url;
    }

    if let Some(secs) = lookup("AURA_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        config.backend.timeout_seconds = secs;
    }

    if let Some(level) = lookup("AURA_LOG") {
        config.logging.level = level;
    }
}
