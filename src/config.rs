//! Configuration management for the harness.
//!
//! Loads settings from a TOML file with environment overrides. The file uses
//! dotted keys (`base.url`, `connection.timeout`, ...); every key is optional
//! and falls back to a documented default. A missing or unparseable file is
//! fatal — the suite cannot run without a target endpoint — but an individual
//! malformed value only produces a warning and the default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use toml::Value;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://fakerestapi.azurewebsites.net";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECTION_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_RETRY_COUNT: u32 = 2;
pub const DEFAULT_ENVIRONMENT: &str = "dev";

/// Resolved, immutable-after-load harness settings.
///
/// Constructed once at suite startup and passed by reference into the client
/// core and services; there is no hidden global instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub api_version: String,
    /// Socket/read timeout in seconds.
    pub timeout: u64,
    /// Connection-establishment timeout in seconds.
    pub connection_timeout: u64,
    pub logging_enabled: bool,
    pub log_level: String,
    /// Verbose per-request/response logging in the client core.
    pub log_requests: bool,
    /// Runner-level retry budget for flaky-network reruns. The client core
    /// itself never retries.
    pub retry_count: u32,
    pub environment: String,
    /// Whether the target durably persists writes. `false` for the public
    /// demo sandbox, where post-delete 404 verification must be skipped.
    pub deletion_persistence: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            connection_timeout: DEFAULT_CONNECTION_TIMEOUT_SECS,
            logging_enabled: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_requests: true,
            retry_count: DEFAULT_RETRY_COUNT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            deletion_persistence: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file at `path`.
    ///
    /// The file must exist and parse; those failures abort startup. Missing
    /// keys take defaults, and wrong-typed values are logged and defaulted.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        let table: Value = content.parse().map_err(ConfigError::Parse)?;

        let defaults = Self::default();
        Ok(Self {
            base_url: str_or(&table, "base.url", &defaults.base_url),
            api_version: str_or(&table, "api.version", &defaults.api_version),
            timeout: uint_or(&table, "timeout", defaults.timeout),
            connection_timeout: uint_or(&table, "connection.timeout", defaults.connection_timeout),
            logging_enabled: bool_or(&table, "logging.enabled", defaults.logging_enabled),
            log_level: str_or(&table, "log.level", &defaults.log_level),
            log_requests: bool_or(&table, "log.requests", defaults.log_requests),
            retry_count: uint_or(&table, "retry.count", defaults.retry_count as u64) as u32,
            environment: str_or(&table, "environment", &defaults.environment),
            deletion_persistence: bool_or(
                &table,
                "deletion.persistence",
                defaults.deletion_persistence,
            ),
        })
    }

    /// Load settings with environment overrides applied (convenience method).
    pub fn load_with_env(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Ok(Self::load_from(path)?.with_env_overrides())
    }

    /// Apply environment variable overrides.
    ///
    /// Malformed numeric/boolean values are ignored; the file/default value
    /// stays in effect.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("BOOKCHECK_BASE_URL") {
            self.base_url = url;
        }
        if let Ok(version) = std::env::var("BOOKCHECK_API_VERSION") {
            self.api_version = version;
        }
        if let Ok(env_name) = std::env::var("BOOKCHECK_ENVIRONMENT") {
            self.environment = env_name;
        }
        if let Ok(val) = std::env::var("BOOKCHECK_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.timeout = secs;
            }
        }
        if let Ok(val) = std::env::var("BOOKCHECK_DELETION_PERSISTENCE") {
            if let Ok(flag) = val.parse() {
                self.deletion_persistence = flag;
            }
        }
        self
    }

    /// The composite API base path every request is rooted at.
    ///
    /// Always derived, never stored: `{base_url}/api/{api_version}`.
    pub fn api_base_path(&self) -> String {
        format!("{}/api/{}", self.base_url, self.api_version)
    }

    /// Log the effective settings at startup for debugging and verification.
    pub fn log_settings(&self) {
        info!("=== Harness Settings ===");
        info!(environment = %self.environment);
        info!(base_url = %self.base_url);
        info!(api_version = %self.api_version);
        info!(api_base_path = %self.api_base_path());
        info!(timeout_secs = self.timeout);
        info!(connection_timeout_secs = self.connection_timeout);
        info!(logging_enabled = self.logging_enabled);
        info!(log_requests = self.log_requests);
        info!(retry_count = self.retry_count);
        info!(deletion_persistence = self.deletion_persistence);
        info!("========================");
    }
}

/// Walk a dotted key (`base.url` -> table `base`, key `url`) through nested
/// TOML tables.
fn lookup<'a>(table: &'a Value, key: &str) -> Option<&'a Value> {
    let mut current = table;
    for part in key.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn str_or(table: &Value, key: &str, default: &str) -> String {
    match lookup(table, key) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            warn!(key, value = %other, default, "Invalid string value; using default");
            default.to_string()
        }
        None => default.to_string(),
    }
}

fn uint_or(table: &Value, key: &str, default: u64) -> u64 {
    match lookup(table, key) {
        Some(Value::Integer(i)) if *i >= 0 => *i as u64,
        Some(other) => {
            warn!(key, value = %other, default, "Invalid integer value; using default");
            default
        }
        None => default,
    }
}

fn bool_or(table: &Value, key: &str, default: bool) -> bool {
    match lookup(table, key) {
        Some(Value::Boolean(b)) => *b,
        Some(other) => {
            warn!(key, value = %other, default, "Invalid boolean value; using default");
            default
        }
        None => default,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Cannot read configuration file: {}", e),
            ConfigError::Parse(e) => write!(f, "Cannot parse configuration file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}
