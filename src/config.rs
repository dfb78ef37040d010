use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application configuration. Every field has a default, so an empty
/// JSON object is a valid config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub latency: LatencyConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse config")
    }

    /// Config with every simulated delay switched off
    pub fn without_latency() -> Self {
        Self {
            latency: LatencyConfig::disabled(),
            ..Self::default()
        }
    }
}

/// Simulated I/O latency, in milliseconds, per kind of store operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub list_ms: u64,
    pub lookup_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub delete_ms: u64,
    pub query_ms: u64,
    pub membership_ms: u64,
}

impl LatencyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            list_ms: 300,
            lookup_ms: 250,
            create_ms: 400,
            update_ms: 350,
            delete_ms: 300,
            query_ms: 350,
            membership_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. "info" or "estate_flow=debug"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
