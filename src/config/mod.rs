//! Configuration loading and management

use crate::core::error::DashboardError;
use crate::core::query::QueryLimits;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "SALESBOARD_CONFIG";

/// Environment variable overriding `server.bind`
pub const BIND_ENV: &str = "SALESBOARD_BIND";

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on (e.g., "0.0.0.0:5000")
    pub bind: String,

    /// Allowed CORS origins; empty allows any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

/// Where sales records come from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON file holding an array of records; the store starts empty without one
    pub records_file: Option<PathBuf>,
}

/// Complete configuration for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub server: ServerConfig,

    /// Bounds used when normalizing query parameters
    pub query: QueryLimits,

    pub data: DataConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file {}", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or from `SALESBOARD_CONFIG`, or fall back to defaults,
    /// then apply `SALESBOARD_BIND`
    pub fn load(path: Option<&str>) -> Result<Self> {
        let from_env = std::env::var(CONFIG_ENV).ok();
        let mut config = match path.or(from_env.as_deref()) {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default_config(),
        };

        if let Ok(bind) = std::env::var(BIND_ENV) {
            config.server.bind = bind;
        }

        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Check that the query limits are usable
    pub fn validate(&self) -> Result<(), DashboardError> {
        let q = &self.query;
        if q.max_page_size == 0 {
            return Err(DashboardError::config("query.max_page_size must be at least 1"));
        }
        if q.default_page_size == 0 || q.default_page_size > q.max_page_size {
            return Err(DashboardError::config(format!(
                "query.default_page_size must be within [1, {}], got {}",
                q.max_page_size, q.default_page_size
            )));
        }
        if q.min_age > q.max_age {
            return Err(DashboardError::config(format!(
                "query.min_age ({}) exceeds query.max_age ({})",
                q.min_age, q.max_age
            )));
        }
        Ok(())
    }
}
