//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
    /// Include the event target in log lines
    pub log_target: bool,
}

impl Config {
    /// Parse a JSON config; missing fields keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.env_filter()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;

        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_filter).map_err(|e| {
            CoreError::Config(format!("invalid log filter {:?}: {}", self.log_filter, e))
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            log_target: true,
        }
    }
}
