//! Client configuration.

use crate::error::PortalError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Default backend base URL (local development server).
const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Configuration for the portal client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the backend API, up to and including `/api`.
    pub base_url: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Path of the sqlite file backing the credential store.
    #[serde(default = "default_db_path")]
    pub db_path: String,
    /// When true, a fetch whose response arrives after a newer fetch for the
    /// same slice has started is dropped instead of overwriting the slice.
    #[serde(default)]
    pub drop_stale_responses: bool,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("studyportal/{}", env!("CARGO_PKG_VERSION"))
}

fn default_db_path() -> String {
    "studyportal.db".to_string()
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
            db_path: default_db_path(),
            drop_stale_responses: false,
        }
    }
}

impl PortalConfig {
    /// Loads configuration from a JSON file, then applies env overrides.
    pub fn load_from_file(path: &Path) -> Result<Self, PortalError> {
        let content = std::fs::read_to_string(path).map_err(|e| PortalError::Storage {
            message: format!("Failed to read config {}: {}", path.display(), e),
        })?;
        let mut config: PortalConfig =
            serde_json::from_str(&content).map_err(|e| PortalError::Decode {
                message: format!("Invalid config {}: {}", path.display(), e),
            })?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with env overrides applied.
    pub fn from_env() -> Result<Self, PortalError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("PORTAL_BASE_URL") {
            self.base_url = base_url;
        }
        if let Ok(db_path) = std::env::var("PORTAL_DB_PATH") {
            self.db_path = db_path;
        }
    }

    /// Rejects a base URL reqwest could not use.
    pub fn validate(&self) -> Result<(), PortalError> {
        Url::parse(&self.base_url).map_err(|e| PortalError::Validation {
            message: format!("Invalid base_url {:?}: {}", self.base_url, e),
        })?;
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PortalConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.drop_stale_responses);
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let config = PortalConfig {
            base_url: "not a url".into(),
            ..PortalConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PortalError::Validation { .. })
        ));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: PortalConfig =
            serde_json::from_str(r#"{"base_url":"https://portal.example.edu/api"}"#).unwrap();
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.user_agent.starts_with("studyportal/"));
    }
}
