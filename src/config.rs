//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the server base URL and the last identifier used to
//! sign in.
//!
//! Configuration is stored at `~/.config/calorie-tui/config.json`.
//! The `CALORIE_SERVER_URL` environment variable overrides the stored
//! server URL.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "calorie-tui";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default server base URL when nothing is configured
const DEFAULT_SERVER_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub server_url: Option<String>,
    pub last_identifier: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolve the server base URL: env var, then config file, then default.
    /// Trailing slashes are stripped so callers can join paths with `/`.
    pub fn server_url(&self) -> String {
        let url = std::env::var("CALORIE_SERVER_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.server_url.clone())
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        url.trim_end_matches('/').to_string()
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url_default() {
        // Only meaningful when the env override is unset
        if std::env::var("CALORIE_SERVER_URL").is_err() {
            let config = Config::default();
            assert_eq!(config.server_url(), DEFAULT_SERVER_URL);
        }
    }

    #[test]
    fn test_server_url_strips_trailing_slash() {
        if std::env::var("CALORIE_SERVER_URL").is_err() {
            let config = Config {
                server_url: Some("http://example.com/".to_string()),
                last_identifier: None,
            };
            assert_eq!(config.server_url(), "http://example.com");
        }
    }
}
