//! Application configuration management.
//!
//! Configuration is stored at `~/.config/winged-tui/config.json` and
//! covers the API base URL and the last used username. The base URL can
//! be overridden with the `WINGED_API_URL` environment variable (also
//! honored from a `.env` file).

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/data directory paths
const APP_NAME: &str = "winged-tui";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default API origin, matching a local development backend
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the API base URL
const BASE_URL_ENV: &str = "WINGED_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_username: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Resolved API base URL: environment override, then config, then default.
    pub fn base_url(&self) -> String {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the session token and log files.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            api_base_url: Some("https://winged.example.org".to_string()),
            last_username: Some("u".to_string()),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_base_url.as_deref(), Some("https://winged.example.org"));
        assert_eq!(loaded.last_username.as_deref(), Some("u"));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.json");
        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.api_base_url.is_none());
        assert!(loaded.last_username.is_none());
    }

    #[test]
    fn test_base_url_falls_back_to_default() {
        let config = Config::default();
        assert_eq!(config.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_base_url_prefers_config_value() {
        let config = Config {
            api_base_url: Some("https://winged.example.org".to_string()),
            last_username: None,
        };
        assert_eq!(config.base_url(), "https://winged.example.org");
    }
}
