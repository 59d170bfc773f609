use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infra::constants::api;
use crate::infra::runtime_config::{LoadingPolicy, RuntimeConfig};

const APP_DIR: &str = "medpost";
const CONFIG_FILE: &str = "config.json";
const SERVER_URL_ENV: &str = "MEDPOST_SERVER_URL";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error while writing config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub request_timeout_secs: Option<u64>,
    pub text_debounce_ms: Option<u64>,
    pub endorsed_debounce_ms: Option<u64>,
    pub loading_policy: Option<LoadingPolicy>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: api::DEFAULT_SERVER_URL.to_string(),
            request_timeout_secs: None,
            text_debounce_ms: None,
            endorsed_debounce_ms: None,
            loading_policy: None,
        }
    }
}

impl Config {
    /// Platform location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        };

        // Allow env var to override config file for server URL
        if let Ok(server_url) = std::env::var(SERVER_URL_ENV)
            && !server_url.trim().is_empty()
        {
            config.server_url = server_url;
        }

        config
    }

    /// Read a config file, falling back to defaults when it is missing or
    /// unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<Config>(&content).map_err(|e| e.to_string())
            }) {
            Ok(config) => config,
            Err(e) => {
                log::warn!(
                    "Ignoring unreadable config at {}: {}",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        match Self::default_path() {
            Some(path) => self.save_to(&path),
            None => Ok(()),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            text_debounce_ms: self.text_debounce_ms,
            endorsed_debounce_ms: self.endorsed_debounce_ms,
            request_timeout_secs: self.request_timeout_secs,
            loading_policy: self.loading_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json"));
        assert_eq!(config, Config::default());
        assert_eq!(config.server_url, "http://127.0.0.1:8000");
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{ "text_debounce_ms": 250, "loading_policy": "on_dispatch" }"#,
        )
        .unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.server_url, "http://127.0.0.1:8000");

        let runtime = config.runtime_config();
        assert_eq!(runtime.text_debounce(), Duration::from_millis(250));
        assert_eq!(runtime.endorsed_debounce(), Duration::from_millis(300));
        assert_eq!(runtime.loading_policy(), LoadingPolicy::OnDispatch);
    }

    #[test]
    fn malformed_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            server_url: "https://medpost.example".to_string(),
            request_timeout_secs: Some(5),
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path), config);
    }
}
