//! Runtime configuration
//!
//! Values come from an optional JSON file in the user config directory and
//! are overridden by environment variables. Nothing is hardcoded: a missing
//! base URL or API key stays empty and shows up later as failed requests.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable holding the catalog base URL
pub const ENV_API_URL: &str = "TICKETMASTER_API_URL";

/// Environment variable holding the catalog API key
pub const ENV_API_KEY: &str = "TICKETMASTER_API_KEY";

/// Catalog API access settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL the `attractions` path is appended to,
    /// e.g. `https://app.ticketmaster.com/discovery/v2/`
    pub api_base_url: String,
    pub api_key: String,
}

impl Config {
    /// Load from the config file (if any) and the process environment
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => match Self::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Ignoring config file: {}", e);
                    Self::default()
                }
            },
            _ => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok());

        if config.api_base_url.is_empty() {
            tracing::warn!("{} is not set; catalog requests will fail", ENV_API_URL);
        }
        if config.api_key.is_empty() {
            tracing::warn!("{} is not set; catalog requests will be rejected", ENV_API_KEY);
        }

        config
    }

    /// `<config dir>/artist-search/config.json`
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("artist-search").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(display.clone(), e))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse(display, e))
    }

    /// Override fields with any non-empty variables returned by `lookup`
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
    }

    /// Full URL of the attractions endpoint
    pub fn attractions_url(&self) -> String {
        if self.api_base_url.is_empty() || self.api_base_url.ends_with('/') {
            format!("{}attractions", self.api_base_url)
        } else {
            format!("{}/attractions", self.api_base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_empty() {
        let config = Config::default();
        assert!(config.api_base_url.is_empty());
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = Config {
            api_base_url: "https://file.example/".to_string(),
            api_key: "file-key".to_string(),
        };
        let env: HashMap<&str, &str> = [(ENV_API_KEY, "env-key")].into_iter().collect();

        config.apply_env(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api_base_url, "https://file.example/");
        assert_eq!(config.api_key, "env-key");
    }

    #[test]
    fn test_empty_env_value_is_ignored() {
        let mut config = Config {
            api_base_url: "https://file.example/".to_string(),
            api_key: String::new(),
        };
        config.apply_env(|_| Some(String::new()));
        assert_eq!(config.api_base_url, "https://file.example/");
    }

    #[test]
    fn test_attractions_url_joins_path() {
        let mut config = Config {
            api_base_url: "https://app.ticketmaster.com/discovery/v2/".to_string(),
            api_key: String::new(),
        };
        assert_eq!(
            config.attractions_url(),
            "https://app.ticketmaster.com/discovery/v2/attractions"
        );

        config.api_base_url = "https://app.ticketmaster.com/discovery/v2".to_string();
        assert_eq!(
            config.attractions_url(),
            "https://app.ticketmaster.com/discovery/v2/attractions"
        );
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("artist-search-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();

        let result = Config::from_file(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn test_from_file_partial_fields() {
        let path = std::env::temp_dir().join(format!("artist-search-partial-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "api_key": "abc" }"#).unwrap();

        let config = Config::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.api_key, "abc");
        assert!(config.api_base_url.is_empty());
    }
}
