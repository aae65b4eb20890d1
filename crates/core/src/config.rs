//! Configuration management using config.toml

use crate::error::ConfigError;
use crate::matching::DEFAULT_TOP_N;
use crate::steam::IgnoreRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Steam Web API key
    #[serde(default)]
    pub steam_web_api_key: String,

    /// Steam ID of the library owner
    #[serde(default)]
    pub steam_id: String,

    /// How many ranked titles to show when a name is ambiguous
    #[serde(default = "default_match_results")]
    pub match_results: usize,

    /// Strip trademarks, accents and case before comparing titles
    #[serde(default = "default_normalize_titles")]
    pub normalize_titles: bool,

    /// Days before the cached app list is fetched again
    #[serde(default = "default_app_list_refresh_days")]
    pub app_list_refresh_days: f64,

    /// Game names that are never tracked
    #[serde(default)]
    pub name_ignore_list: Vec<String>,

    /// App ids that are never tracked
    #[serde(default)]
    pub appid_ignore_list: Vec<u64>,
}

fn default_match_results() -> usize {
    DEFAULT_TOP_N
}

fn default_normalize_titles() -> bool {
    true
}

fn default_app_list_refresh_days() -> f64 {
    7.0
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            steam_web_api_key: String::new(),
            steam_id: String::new(),
            match_results: default_match_results(),
            normalize_titles: default_normalize_titles(),
            app_list_refresh_days: default_app_list_refresh_days(),
            name_ignore_list: Vec::new(),
            appid_ignore_list: Vec::new(),
        }
    }
}

impl TrackerConfig {
    /// Load config.toml from the working directory, creating a default one
    /// if it is missing or unreadable
    pub fn load() -> Self {
        match Self::load_from(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                if Path::new(CONFIG_PATH).exists() {
                    tracing::warn!("{}, using defaults", e);
                    return Self::default();
                }
                let config = Self::default();
                if let Err(e) = config.save_to(CONFIG_PATH) {
                    tracing::warn!("Could not create {}: {}", CONFIG_PATH, e);
                }
                config
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(CONFIG_PATH)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Check if steam credentials are filled in
    pub fn has_steam_credentials(&self) -> bool {
        !self.steam_web_api_key.is_empty() && !self.steam_id.is_empty()
    }

    /// Get steam_id as u64 for API calls
    pub fn steam_id_u64(&self) -> Option<u64> {
        self.steam_id.trim().parse().ok()
    }

    pub fn ignore_rules(&self) -> IgnoreRules {
        IgnoreRules::new(&self.name_ignore_list, &self.appid_ignore_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: TrackerConfig = toml::from_str("steam_id = \"76561197960287930\"").unwrap();
        assert_eq!(config.steam_id_u64(), Some(76561197960287930));
        assert_eq!(config.match_results, 3);
        assert!(config.normalize_titles);
        assert_eq!(config.app_list_refresh_days, 7.0);
        assert!(!config.has_steam_credentials());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TrackerConfig::default();
        config.steam_web_api_key = "15D4C014D419C0642B1E707BED41G7D4".to_string();
        config.steam_id = "76561197960287930".to_string();
        config.name_ignore_list = vec!["Half-Life 2: Lost Coast".to_string()];
        config.appid_ignore_list = vec![61600];
        config.save_to(&path).unwrap();

        let loaded = TrackerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.has_steam_credentials());
        assert!(loaded.ignore_rules().should_ignore(Some(61600), None));
        assert!(loaded.ignore_rules().should_ignore(None, Some("half-life 2: lost coast")));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(TrackerConfig::load_from(&missing), Err(ConfigError::Io(_))));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "match_results = \"three\"").unwrap();
        assert!(matches!(TrackerConfig::load_from(&broken), Err(ConfigError::Parse(_))));
    }
}
