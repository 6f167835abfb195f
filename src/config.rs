//! Configuration types for the search application.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use zekat_search::SearchConfig;

use crate::error::{AppError, Result};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Webhook, alternate index and health probe settings.
    pub search: SearchConfig,
    /// Input and presentation timing.
    pub ui: UiConfig,
    /// Search history persistence.
    pub history: HistoryConfig,
}

/// Input and presentation timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Quiet period before typed input triggers a search.
    pub debounce_ms: u64,
    /// Minimum trimmed query length, in characters, that triggers a search.
    pub min_query_chars: usize,
    /// Interval between background health probes.
    pub health_poll_secs: u64,
    /// How long the offline warning stays up before the demo-mode notice.
    pub offline_notice_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 800,
            min_query_chars: 3,
            health_poll_secs: 45,
            offline_notice_secs: 7,
        }
    }
}

impl UiConfig {
    /// Debounce interval as a [`Duration`].
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Health poll interval as a [`Duration`].
    pub fn health_poll(&self) -> Duration {
        Duration::from_secs(self.health_poll_secs)
    }

    /// Offline warning lifetime as a [`Duration`].
    pub fn offline_notice(&self) -> Duration {
        Duration::from_secs(self.offline_notice_secs)
    }
}

/// Search history persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of distinct queries kept.
    pub capacity: usize,
    /// History file location. `None` uses [`crate::app_dirs::history_file`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            path: None,
        }
    }
}

impl HistoryConfig {
    /// The history file this configuration resolves to.
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(crate::app_dirs::history_file)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Load `path` if given, else the default config file if it exists,
    /// else built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly given file cannot be loaded, or
    /// the default file exists but is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::app_dirs::config_file()
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Search`] for invalid endpoints and
    /// [`AppError::Config`] for zero intervals or limits.
    pub fn validate(&self) -> Result<()> {
        self.search.validate()?;
        if self.ui.min_query_chars == 0 {
            return Err(AppError::Config(
                "ui.min_query_chars must be greater than 0".into(),
            ));
        }
        if self.ui.health_poll_secs == 0 {
            return Err(AppError::Config(
                "ui.health_poll_secs must be greater than 0".into(),
            ));
        }
        if self.history.capacity == 0 {
            return Err(AppError::Config(
                "history.capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = AppConfig::default();
        assert_eq!(config.ui.debounce(), Duration::from_millis(800));
        assert_eq!(config.ui.min_query_chars, 3);
        assert_eq!(config.ui.health_poll(), Duration::from_secs(45));
        assert_eq!(config.ui.offline_notice(), Duration::from_secs(7));
        assert_eq!(config.history.capacity, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [ui]
            debounce_ms = 250

            [search]
            webhook_url = "http://localhost:8080/hook"
            "#,
        )
        .expect("parse");
        assert_eq!(config.ui.debounce_ms, 250);
        assert_eq!(config.ui.min_query_chars, 3);
        assert_eq!(config.search.webhook_url, "http://localhost:8080/hook");
        assert_eq!(config.search.health_timeout_seconds, 5);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.ui.debounce_ms = 300;
        config.history.path = Some(dir.path().join("history.json"));

        config.save_to_file(&path).expect("save");
        let loaded = AppConfig::from_file(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn from_file_nonexistent_returns_error() {
        let result = AppConfig::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn from_file_invalid_toml_returns_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").expect("write");
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn load_with_explicit_missing_path_fails() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/zekat.toml"))).is_err());
    }

    #[test]
    fn zero_values_rejected() {
        let mut config = AppConfig::default();
        config.ui.min_query_chars = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.history.capacity = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.search.webhook_url = "nope".into();
        assert!(matches!(config.validate(), Err(AppError::Search(_))));
    }

    #[test]
    fn explicit_history_path_wins() {
        let config = HistoryConfig {
            capacity: 5,
            path: Some(PathBuf::from("/tmp/custom-history.json")),
        };
        assert_eq!(
            config.resolved_path(),
            PathBuf::from("/tmp/custom-history.json")
        );
    }
}
