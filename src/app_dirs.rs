//! Where zekat keeps its files.
//!
//! Two locations matter: the config directory holding `config.toml`, and
//! the data directory holding `search-history.json`. Both live under a
//! `zekat` folder in the platform's standard place as reported by [`dirs`]
//! (on Linux `~/.config/zekat` and `~/.local/share/zekat`).
//!
//! Set `ZEKAT_CONFIG_DIR` or `ZEKAT_DATA_DIR` to point either one
//! elsewhere, for example a scratch directory in tests.

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the persisted search history. Resolves to `dirs::data_dir()/zekat/`
/// by default.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("ZEKAT_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("zekat"))
        .unwrap_or_else(|| PathBuf::from("/tmp/zekat-data"))
}

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/zekat/` by default.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("ZEKAT_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("zekat"))
        .unwrap_or_else(|| PathBuf::from("/tmp/zekat-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Search history file path (`data_dir()/search-history.json`).
#[must_use]
pub fn history_file() -> PathBuf {
    data_dir().join("search-history.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_ends_with_config_toml() {
        let path = config_file();
        let s = path.to_string_lossy();
        assert!(s.ends_with("config.toml"), "config_file: {s}");
    }

    #[test]
    fn history_file_lives_in_data_dir() {
        let path = history_file();
        assert!(path.starts_with(data_dir()));
        assert!(path.to_string_lossy().ends_with("search-history.json"));
    }

    #[test]
    fn default_dirs_are_namespaced() {
        if std::env::var_os("ZEKAT_DATA_DIR").is_none() {
            assert!(data_dir().to_string_lossy().contains("zekat"));
        }
        if std::env::var_os("ZEKAT_CONFIG_DIR").is_none() {
            assert!(config_dir().to_string_lossy().contains("zekat"));
        }
    }
}
