//! Configuration management for helptoc.
//!
//! Configuration is stored as TOML. It is read from the platform config directory
//! (`config.toml`) or, when set, from the path in the `HELPTOC_CONFIG` environment
//! variable. A missing file yields the defaults; a malformed file is an error.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [loader]
//! base_url = "https://docs.example.com"
//! dataset_name = "HelpTOC"
//! fallback_url = "https://mirror.example.com/api/HelpTOC.json"
//! timeout_secs = 30
//!
//! [search]
//! enabled = true
//! debounce_ms = 300
//! min_query_length = 1
//!
//! [tree]
//! auto_expand_active = true
//! reference_policy = "lenient"
//!
//! [display]
//! theme = "dark"
//! ```
//!
//! ```rust
//! use helptoc_core::Config;
//!
//! let config = Config::default();
//! assert_eq!(config.search.debounce_ms, 300);
//! assert_eq!(config.loader.dataset_url()?.path(), "/api/HelpTOC.json");
//! # Ok::<(), helptoc_core::Error>(())
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::parser::ReferencePolicy;
use crate::{Error, Result};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "HELPTOC_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where and how datasets are fetched
    pub loader: LoaderConfig,
    /// Search behaviour
    pub search: SearchConfig,
    /// Tree construction and activation behaviour
    pub tree: TreeConfig,
    /// Presentation preferences
    pub display: DisplayConfig,
}

/// Dataset acquisition settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Base URL the dataset path is joined onto.
    pub base_url: String,
    /// Dataset name; fetched from `/api/<dataset_name>.json`.
    pub dataset_name: String,
    /// One alternative URL tried once when the primary fetch fails.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Whether queries filter the tree at all.
    pub enabled: bool,
    /// Quiet period before a typed query is applied.
    pub debounce_ms: u64,
    /// Queries shorter than this (after trimming) do not filter.
    pub min_query_length: usize,
}

/// Tree behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Expand ancestors of the item being activated.
    pub auto_expand_active: bool,
    /// How unresolved dataset references are treated.
    pub reference_policy: ReferencePolicy,
}

/// Presentation preferences. The theme is the only persisted UI state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Colour theme.
    pub theme: Theme,
}

/// Colour theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the environment.
    #[default]
    Auto,
    /// Light background.
    Light,
    /// Dark background.
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(Error::Parse(format!(
                "unknown theme '{other}' (expected auto, light or dark)"
            ))),
        }
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5173".to_string(),
            dataset_name: "HelpTOC".to_string(),
            fallback_url: None,
            timeout_secs: 30,
        }
    }
}

impl LoaderConfig {
    /// The primary dataset URL: `<base_url>/api/<dataset_name>.json`.
    pub fn dataset_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)?;
        Ok(base.join(&format!("/api/{}.json", self.dataset_name))?)
    }

    /// The fallback URL, if configured.
    pub fn fallback_url(&self) -> Result<Option<Url>> {
        self.fallback_url
            .as_deref()
            .map(Url::parse)
            .transpose()
            .map_err(Error::from)
    }

    /// Request timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 300,
            min_query_length: 1,
        }
    }
}

impl SearchConfig {
    /// Debounce quiet period.
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            auto_expand_active: true,
            reference_policy: ReferencePolicy::Lenient,
        }
    }
}

impl Config {
    /// Load configuration from `HELPTOC_CONFIG` or the default location, falling back
    /// to defaults when no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to `HELPTOC_CONFIG` or the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// The config file path in use.
    ///
    /// - `HELPTOC_CONFIG` when set
    /// - Linux: `~/.config/helptoc/config.toml`
    /// - macOS: `~/Library/Application Support/dev.helptoc.helptoc/config.toml`
    /// - Windows: `%APPDATA%\helptoc\helptoc\config\config.toml`
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = directories::ProjectDirs::from("dev", "helptoc", "helptoc")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert!(config.search.enabled);
        assert_eq!(config.search.debounce(), Duration::from_millis(300));
        assert_eq!(config.search.min_query_length, 1);
        assert!(config.tree.auto_expand_active);
        assert_eq!(config.tree.reference_policy, ReferencePolicy::Lenient);
        assert_eq!(config.display.theme, Theme::Auto);
        assert_eq!(config.loader.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_dataset_url_joins_api_path() -> Result<()> {
        let loader = LoaderConfig {
            base_url: "https://www.jetbrains.com/help/idea/".into(),
            dataset_name: "HelpTOC".into(),
            ..LoaderConfig::default()
        };
        assert_eq!(
            loader.dataset_url()?.as_str(),
            "https://www.jetbrains.com/api/HelpTOC.json"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_base_url_is_reported() {
        let loader = LoaderConfig {
            base_url: "not a url".into(),
            ..LoaderConfig::default()
        };
        assert!(matches!(loader.dataset_url(), Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_config_save_and_load_roundtrip() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.display.theme = Theme::Dark;
        config.search.debounce_ms = 150;
        config.tree.reference_policy = ReferencePolicy::Strict;
        config.loader.fallback_url = Some("https://mirror.example.com/toc.json".into());

        config.save_to(&path)?;
        assert_eq!(Config::load_from(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_config_load_missing_file_gives_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[display]\ntheme = \"light\"\n")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.display.theme, Theme::Light);
        assert_eq!(config.search, SearchConfig::default());
        Ok(())
    }

    #[test]
    fn test_config_parse_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("invalid.toml");
        fs::write(&path, "this is not valid toml [[[").unwrap();

        match Config::load_from(&path) {
            Err(err @ Error::Serialization(_)) => assert_eq!(err.category(), "serialization"),
            other => panic!("Expected TOML decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_save_into_file_path_reports_io() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "").unwrap();

        let err = Config::default()
            .save_to(&blocker.join("config.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::Io(_)), "got {err:?}");
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" auto ".parse::<Theme>().unwrap(), Theme::Auto);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.to_string(), "light");
    }

    proptest! {
        #[test]
        fn test_search_config_roundtrip(debounce_ms in 0u64..10_000, min in 0usize..16) {
            let config = Config {
                search: SearchConfig { enabled: true, debounce_ms, min_query_length: min },
                ..Config::default()
            };
            let text = toml::to_string_pretty(&config).unwrap();
            let parsed: Config = toml::from_str(&text).unwrap();
            prop_assert_eq!(parsed.search, config.search);
        }
    }
}
