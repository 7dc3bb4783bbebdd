//! Brandeis Config
//!
//! This crate handles configuration loading and management
//! for brandeis, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/brandeis/config.toml`
//! - macOS: `~/Library/Application Support/brandeis/config.toml`
//! - Windows: `%APPDATA%\brandeis\config.toml`

mod links;
mod sectionize;
mod stages;

pub use links::LinksConfig;
pub use sectionize::SectionizeConfig;
pub use stages::StagesConfig;

use brandeis_core::{BrandeisError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml::Table;

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[links]
CasePaths = ["/cases/federal/us/"]
PageClass = "page-name"

[stages]
Footnotes  = true
Sectionize = true
TokenLog   = false

[sectionize]
ParagraphLimit = 400
MarkerWidth    = 80
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Link filtering configuration
    #[serde(default)]
    pub links: LinksConfig,

    /// Post-processing stage flags
    #[serde(default)]
    pub stages: StagesConfig,

    /// Sectionize heuristics
    #[serde(default)]
    pub sectionize: SectionizeConfig,
}

impl Default for Config {
    fn default() -> Self {
        // Parse the default TOML to ensure consistency
        toml::from_str(DEFAULT_TOML).expect("Default TOML should be valid")
    }
}

impl Config {
    /// Returns the default TOML configuration string.
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "brandeis")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Ensures the config file exists, creating it with defaults if not.
    pub fn ensure_config_file() -> Result<PathBuf> {
        let config_dir = Self::config_dir().ok_or_else(|| {
            BrandeisError::Config("Could not determine config directory".into())
        })?;

        std::fs::create_dir_all(&config_dir)?;

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_TOML)?;
        }

        Ok(config_path)
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            BrandeisError::Config(format!("Parse error in {}: {}", path.display(), e))
        })
    }

    /// Load configuration with an optional override file or inline TOML.
    ///
    /// `override_config` is read as a file when such a path exists and as
    /// TOML otherwise. Only the keys it sets replace the user's file; every
    /// other key keeps its file or default value.
    ///
    /// ```no_run
    /// use brandeis_config::Config;
    ///
    /// let config = Config::load_with_override(Some("[stages]\nSectionize = false")).unwrap();
    /// assert!(!config.stages.sectionize);
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let Some(override_str) = override_config else {
            return Self::load();
        };

        let base = match Self::config_path() {
            Some(path) if path.exists() => std::fs::read_to_string(&path)?,
            _ => String::new(),
        };

        let override_path = Path::new(override_str);
        let override_toml = if override_path.exists() {
            std::fs::read_to_string(override_path)?
        } else {
            override_str.to_string()
        };

        Self::layered(&base, &override_toml)
    }

    /// Parse `base`, then apply the keys set in `overrides` on top of it.
    fn layered(base: &str, overrides: &str) -> Result<Self> {
        let mut table: Table = toml::from_str(base)
            .map_err(|e| BrandeisError::Config(format!("Parse error: {}", e)))?;
        let overrides: Table = toml::from_str(overrides)
            .map_err(|e| BrandeisError::Config(format!("Override parse error: {}", e)))?;
        merge_tables(&mut table, overrides);

        toml::Value::Table(table)
            .try_into()
            .map_err(|e| BrandeisError::Config(format!("Override parse error: {}", e)))
    }
}

/// Copy every key of `other` into `base`, descending into nested tables.
fn merge_tables(base: &mut Table, other: Table) {
    for (key, value) in other {
        if let toml::Value::Table(nested) = value {
            if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
                merge_tables(existing, nested);
                continue;
            }
            base.insert(key, toml::Value::Table(nested));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.stages.footnotes);
        assert!(config.stages.sectionize);
        assert!(!config.stages.token_log);
        assert_eq!(config.links.page_class, "page-name");
        assert_eq!(config.sectionize.paragraph_limit, 400);
    }

    #[test]
    fn test_default_toml_parses() {
        let config: Config = toml::from_str(DEFAULT_TOML).unwrap();
        assert_eq!(config.links.case_paths, vec!["/cases/federal/us/"]);
        assert_eq!(config.sectionize.marker_width, 80);
    }

    #[test]
    fn test_empty_toml_matches_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.links, LinksConfig::default());
        assert_eq!(config.sectionize, SectionizeConfig::default());
    }

    #[test]
    fn test_layered_override() {
        let config = Config::layered(
            "",
            "[stages]\nSectionize = false\n[sectionize]\nMarkerWidth = 10",
        )
        .unwrap();
        assert!(!config.stages.sectionize);
        assert!(config.stages.footnotes);
        assert_eq!(config.sectionize.marker_width, 10);
        assert_eq!(config.sectionize.paragraph_limit, 400);
    }

    #[test]
    fn test_layered_override_keeps_unset_file_keys() {
        let base = "[stages]\nFootnotes = false\n[links]\nPageClass = \"page\"";
        let config = Config::layered(base, "[sectionize]\nMarkerWidth = 10").unwrap();
        assert!(!config.stages.footnotes);
        assert_eq!(config.links.page_class, "page");
        assert_eq!(config.sectionize.marker_width, 10);
    }

    #[test]
    fn test_layered_override_replaces_set_keys() {
        let base = "[stages]\nFootnotes = false\nSectionize = false";
        let config = Config::layered(base, "[stages]\nFootnotes = true").unwrap();
        assert!(config.stages.footnotes);
        assert!(!config.stages.sectionize);
    }

    #[test]
    fn test_layered_bad_override() {
        let err = Config::layered("", "[stages").unwrap_err();
        assert!(matches!(err, BrandeisError::Config(_)));
    }

    #[test]
    fn test_config_path() {
        // On CI/containers this might be None, so we just check it doesn't panic
        if let Some(p) = Config::config_path() {
            assert!(p.to_string_lossy().contains("brandeis"));
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.links, parsed.links);
        assert_eq!(config.stages.footnotes, parsed.stages.footnotes);
    }
}
