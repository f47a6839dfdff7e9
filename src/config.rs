use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ui::theme::ThemePreset;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub launcher: LauncherConfig,
}

/// Launcher behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Color theme for the UI
    #[serde(default)]
    pub theme: ThemePreset,
    /// Category selected at startup
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Optional catalog file replacing the built-in one
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::default(),
            default_category: default_category(),
            catalog_path: None,
        }
    }
}

fn default_category() -> String {
    "Development".to_string()
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("com", "quickinstall", "QuickInstall")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        let config_dir = dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::info!("Loaded configuration from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("No configuration file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration, falling back to defaults on any failure.
    /// A broken config file must not keep the launcher from starting.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load configuration: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.launcher.theme, ThemePreset::Emerald);
        assert_eq!(config.launcher.default_category, "Development");
        assert!(config.launcher.catalog_path.is_none());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let mut config = Config::default();
        config.launcher.theme = ThemePreset::Midnight;
        config.launcher.default_category = "Games".to_string();
        config.launcher.catalog_path = Some(PathBuf::from("/tmp/catalog.toml"));

        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.launcher.theme, ThemePreset::Midnight);
        assert_eq!(parsed.launcher.default_category, "Games");
        assert_eq!(
            parsed.launcher.catalog_path,
            Some(PathBuf::from("/tmp/catalog.toml"))
        );
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str("[launcher]\n").unwrap();
        assert_eq!(parsed.launcher.default_category, "Development");

        let parsed: Config = toml::from_str("").unwrap();
        assert_eq!(parsed.launcher.default_category, "Development");
    }
}
