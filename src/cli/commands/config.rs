//! Configuration management commands

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{print_formatted, print_success, OutputFormat};
use crate::config::Config;
use crate::ui::theme::ThemePreset;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Get a specific config value
    Get {
        /// Config key (e.g., "launcher.theme", "launcher.default_category")
        key: String,
    },

    /// Set a config value
    Set {
        /// Config key (e.g., "launcher.theme", "launcher.default_category")
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,

    /// Restore the default configuration
    Reset,
}

#[derive(Serialize)]
struct ConfigPathResult {
    path: String,
    exists: bool,
}

pub async fn run(command: ConfigCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    match command {
        ConfigCommands::Show => show(format).await,
        ConfigCommands::Get { key } => get(&key, format).await,
        ConfigCommands::Set { key, value } => set(&key, &value, quiet).await,
        ConfigCommands::Path => path(format).await,
        ConfigCommands::Reset => reset(quiet).await,
    }
}

async fn show(format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            let toml = toml::to_string_pretty(&config)?;
            println!("{}", toml);
        }
    }

    Ok(())
}

async fn get(key: &str, format: OutputFormat) -> Result<()> {
    let config = Config::load()?;

    // Parse dotted key path and extract value
    let value = get_config_value(&config, key)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&value)?);
        }
        OutputFormat::Text => {
            println!("{}", value);
        }
    }

    Ok(())
}

fn get_config_value(config: &Config, key: &str) -> Result<String> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["launcher", "theme"] => Ok(format!("{:?}", config.launcher.theme)),
        ["launcher", "default_category"] => Ok(config.launcher.default_category.clone()),
        ["launcher", "catalog_path"] => Ok(config
            .launcher
            .catalog_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<built-in>".to_string())),
        _ => anyhow::bail!("Unknown config key: {}", key),
    }
}

async fn set(key: &str, value: &str, quiet: bool) -> Result<()> {
    let mut config = Config::load()?;

    set_config_value(&mut config, key, value)?;
    config.save()?;

    print_success(&format!("Set {} = {}", key, value), quiet);
    Ok(())
}

fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["launcher", "theme"] => {
            config.launcher.theme = parse_theme(value)?;
        }
        ["launcher", "default_category"] => {
            config.launcher.default_category = value.to_string();
        }
        ["launcher", "catalog_path"] => {
            // An empty value restores the built-in catalog
            config.launcher.catalog_path = if value.is_empty() {
                None
            } else {
                Some(PathBuf::from(value))
            };
        }
        _ => anyhow::bail!("Unknown or read-only config key: {}", key),
    }

    Ok(())
}

fn parse_theme(value: &str) -> Result<ThemePreset> {
    match value.to_ascii_lowercase().as_str() {
        "emerald" => Ok(ThemePreset::Emerald),
        "midnight" => Ok(ThemePreset::Midnight),
        "amber" => Ok(ThemePreset::Amber),
        "catppuccin" => Ok(ThemePreset::Catppuccin),
        _ => anyhow::bail!(
            "Unknown theme: {} (expected emerald, midnight, amber, or catppuccin)",
            value
        ),
    }
}

async fn path(format: OutputFormat) -> Result<()> {
    let path = Config::config_path()?;
    let exists = path.exists();

    let result = ConfigPathResult {
        path: path.to_string_lossy().to_string(),
        exists,
    };

    print_formatted(&result, format, |r| {
        format!("{}{}", r.path, if r.exists { "" } else { " (not found)" })
    });

    Ok(())
}

async fn reset(quiet: bool) -> Result<()> {
    let config = Config::default();
    config.save()?;

    print_success("Configuration reset to defaults", quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme_accepts_known_presets() {
        assert!(matches!(parse_theme("emerald"), Ok(ThemePreset::Emerald)));
        assert!(matches!(parse_theme("Midnight"), Ok(ThemePreset::Midnight)));
        assert!(matches!(parse_theme("AMBER"), Ok(ThemePreset::Amber)));
        assert!(parse_theme("solarized").is_err());
    }

    #[test]
    fn test_set_config_value_round_trips_keys() {
        let mut config = Config::default();

        set_config_value(&mut config, "launcher.default_category", "Utilities").unwrap();
        assert_eq!(config.launcher.default_category, "Utilities");

        set_config_value(&mut config, "launcher.catalog_path", "/tmp/catalog.toml").unwrap();
        assert_eq!(
            get_config_value(&config, "launcher.catalog_path").unwrap(),
            "/tmp/catalog.toml"
        );

        set_config_value(&mut config, "launcher.catalog_path", "").unwrap();
        assert_eq!(
            get_config_value(&config, "launcher.catalog_path").unwrap(),
            "<built-in>"
        );

        assert!(set_config_value(&mut config, "game.directory", "/tmp").is_err());
    }
}
