// Global configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Banner line printed at startup
    #[serde(default = "default_banner")]
    pub banner: String,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default Constant Rate Factor when --crf is not given
    #[serde(default = "default_crf")]
    pub crf: i32,
}

fn default_banner() -> String {
    "VIDPRESS Video Compression Utility".to_string()
}

fn default_crf() -> i32 {
    28
}

impl Default for Config {
    fn default() -> Self {
        Self {
            banner: default_banner(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { crf: default_crf() }
    }
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "macos") {
            dirs::home_dir()
                .context("Could not determine home directory")?
                .join(".config")
                .join("vidpress")
        } else {
            dirs::config_dir()
                .context("Could not determine config directory")?
                .join("vidpress")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from disk, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;

            let config: Config = toml::from_str(&contents).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;

            Ok(config)
        } else {
            let config = Config::default();

            // Missing or unwritable config dir is not fatal; run with the
            // built-in defaults.
            if let Err(e) = config.save() {
                eprintln!("Warning: Could not create default config file: {e}");
                eprintln!(
                    "Using built-in defaults. Run 'vidpress init-config' to create a config file."
                );
            }

            Ok(config)
        }
    }

    /// Save config to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(())
    }

    /// Check if config file exists
    pub fn exists() -> bool {
        Self::config_path().map(|p| p.exists()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.defaults.crf, 28);
        assert_eq!(config.banner, "VIDPRESS Video Compression Utility");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();

        let deserialized: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized.defaults.crf, config.defaults.crf);
        assert_eq!(deserialized.banner, config.banner);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.defaults.crf, 28);
        assert_eq!(config.banner, "VIDPRESS Video Compression Utility");

        let config: Config = toml::from_str("[defaults]\ncrf = 20\n").unwrap();
        assert_eq!(config.defaults.crf, 20);
    }
}
