use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Pad the printable TM30 form with blank rows up to the ten-row page.
    /// Older printouts always padded; newer ones dropped it, so it is a
    /// setting rather than fixed behavior.
    #[serde(default = "default_pad_report_rows")]
    pub pad_report_rows: bool,
    /// Where submitted TM30 HTML files are written. Defaults to the data
    /// directory next to the store.
    #[serde(default)]
    pub report_output_dir: Option<PathBuf>,
}

fn default_pad_report_rows() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pad_report_rows: default_pad_report_rows(),
            report_output_dir: None,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("guesthouse-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".guesthouse-cli")
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(&config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_pad_report_rows() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.settings.pad_report_rows);
        assert!(config.settings.report_output_dir.is_none());
    }

    #[test]
    fn test_padding_can_be_disabled_in_toml() {
        let config: Config = toml::from_str("[settings]\npad_report_rows = false\n").unwrap();
        assert!(!config.settings.pad_report_rows);
    }
}
