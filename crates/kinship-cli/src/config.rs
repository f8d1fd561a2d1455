//! CLI configuration

use std::path::{Path, PathBuf};

use kinship_core::LayoutConfig;
use serde::{Deserialize, Serialize};

/// Get default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kinship")
        .join("config.toml")
}

/// Config file path, honoring an explicit override
pub fn config_file_path(override_path: Option<&Path>) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_config_path)
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Family snapshot used when --data is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Root member used when --root is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_root: Option<String>,

    /// Card geometry for layout
    pub layout: LayoutConfig,
}

impl Config {
    /// Load the config file; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Write the config file, creating its directory if needed
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Keys accepted by get/set
    pub fn keys() -> &'static [&'static str] {
        &[
            "data_file",
            "default_root",
            "layout.card_width",
            "layout.card_height",
            "layout.horizontal_gap",
            "layout.vertical_gap",
        ]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_file" => self.data_file.as_ref().map(|p| p.display().to_string()),
            "default_root" => self.default_root.clone(),
            "layout.card_width" => Some(self.layout.card_width.to_string()),
            "layout.card_height" => Some(self.layout.card_height.to_string()),
            "layout.horizontal_gap" => Some(self.layout.horizontal_gap.to_string()),
            "layout.vertical_gap" => Some(self.layout.vertical_gap.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_file" => self.data_file = Some(PathBuf::from(value)),
            "default_root" => self.default_root = Some(value.to_string()),
            "layout.card_width" => self.layout.card_width = parse_pixels(key, value)?,
            "layout.card_height" => self.layout.card_height = parse_pixels(key, value)?,
            "layout.horizontal_gap" => self.layout.horizontal_gap = parse_pixels(key, value)?,
            "layout.vertical_gap" => self.layout.vertical_gap = parse_pixels(key, value)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }

    /// Put one key back to its default value
    pub fn unset(&mut self, key: &str) -> anyhow::Result<()> {
        let defaults = LayoutConfig::default();
        match key {
            "data_file" => self.data_file = None,
            "default_root" => self.default_root = None,
            "layout.card_width" => self.layout.card_width = defaults.card_width,
            "layout.card_height" => self.layout.card_height = defaults.card_height,
            "layout.horizontal_gap" => self.layout.horizontal_gap = defaults.horizontal_gap,
            "layout.vertical_gap" => self.layout.vertical_gap = defaults.vertical_gap,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_pixels(key: &str, value: &str) -> anyhow::Result<f64> {
    let pixels: f64 = value
        .parse()
        .map_err(|_| anyhow::anyhow!("{} must be a number, got '{}'", key, value))?;
    if !pixels.is_finite() || pixels < 0.0 {
        anyhow::bail!("{} must be a non-negative number, got '{}'", key, value);
    }
    Ok(pixels)
}
