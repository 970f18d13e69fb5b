//! Configuration management for folio

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classify::{MalformedImage, ParseOptions};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: ThemeVariant,
    pub outline: OutlineConfig,
    pub parser: ParserConfig,
    pub watch: WatchConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

impl ThemeVariant {
    pub fn toggled(self) -> Self {
        match self {
            ThemeVariant::Dark => ThemeVariant::Light,
            ThemeVariant::Light => ThemeVariant::Dark,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub enabled: bool,
    pub side: OutlineSide,
    pub width: u16,
    /// Highlight the section under the top of the viewport while scrolling.
    pub follow_scroll: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub malformed_images: MalformedImage,
    pub skip_delimiter_rows: bool,
    pub normalize_crlf: bool,
}

impl ParserConfig {
    pub fn options(&self) -> ParseOptions {
        ParseOptions {
            malformed_images: self.malformed_images,
            skip_delimiter_rows: self.skip_delimiter_rows,
            normalize_crlf: self.normalize_crlf,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    pub enabled: bool,
    pub auto_reload: bool,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            side: OutlineSide::Left,
            width: 32,
            follow_scroll: false,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_reload: false,
        }
    }
}

impl Config {
    /// Get the platform-specific config file path
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "folio")
            .map(|proj_dirs| proj_dirs.config_dir().join("folio.toml"))
    }

    /// Load configuration from the platform path, falling back to defaults if missing
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                log::info!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        // Check config file permissions (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = std::fs::metadata(path)
                .with_context(|| format!("Failed to stat config file: {}", path.display()))?;
            if metadata.permissions().mode() & 0o002 != 0 {
                anyhow::bail!(
                    "Config file {} is world-writable (insecure permissions)",
                    path.display()
                );
            }
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("loaded config from {}", path.display());
        Ok(config)
    }
}
