//! Optional TOML configuration (~/.config/roster-cli/config.toml)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_V2_SHEET: &str = "Data";
pub const DEFAULT_OUTPUT: &str = "V2.Overlooked_and_Returned_VALIDATED.xlsx";
pub const DEFAULT_MASTER_SHEET: &str = "master list";
pub const DEFAULT_UNMATCHED_SHEET: &str = "unmatched";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub allops: AllopsConfig,
    pub v2: V2Config,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AllopsConfig {
    /// Roster sheet; the first sheet when unset
    pub sheet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct V2Config {
    pub sheet: String,
}

impl Default for V2Config {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_V2_SHEET.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub master_sheet: String,
    pub unmatched_sheet: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            master_sheet: DEFAULT_MASTER_SHEET.to_string(),
            unmatched_sheet: DEFAULT_UNMATCHED_SHEET.to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, else the user config file, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// ~/.config/roster-cli/config.toml (platform config dir)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("roster-cli").join("config.toml"))
}
