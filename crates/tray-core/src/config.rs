use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, TrayError};
use crate::utils::NaiveZone;

/// Top-level configuration for the tray tools
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrayConfig {
    pub clean: CleanConfig,
    pub convert: ConvertConfig,
    pub logging: LoggingConfig,
}

/// Settings for `tray-clean`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanConfig {
    /// Directory holding the tray files (not searched recursively)
    pub tray_dir: PathBuf,
    /// Extension of tray files; their content is JSON regardless
    pub extension: String,
    /// Report what would change without touching any file
    pub dry_run: bool,
}

/// Settings for `tray-convey`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Legacy export to read
    pub input: PathBuf,
    /// Replace every id with a fresh UUID v4
    pub remap_ids: bool,
    /// Zone for `created_dt` values without an offset
    pub naive_timezone: NaiveZone,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            tray_dir: PathBuf::from("trays"),
            extension: "md".to_string(),
            dry_run: false,
        }
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/past2"),
            remap_ids: false,
            naive_timezone: NaiveZone::Local,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl TrayConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Load config from a specific path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TrayError::io(path, e))?;
        Self::from_yaml(&content)
    }

    /// Load `path` if given, built-in defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }
}
