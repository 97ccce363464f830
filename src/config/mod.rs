//! Application Configuration
//!
//! User settings and preferences stored in TOML format.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::vision::recorded::DEFAULT_SUFFIX;
use crate::vision::{MapperConfig, SplitMode};

/// Application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Grid drawing settings
    pub grid: GridSettings,
    /// Recognition mapping settings
    pub recognition: RecognitionSettings,
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Photo scanned most recently
    pub last_photo: Option<PathBuf>,
    /// Suffix of the recorded-observation sidecar next to each photo
    pub observations_suffix: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            last_photo: None,
            observations_suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

/// Grid drawing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Inset keeping border strokes inside the drawable area
    pub inset: f32,
    /// Stroke width of lines inside a 3x3 block
    pub minor_line_width: f32,
    /// Stroke width of the border and block separators
    pub major_line_width: f32,
    /// Digit font size in points
    pub font_size: f32,
    /// Grid line color (RGB)
    pub stroke_color: [u8; 3],
    /// Color of scanned digits (RGB)
    pub initial_color: [u8; 3],
    /// Color of solved digits (RGB)
    pub solved_color: [u8; 3],
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            inset: 1.5,
            minor_line_width: 1.5,
            major_line_width: 2.5,
            font_size: 25.0,
            stroke_color: [85, 85, 85],
            initial_color: [85, 85, 85],
            solved_color: [42, 193, 42],
        }
    }
}

/// Recognition mapping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// Top candidates (the top one included) inspected when it reads "1"
    pub alternate_count: usize,
    /// More than this many "1"s among them confirm the digit
    pub one_confirmation_threshold: usize,
    /// Drop a "1" that fails confirmation
    pub require_one_confirmation: bool,
    /// How merged digit runs are split
    pub split_mode: SplitMode,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        let mapper = MapperConfig::default();
        Self {
            alternate_count: mapper.alternate_count,
            one_confirmation_threshold: mapper.one_confirmation_threshold,
            require_one_confirmation: mapper.require_one_confirmation,
            split_mode: mapper.split_mode,
        }
    }
}

impl From<&RecognitionSettings> for MapperConfig {
    fn from(settings: &RecognitionSettings) -> Self {
        Self {
            alternate_count: settings.alternate_count,
            one_confirmation_threshold: settings.one_confirmation_threshold,
            require_one_confirmation: settings.require_one_confirmation,
            split_mode: settings.split_mode,
        }
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config {:?}", path))?;
    Ok(config)
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config {:?}", path))?;
    Ok(())
}
