//! User configuration, persisted as JSON in the platform config directory

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::PaintError;
use crate::app_meta::{APP_CONFIG_DIR_NAME, APP_CONFIG_FILE_NAME};
use crate::canvas::Color;
use crate::paint::DEFAULT_BRUSH_SIZE;

/// Largest canvas edge accepted, in pixels
pub const MAX_CANVAS_DIMENSION: u32 = 16384;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaintConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub background: Color,
    pub ink: Color,
    pub brush_size: u32,
    pub share_file_name: String,
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            background: Color::WHITE,
            ink: Color::BLACK,
            brush_size: DEFAULT_BRUSH_SIZE,
            share_file_name: "untitled.png".to_string(),
        }
    }
}

impl PaintConfig {
    pub fn validate(&self) -> Result<(), PaintError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PaintError::InvalidConfig(
                "Canvas dimensions must be greater than 0".into(),
            ));
        }

        if self.canvas_width > MAX_CANVAS_DIMENSION || self.canvas_height > MAX_CANVAS_DIMENSION {
            return Err(PaintError::InvalidConfig(format!(
                "Canvas dimensions cannot exceed {} pixels",
                MAX_CANVAS_DIMENSION
            )));
        }

        if self.brush_size == 0 {
            return Err(PaintError::InvalidConfig(
                "Brush size must be greater than 0".into(),
            ));
        }

        if self.share_file_name.trim().is_empty() {
            return Err(PaintError::InvalidConfig(
                "Share file name must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Load from `path`. A missing file gives defaults; a broken or invalid one
    /// is logged and also gives defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }

        let config: Self = match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("Failed to parse config {:?}: {}", path, err);
                    return Self::default();
                }
            },
            Err(err) => {
                tracing::warn!("Failed to read config {:?}: {}", path, err);
                return Self::default();
            }
        };

        if let Err(err) = config.validate() {
            tracing::warn!("Ignoring config {:?}: {}", path, err);
            return Self::default();
        }

        tracing::info!(
            "Loaded config: {}x{} canvas, brush {}",
            config.canvas_width,
            config.canvas_height,
            config.brush_size
        );
        config
    }

    /// Load from the platform config directory
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_CONFIG_DIR_NAME)
        .join(APP_CONFIG_FILE_NAME)
}
