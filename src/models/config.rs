use serde::Deserialize;
use std::path::{Path, PathBuf};

use pixel_grid::{DEFAULT_GRID_SIZE, DEFAULT_LEVELS};

use crate::models::theme::ThemeConfig;
use crate::services::slideshow::TransitionKind;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Sampling and quantization settings
    pub grid: GridConfig,

    /// Target display area
    pub display: DisplayConfig,

    /// Palette role colors
    pub theme: ThemeConfig,

    /// Artifacts shown by the `slideshow` command
    pub slideshow: SlideshowConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of the square grid
    pub size: usize,

    /// Number of intensity levels
    pub levels: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
            levels: DEFAULT_LEVELS,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Artifact files, one encoded grid per file
    pub artifacts: Vec<PathBuf>,

    /// Cosmetic transition label (cut, fade, slide, zoom)
    pub transition: String,
}

impl SlideshowConfig {
    pub fn transition_kind(&self) -> TransitionKind {
        TransitionKind::from_label(&self.transition)
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, or defaults if there is none.
    ///
    /// Unreadable or malformed files are logged and replaced by defaults.
    pub fn load_from_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Self::default();
        };
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        grid_size = config.grid.size,
                        levels = config.grid.levels,
                        artifacts = config.slideshow.artifacts.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(
                    %e,
                    path = %path.display(),
                    "Failed to read config, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
