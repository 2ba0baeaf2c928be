//! Editor configuration.

use crate::commands::MAX_UNDO_HISTORY;
use crate::snap::{ANGLE_STEPS, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Pixel distance that maps to a 45° skew.
pub const SKEW_SENSITIVITY: f64 = 22.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for gesture handling. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid unit used when the snap modifier is held while dragging.
    pub grid_size: f64,
    /// Divisor turning a skew drag distance into an angle via `atan2`.
    pub skew_sensitivity: f64,
    /// Rotation steps per half turn when the snap modifier is held.
    pub angle_steps: f64,
    /// Undo depth of the slide's command list.
    pub max_undo_history: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            skew_sensitivity: SKEW_SENSITIVITY,
            angle_steps: ANGLE_STEPS,
            max_undo_history: MAX_UNDO_HISTORY,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded editor config from {:?}", path.as_ref());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
