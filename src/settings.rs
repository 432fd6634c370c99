//! Display preferences
//!
//! Persisted separately from run state as JSON on disk. The engine never
//! reads these; they only shape what the presentation side shows.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Presentation settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Show the matrix/grid block in scene output
    pub show_grid: bool,
    /// Show ship and target coordinates
    pub show_coordinates: bool,
    /// Keep and show recent applied-vector trails
    pub show_vector_trails: bool,
    /// How many trails to keep
    pub max_trails: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_coordinates: true,
            show_vector_trails: true,
            max_trails: 5,
        }
    }
}

impl Settings {
    /// Trail cap with the toggle applied
    pub fn effective_max_trails(&self) -> usize {
        if self.show_vector_trails {
            self.max_trails
        } else {
            0
        }
    }

    /// Load settings from disk, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Ignoring malformed settings file: {e}");
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Save settings to disk (failures are logged, not fatal)
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(path, json) {
                    log::warn!("Failed to save settings: {e}");
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to serialize settings: {e}"),
        }
    }
}
