//! Game settings and new-game defaults
//!
//! Stored as a flat JSON object. Missing keys fall back to their defaults,
//! so an empty `{}` is a valid settings file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{EXTRA_LIFE_SCORE, SCREEN_HEIGHT, SCREEN_WIDTH, START_LIVES};
use crate::error::SettingsError;

/// Highest level a new game may start on
pub const MAX_START_LEVEL: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === New game ===
    /// Level a new game starts on
    pub start_level: u32,
    pub lives: u32,
    /// First score threshold for an extra life
    pub extra_life_score: u64,
    /// Fixed RNG seed; random when absent
    pub seed: Option<u64>,

    // === Display ===
    pub screen_width: u32,
    pub screen_height: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_level: 1,
            lives: START_LIVES,
            extra_life_score: EXTRA_LIFE_SCORE,
            seed: None,

            screen_width: SCREEN_WIDTH as u32,
            screen_height: SCREEN_HEIGHT as u32,

            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Clamp values the simulation cannot run with
    pub fn validated(mut self) -> Self {
        self.start_level = self.start_level.clamp(1, MAX_START_LEVEL);
        self.lives = self.lives.max(1);
        self.extra_life_score = self.extra_life_score.max(1);
        self.screen_width = self.screen_width.max(1);
        self.screen_height = self.screen_height.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Read settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("{err}; using default settings");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
