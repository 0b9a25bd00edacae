//! Game settings and tuning
//!
//! Every gameplay constant the session reads comes from here, so a host can
//! swap in a JSON file without recompiling.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings file can be rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === Player ===
    /// Sprite size; collision circle radius is half of this
    pub player_size: f32,
    /// Downward acceleration magnitude (points/s²)
    pub gravity: f32,
    /// Upward velocity applied per tap
    pub flap_impulse: f32,

    // === Obstacles ===
    pub spawn_interval_secs: f32,
    /// Time for an obstacle to scroll across one viewport width
    pub obstacle_crossing_secs: f32,
    pub gap_size_multiple: f32,
    pub barrier_width: f32,
    pub barrier_height: f32,

    // === Backdrop ===
    pub backdrop_tile_width: f32,
    pub backdrop_period_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            player_size: PLAYER_SIZE,
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,

            spawn_interval_secs: SPAWN_INTERVAL_SECS,
            obstacle_crossing_secs: OBSTACLE_CROSSING_SECS,
            gap_size_multiple: GAP_SIZE_MULTIPLE,
            barrier_width: BARRIER_WIDTH,
            // Tall enough that a barrier always reaches past the screen edge
            barrier_height: VIEWPORT_HEIGHT,

            backdrop_tile_width: BACKDROP_TILE_WIDTH,
            backdrop_period_secs: BACKDROP_PERIOD_SECS,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a file, or fall back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}): {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_size", self.player_size),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("obstacle_crossing_secs", self.obstacle_crossing_secs),
            ("gap_size_multiple", self.gap_size_multiple),
            ("barrier_width", self.barrier_width),
            ("barrier_height", self.barrier_height),
            ("backdrop_tile_width", self.backdrop_tile_width),
            ("backdrop_period_secs", self.backdrop_period_secs),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "gravity",
                reason: "must be zero or positive",
            });
        }
        if !(self.flap_impulse.is_finite() && self.flap_impulse >= 0.0) {
            return Err(SettingsError::Invalid {
                field: "flap_impulse",
                reason: "must be zero or positive",
            });
        }
        if self.gap_height() >= self.viewport_height {
            return Err(SettingsError::Invalid {
                field: "gap_size_multiple",
                reason: "gap must be shorter than the viewport",
            });
        }
        // Overlap is sampled once per step, so a barrier must not skip the player
        if self.obstacle_speed() * SIM_DT >= self.barrier_width + self.player_size {
            return Err(SettingsError::Invalid {
                field: "obstacle_crossing_secs",
                reason: "obstacles would move past the player within one step",
            });
        }
        // At most one spawn per step keeps the obstacle count bounded
        if self.spawn_interval_secs < SIM_DT {
            return Err(SettingsError::Invalid {
                field: "spawn_interval_secs",
                reason: "must be at least one simulation step",
            });
        }
        Ok(())
    }

    /// Vertical opening between the two barriers
    pub fn gap_height(&self) -> f32 {
        self.player_size * self.gap_size_multiple
    }

    /// Collision circle radius of the player
    pub fn player_radius(&self) -> f32 {
        self.player_size / 2.0
    }

    /// Leftward scroll speed (points/s)
    pub fn obstacle_speed(&self) -> f32 {
        self.viewport_width / self.obstacle_crossing_secs
    }

    /// Obstacles enter one full width to the right of screen-middle
    pub fn spawn_x(&self) -> f32 {
        self.viewport_width * 1.5
    }

    /// Player start pose: the center of the viewport
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0)
    }

    pub fn backdrop_speed(&self) -> f32 {
        self.backdrop_tile_width / self.backdrop_period_secs
    }
}
