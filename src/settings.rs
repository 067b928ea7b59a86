//! Game settings and driver configuration
//!
//! Loaded from a JSON file by the native driver. Missing fields fall back to
//! their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::state::Arena;

/// Failure to load settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub player_height: f32,
    /// Distance from the bottom edge to the player's top edge
    pub player_bottom_offset: f32,
    /// Height new obstacles appear at (negative = above the viewport)
    pub obstacle_spawn_y: f32,

    // === Timing ===
    /// Frame deltas above this are clamped (ms)
    pub max_frame_delta_ms: f64,

    // === Run ===
    /// RNG seed for obstacle lanes
    pub seed: u64,

    // === Headless driver ===
    /// Simulated frame length (ms)
    pub frame_ms: f64,
    /// Frames to simulate before stopping
    pub max_frames: u64,
    /// Losses allowed before the driver gives up
    pub max_attempts: u32,
    /// Let the demo AI steer
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            obstacle_spawn_y: OBSTACLE_SPAWN_Y,

            max_frame_delta_ms: MAX_FRAME_DELTA_MS,

            seed: 1,

            frame_ms: REFERENCE_FRAME_MS,
            max_frames: 60 * 60 * 10,
            max_attempts: 3,
            autopilot: true,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_height", self.player_height),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if self.player_bottom_offset < self.player_height
            || self.player_bottom_offset > self.viewport_height
        {
            return Err(SettingsError::Invalid(format!(
                "player_bottom_offset {} must lie between player_height and viewport_height",
                self.player_bottom_offset
            )));
        }
        if !(self.max_frame_delta_ms > 0.0) || !(self.frame_ms > 0.0) {
            return Err(SettingsError::Invalid(
                "frame timings must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena {
            width: self.viewport_width,
            height: self.viewport_height,
            player_height: self.player_height,
            player_bottom_offset: self.player_bottom_offset,
            spawn_y: self.obstacle_spawn_y,
        }
    }
}
