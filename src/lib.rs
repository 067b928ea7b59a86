//! Rush 1000 - A three-lane obstacle dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (difficulty, obstacles, collisions, run state)
//! - `settings`: Arena geometry and driver configuration

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Number of stages in a full run
    pub const MAX_STAGE: u32 = 1000;
    /// Number of lanes the player and obstacles move in
    pub const LANES: u32 = 3;
    /// Lane the player starts each attempt in
    pub const CENTER_LANE: u32 = LANES / 2;

    /// Reference frame duration that obstacle speed is expressed against (60 Hz)
    pub const REFERENCE_FRAME_MS: f64 = 16.67;

    /// Default arena dimensions
    pub const VIEWPORT_WIDTH: f32 = 360.0;
    pub const VIEWPORT_HEIGHT: f32 = 640.0;

    /// Player box: width as a fraction of lane width, fixed height
    pub const PLAYER_WIDTH_RATIO: f32 = 0.48;
    pub const PLAYER_HEIGHT: f32 = 26.0;
    /// Distance from the bottom edge to the top of the player box
    pub const PLAYER_BOTTOM_OFFSET: f32 = 52.0;

    /// Obstacle side as a fraction of lane width
    pub const OBSTACLE_SIZE_RATIO: f32 = 0.45;
    /// Spawn height (just above the visible area)
    pub const OBSTACLE_SPAWN_Y: f32 = -36.0;

    /// Largest frame delta fed to the simulation (avoids jumps after a stall)
    pub const MAX_FRAME_DELTA_MS: f64 = 100.0;
}
