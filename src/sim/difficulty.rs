//! Per-stage difficulty scaling
//!
//! A single linear interpolation from stage 1 to `MAX_STAGE` drives obstacle
//! speed, spawn cadence and the number of obstacles needed to clear a stage.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_STAGE;

/// Obstacle speed at stage 1 (distance per reference frame)
pub const BASE_SPEED: f32 = 2.2;
/// Speed added across the full stage range
pub const SPEED_RANGE: f32 = 3.8;
/// Spawn interval at stage 1 (ms)
pub const BASE_SPAWN_INTERVAL_MS: f64 = 940.0;
/// Spawn interval removed across the full stage range (ms)
pub const SPAWN_INTERVAL_RANGE_MS: f64 = 430.0;
/// Goal at stage 1
pub const BASE_GOAL: f64 = 8.0;
/// Goal added across the full stage range
pub const GOAL_RANGE: f64 = 44.0;

/// Derived tuning for one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Distance an obstacle falls per 16.67ms reference frame
    pub speed: f32,
    /// Minimum time between two spawns
    pub spawn_interval_ms: f64,
    /// Obstacles that must pass the player to clear the stage
    pub goal_count: u32,
}

/// Clamp any stage number into `[1, MAX_STAGE]`
#[inline]
pub fn clamp_stage(stage: u32) -> u32 {
    stage.clamp(1, MAX_STAGE)
}

/// Compute difficulty for a stage.
///
/// Callers are expected to pass a stage already in range; anything else is
/// an invariant violation (asserted in debug builds, clamped in release).
pub fn compute_difficulty(stage: u32) -> DifficultyParams {
    debug_assert!(
        (1..=MAX_STAGE).contains(&stage),
        "stage {stage} outside 1..={MAX_STAGE}"
    );
    let stage = clamp_stage(stage);
    let t = f64::from(stage - 1) / f64::from(MAX_STAGE - 1);

    DifficultyParams {
        speed: BASE_SPEED + t as f32 * SPEED_RANGE,
        spawn_interval_ms: BASE_SPAWN_INTERVAL_MS - t * SPAWN_INTERVAL_RANGE_MS,
        goal_count: (BASE_GOAL + t * GOAL_RANGE).floor() as u32,
    }
}
