//! Run state and core simulation types
//!
//! Everything the render/UI layer needs each frame is reachable from
//! `RunState::snapshot`.

use serde::{Deserialize, Serialize};

use super::difficulty::{DifficultyParams, clamp_stage, compute_difficulty};
use super::field::Obstacle;
use super::player::Player;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Waiting for a start signal (new run or next stage)
    Ready,
    /// Active gameplay
    Running,
    /// Hit an obstacle; restart retries the same stage
    Lost,
    /// Goal reached; resolved to `Ready` or `RunComplete` within the same tick
    StageCleared,
    /// All stages cleared; restart begins again at stage 1
    RunComplete,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ObstacleSpawned { lane: u32 },
    /// An obstacle fell past the player; `score` is the new total
    ObstaclePassed { score: u32 },
    Collision { lane: u32 },
    /// `score` as it stood when the goal was met
    StageCleared { stage: u32, score: u32 },
    RunComplete,
}

/// Arena geometry, fixed for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub player_height: f32,
    /// Distance from the bottom edge to the player's top edge
    pub player_bottom_offset: f32,
    pub spawn_y: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            spawn_y: OBSTACLE_SPAWN_Y,
        }
    }
}

impl Arena {
    #[inline]
    pub fn lane_width(&self) -> f32 {
        self.width / LANES as f32
    }

    pub fn player_width(&self) -> f32 {
        self.lane_width() * PLAYER_WIDTH_RATIO
    }

    pub fn player_y(&self) -> f32 {
        self.height - self.player_bottom_offset
    }

    pub fn obstacle_size(&self) -> f32 {
        self.lane_width() * OBSTACLE_SIZE_RATIO
    }
}

/// Read-only view for rendering and HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: RunPhase,
    pub stage: u32,
    pub score: u32,
    pub goal_count: u32,
    pub player_lane: u32,
    pub obstacles: Vec<Obstacle>,
    /// Starts on the current stage
    pub attempts: u32,
    /// Highest stage reached this session
    pub best_stage: u32,
}

/// Complete run state, owned by whoever drives the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunState {
    pub phase: RunPhase,
    pub stage: u32,
    pub score: u32,
    pub player: Player,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub last_spawn_ms: f64,
    /// `None` until the first tick of an attempt
    pub last_tick_ms: Option<f64>,
    pub attempts: u32,
    pub best_stage: u32,
    pub arena: Arena,
    pub max_frame_delta_ms: f64,
}

impl RunState {
    /// Fresh run at stage 1, waiting for a start signal
    pub fn new(arena: Arena) -> Self {
        Self {
            phase: RunPhase::Ready,
            stage: 1,
            score: 0,
            player: Player::new(&arena),
            obstacles: Vec::new(),
            last_spawn_ms: 0.0,
            last_tick_ms: None,
            attempts: 0,
            best_stage: 1,
            arena,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
        }
    }

    /// Fresh run positioned at an arbitrary stage (clamped into range)
    pub fn at_stage(arena: Arena, stage: u32) -> Self {
        let clamped = clamp_stage(stage);
        if clamped != stage {
            log::warn!("Stage {} out of range, clamped to {}", stage, clamped);
        }
        let mut state = Self::new(arena);
        state.stage = clamped;
        state.best_stage = clamped;
        state
    }

    pub fn difficulty(&self) -> DifficultyParams {
        compute_difficulty(self.stage)
    }

    /// Clear per-attempt state: score, obstacles, spawn timer, lane
    pub fn reset_attempt(&mut self) {
        self.score = 0;
        self.obstacles.clear();
        self.last_spawn_ms = 0.0;
        self.last_tick_ms = None;
        self.player.recenter();
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            stage: self.stage,
            score: self.score,
            goal_count: self.difficulty().goal_count,
            player_lane: self.player.lane,
            obstacles: self.obstacles.clone(),
            attempts: self.attempts,
            best_stage: self.best_stage,
        }
    }
}
