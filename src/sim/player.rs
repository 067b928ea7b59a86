//! Player marker and lane changes

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::Arena;
use crate::consts::{CENTER_LANE, LANES};

/// Lane change direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed lane offset (-1 or +1)
    pub fn offset(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Raw direction value that is neither -1 nor +1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid lane direction {0}, expected -1 or +1")]
pub struct InvalidDirection(pub i32);

impl TryFrom<i32> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Move one lane in `direction`, staying put at either edge
#[inline]
pub fn move_lane(lane: u32, direction: Direction) -> u32 {
    let target = lane as i32 + direction.offset();
    target.clamp(0, LANES as i32 - 1) as u32
}

/// The player's marker near the bottom of the arena
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub lane: u32,
    pub width: f32,
    pub height: f32,
    /// Top edge of the player box (constant for the whole run)
    pub y: f32,
}

impl Player {
    pub fn new(arena: &Arena) -> Self {
        Self {
            lane: CENTER_LANE,
            width: arena.player_width(),
            height: arena.player_height,
            y: arena.player_y(),
        }
    }

    pub fn shift(&mut self, direction: Direction) {
        self.lane = move_lane(self.lane, direction);
    }

    pub fn recenter(&mut self) {
        self.lane = CENTER_LANE;
    }
}
