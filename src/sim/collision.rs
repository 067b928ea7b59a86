//! Axis-aligned hitbox overlap between the player and obstacles
//!
//! Both boxes are horizontally centered in their lane. Touching edges do not
//! count as a hit.

use glam::Vec2;

use super::field::Obstacle;
use super::player::Player;

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub min: Vec2,
    pub size: Vec2,
}

impl Hitbox {
    /// Box of `width` x `height` centered in `lane`, top edge at `y`
    pub fn in_lane(lane: u32, lane_width: f32, width: f32, height: f32, y: f32) -> Self {
        let x = lane as f32 * lane_width + (lane_width - width) / 2.0;
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Hitbox) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && other.min.x < a_max.x && self.min.y < b_max.y && other.min.y < a_max.y
    }
}

pub fn player_hitbox(player: &Player, lane_width: f32) -> Hitbox {
    Hitbox::in_lane(player.lane, lane_width, player.width, player.height, player.y)
}

pub fn obstacle_hitbox(obstacle: &Obstacle, lane_width: f32) -> Hitbox {
    Hitbox::in_lane(obstacle.lane, lane_width, obstacle.size, obstacle.size, obstacle.y)
}

/// Does the player's box overlap this obstacle's box
pub fn collides(player: &Player, obstacle: &Obstacle, lane_width: f32) -> bool {
    player_hitbox(player, lane_width).overlaps(&obstacle_hitbox(obstacle, lane_width))
}
