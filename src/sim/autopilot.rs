//! Demo mode AI
//!
//! Looks at obstacles bearing down on the player's row and steers into the
//! adjacent lane with the most room. Used by the headless driver and for
//! attract-mode style playback.

use super::player::{Direction, move_lane};
use super::state::RunState;

/// How many reference frames of fall distance count as "too close"
pub const LOOKAHEAD_FRAMES: f32 = 4.0;

/// Vertical room between the player's top edge and the nearest obstacle in
/// `lane` that has not yet fallen past the player. Negative when overlapping.
pub fn lane_clearance(state: &RunState, lane: u32) -> f32 {
    let player = &state.player;
    state
        .obstacles
        .iter()
        .filter(|o| o.lane == lane && o.y < player.y + player.height)
        .map(|o| player.y - (o.y + o.size))
        .fold(f32::INFINITY, f32::min)
}

/// Pick a lane change for this frame, if one is needed
pub fn choose_move(state: &RunState) -> Option<Direction> {
    if !state.is_running() {
        return None;
    }

    let lookahead = state.difficulty().speed * LOOKAHEAD_FRAMES;
    let lane = state.player.lane;
    let current = lane_clearance(state, lane);
    if current > lookahead {
        return None;
    }

    let mut best: Option<(Direction, f32)> = None;
    for direction in [Direction::Left, Direction::Right] {
        let target = move_lane(lane, direction);
        if target == lane {
            continue;
        }
        let room = lane_clearance(state, target);
        if room > current && best.is_none_or(|(_, best_room)| room > best_room) {
            best = Some((direction, room));
        }
    }
    best.map(|(direction, _)| direction)
}
