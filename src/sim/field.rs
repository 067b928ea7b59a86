//! Live obstacles: spawning, falling and pruning

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::compute_difficulty;
use super::state::Arena;
use crate::consts::{LANES, REFERENCE_FRAME_MS};

/// A falling block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub lane: u32,
    /// Top edge; negative while above the visible area
    pub y: f32,
    /// Side length of the square block
    pub size: f32,
}

/// Uniform random source in `[0, 1)`
pub trait RandomSource {
    fn sample(&mut self) -> f64;
}

/// Seeded PCG source used for real runs
#[derive(Debug, Clone)]
pub struct SeededRandom {
    pub seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn sample(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Spawn one obstacle if a full spawn interval has elapsed since `last_spawn_ms`.
///
/// Returns the new obstacle (if any) and the updated last spawn time. A long
/// stall still produces a single spawn.
pub fn maybe_spawn<R: RandomSource + ?Sized>(
    now_ms: f64,
    stage: u32,
    last_spawn_ms: f64,
    arena: &Arena,
    rng: &mut R,
) -> (Option<Obstacle>, f64) {
    let interval = compute_difficulty(stage).spawn_interval_ms;
    if now_ms - last_spawn_ms < interval {
        return (None, last_spawn_ms);
    }

    // Guard against a source returning exactly 1.0
    let lane = ((rng.sample() * f64::from(LANES)).floor() as u32).min(LANES - 1);
    let obstacle = Obstacle {
        lane,
        y: arena.spawn_y,
        size: arena.obstacle_size(),
    };
    (Some(obstacle), now_ms)
}

/// Move every obstacle down by `speed` per reference frame elapsed
pub fn advance(obstacles: &mut [Obstacle], delta_ms: f64, speed: f32) {
    let step = speed * (delta_ms / REFERENCE_FRAME_MS) as f32;
    for obstacle in obstacles.iter_mut() {
        obstacle.y += step;
    }
}

/// Remove obstacles that fell past the bottom edge, returning how many left
pub fn prune(obstacles: &mut Vec<Obstacle>, viewport_height: f32) -> u32 {
    let before = obstacles.len();
    obstacles.retain(|o| o.y <= viewport_height + o.size);
    (before - obstacles.len()) as u32
}
