//! Run state machine facade for frame drivers
//!
//! Owns the `RunState`, the random source and lane changes queued between
//! frames. A driver calls `start`/`request_move` from input handlers, `tick`
//! once per frame, then reads `snapshot`.

use super::field::{RandomSource, SeededRandom};
use super::player::{Direction, InvalidDirection};
use super::state::{Arena, GameEvent, RunState, Snapshot};
use super::tick::{TickInput, start, tick};
use crate::settings::Settings;

pub struct RunStateMachine<R: RandomSource = SeededRandom> {
    state: RunState,
    rng: R,
    pending_moves: Vec<Direction>,
}

impl RunStateMachine<SeededRandom> {
    /// Build a run from settings, seeding the RNG from `settings.seed`
    pub fn new(settings: &Settings) -> Self {
        let mut state = RunState::new(settings.arena());
        state.max_frame_delta_ms = settings.max_frame_delta_ms;
        log::info!("Run created with seed: {}", settings.seed);
        Self::with_state(state, SeededRandom::new(settings.seed))
    }
}

impl<R: RandomSource> RunStateMachine<R> {
    pub fn with_state(state: RunState, rng: R) -> Self {
        Self {
            state,
            rng,
            pending_moves: Vec::new(),
        }
    }

    pub fn with_random(arena: Arena, rng: R) -> Self {
        Self::with_state(RunState::new(arena), rng)
    }

    /// Start or restart. Ignored while running.
    pub fn start(&mut self) -> bool {
        let started = start(&mut self.state);
        if started {
            self.pending_moves.clear();
        }
        started
    }

    /// Queue a lane change for the next tick
    pub fn request_move(&mut self, direction: Direction) {
        self.pending_moves.push(direction);
    }

    /// Queue a lane change from a raw -1/+1 value; anything else is ignored
    pub fn request_move_raw(&mut self, direction: i32) -> Result<(), InvalidDirection> {
        match Direction::try_from(direction) {
            Ok(direction) => {
                self.request_move(direction);
                Ok(())
            }
            Err(err) => {
                log::debug!("Ignoring lane change: {}", err);
                Err(err)
            }
        }
    }

    /// Advance one frame. Queued moves are consumed even when not running.
    pub fn tick(&mut self, timestamp_ms: f64) -> Vec<GameEvent> {
        let input = TickInput {
            now_ms: timestamp_ms,
            moves: std::mem::take(&mut self.pending_moves),
        };
        tick(&mut self.state, &input, &mut self.rng)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }
}
