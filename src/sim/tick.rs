//! Per-frame simulation step
//!
//! Core game loop that advances a `RunState` by one externally timed frame.

use super::collision::collides;
use super::field::{RandomSource, advance, maybe_spawn, prune};
use super::player::Direction;
use super::state::{GameEvent, RunPhase, RunState};
use crate::consts::MAX_STAGE;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Frame timestamp (ms, monotonically increasing)
    pub now_ms: f64,
    /// Lane changes queued since the previous tick, applied in order
    pub moves: Vec<Direction>,
}

/// Elapsed time since the previous tick, clamped to `[0, max_delta_ms]`
pub fn frame_delta(last_tick_ms: Option<f64>, now_ms: f64, max_delta_ms: f64) -> f64 {
    let Some(last) = last_tick_ms else {
        return 0.0;
    };
    let delta = now_ms - last;
    if delta <= 0.0 || !delta.is_finite() {
        return 0.0;
    }
    if delta > max_delta_ms {
        log::warn!("Frame delta {:.1}ms clamped to {:.1}ms", delta, max_delta_ms);
        return max_delta_ms;
    }
    delta
}

/// Handle a start signal. Returns false (and changes nothing) while running.
pub fn start(state: &mut RunState) -> bool {
    match state.phase {
        RunPhase::Running => {
            log::debug!("Start ignored, stage {} already running", state.stage);
            return false;
        }
        RunPhase::RunComplete => {
            state.stage = 1;
            state.attempts = 0;
        }
        RunPhase::Ready | RunPhase::Lost | RunPhase::StageCleared => {}
    }

    state.reset_attempt();
    state.attempts += 1;
    state.phase = RunPhase::Running;
    log::info!("Stage {} started (attempt {})", state.stage, state.attempts);
    true
}

/// Advance the run by one frame
pub fn tick<R: RandomSource + ?Sized>(
    state: &mut RunState,
    input: &TickInput,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Nothing simulates outside of Running
    if !state.is_running() {
        return events;
    }

    let delta = frame_delta(state.last_tick_ms, input.now_ms, state.max_frame_delta_ms);
    state.last_tick_ms = Some(input.now_ms);

    for &direction in &input.moves {
        state.player.shift(direction);
    }

    let params = state.difficulty();

    let (spawned, last_spawn) =
        maybe_spawn(input.now_ms, state.stage, state.last_spawn_ms, &state.arena, rng);
    state.last_spawn_ms = last_spawn;
    if let Some(obstacle) = spawned {
        log::debug!("Spawned obstacle in lane {}", obstacle.lane);
        events.push(GameEvent::ObstacleSpawned { lane: obstacle.lane });
        state.obstacles.push(obstacle);
    }

    advance(&mut state.obstacles, delta, params.speed);

    // Collisions are checked against the full pre-prune set so a hit always
    // wins over a goal reached in the same frame
    let lane_width = state.arena.lane_width();
    if let Some(hit) = state
        .obstacles
        .iter()
        .find(|o| collides(&state.player, o, lane_width))
    {
        events.push(GameEvent::Collision { lane: hit.lane });
        state.phase = RunPhase::Lost;
        log::info!(
            "Lost on stage {} with {}/{}",
            state.stage,
            state.score,
            params.goal_count
        );
        return events;
    }

    let passed = prune(&mut state.obstacles, state.arena.height);
    for _ in 0..passed {
        state.score += 1;
        log::debug!("Obstacle passed, score {}", state.score);
        events.push(GameEvent::ObstaclePassed { score: state.score });
    }

    if state.score >= params.goal_count {
        events.push(GameEvent::StageCleared {
            stage: state.stage,
            score: state.score,
        });
        state.phase = RunPhase::StageCleared;
        resolve_stage_clear(state, &mut events);
    }

    events
}

/// Move a cleared stage on to the next one, or finish the run after the last
fn resolve_stage_clear(state: &mut RunState, events: &mut Vec<GameEvent>) {
    if state.phase != RunPhase::StageCleared {
        return;
    }

    if state.stage >= MAX_STAGE {
        log::info!("All {} stages cleared", MAX_STAGE);
        state.best_stage = MAX_STAGE;
        state.stage = 1;
        state.obstacles.clear();
        state.phase = RunPhase::RunComplete;
        events.push(GameEvent::RunComplete);
        return;
    }

    state.stage += 1;
    state.best_stage = state.best_stage.max(state.stage);
    state.attempts = 0;
    state.reset_attempt();
    state.phase = RunPhase::Ready;
    log::info!("Stage cleared, advanced to stage {}", state.stage);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CENTER_LANE, REFERENCE_FRAME_MS};
    use crate::sim::field::Obstacle;
    use crate::sim::field::tests::ScriptedRandom;
    use crate::sim::state::Arena;

    fn running_state() -> RunState {
        let mut state = RunState::new(Arena::default());
        assert!(start(&mut state));
        state
    }

    fn at(now_ms: f64) -> TickInput {
        TickInput {
            now_ms,
            ..Default::default()
        }
    }

    /// Obstacle that clears the bottom edge on the next reference frame
    fn about_to_pass(state: &RunState, lane: u32) -> Obstacle {
        let size = state.arena.obstacle_size();
        Obstacle {
            lane,
            y: state.arena.height + size - 1.0,
            size,
        }
    }

    #[test]
    fn test_frame_delta() {
        assert_eq!(frame_delta(None, 500.0, 100.0), 0.0);
        assert_eq!(frame_delta(Some(500.0), 516.0, 100.0), 16.0);
        assert_eq!(frame_delta(Some(500.0), 400.0, 100.0), 0.0);
        assert_eq!(frame_delta(Some(500.0), 5000.0, 100.0), 100.0);
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut state = RunState::new(Arena::default());
        let mut rng = ScriptedRandom::new(&[0.0]);
        let events = tick(&mut state, &at(5000.0), &mut rng);
        assert!(events.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.last_tick_ms, None);
    }

    #[test]
    fn test_first_tick_has_no_motion() {
        let mut state = running_state();
        state.obstacles.push(Obstacle { lane: 0, y: 100.0, size: 54.0 });
        let mut rng = ScriptedRandom::new(&[0.0]);

        tick(&mut state, &at(10.0), &mut rng);
        assert_eq!(state.obstacles[0].y, 100.0);

        tick(&mut state, &at(10.0 + REFERENCE_FRAME_MS), &mut rng);
        assert!((state.obstacles[0].y - 102.2).abs() < 1e-3);
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.9]);

        let events = tick(&mut state, &at(939.0), &mut rng);
        assert!(events.is_empty());

        let events = tick(&mut state, &at(941.0), &mut rng);
        assert_eq!(events, vec![GameEvent::ObstacleSpawned { lane: 2 }]);
        assert_eq!(state.last_spawn_ms, 941.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_moves_applied_in_order_and_clamped() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.0]);
        let input = TickInput {
            now_ms: 1.0,
            moves: vec![Direction::Left, Direction::Left, Direction::Left],
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.player.lane, 0);

        let input = TickInput {
            now_ms: 2.0,
            moves: vec![Direction::Right, Direction::Right, Direction::Left],
        };
        tick(&mut state, &input, &mut rng);
        assert_eq!(state.player.lane, 1);
    }

    #[test]
    fn test_collision_loses() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.0]);
        let lane = state.player.lane;
        let y = state.player.y - 10.0;
        state.obstacles.push(Obstacle { lane, y, size: 54.0 });

        let events = tick(&mut state, &at(1.0), &mut rng);
        assert_eq!(events, vec![GameEvent::Collision { lane }]);
        assert_eq!(state.phase, RunPhase::Lost);

        // Halted until restarted
        let stage = state.stage;
        assert!(tick(&mut state, &at(100.0), &mut rng).is_empty());
        assert!(start(&mut state));
        assert_eq!(state.stage, stage);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.attempts, 2);
    }

    #[test]
    fn test_goal_clears_stage_with_exact_score() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.0]);
        let goal = state.difficulty().goal_count;
        assert_eq!(goal, 8);

        tick(&mut state, &at(0.0), &mut rng);

        // Keep obstacles off the player's lane so only passes matter
        let mut now = 0.0;
        let mut cleared = None;
        for _ in 0..goal {
            let obstacle = about_to_pass(&state, 0);
            state.obstacles.push(obstacle);
            now += REFERENCE_FRAME_MS;
            for event in tick(&mut state, &at(now), &mut rng) {
                if let GameEvent::StageCleared { stage, score } = event {
                    assert!(cleared.is_none());
                    cleared = Some((stage, score));
                }
            }
        }

        assert_eq!(cleared, Some((1, 8)));
        assert_eq!(state.phase, RunPhase::Ready);
        assert_eq!(state.stage, 2);
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.best_stage, 2);
    }

    #[test]
    fn test_several_passes_in_one_frame_all_count() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.0]);
        for lane in [0, 2, 0] {
            let obstacle = about_to_pass(&state, lane);
            state.obstacles.push(obstacle);
        }
        tick(&mut state, &at(1.0), &mut rng);
        let events = tick(&mut state, &at(1.0 + REFERENCE_FRAME_MS), &mut rng);
        let passes = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
            .count();
        assert_eq!(passes, 3);
        assert_eq!(state.score, 3);
    }

    #[test]
    fn test_collision_beats_goal_in_same_frame() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.0]);
        state.score = state.difficulty().goal_count - 1;

        let passing = about_to_pass(&state, 0);
        state.obstacles.push(passing);
        // Reaches the player's top edge only once it moves
        let lane = state.player.lane;
        let size = state.arena.obstacle_size();
        let y = state.player.y - size - 1.0;
        state.obstacles.push(Obstacle { lane, y, size });

        tick(&mut state, &at(1.0), &mut rng);
        assert_eq!(state.phase, RunPhase::Running);
        let events = tick(&mut state, &at(1.0 + REFERENCE_FRAME_MS), &mut rng);

        assert_eq!(state.phase, RunPhase::Lost);
        assert!(events.contains(&GameEvent::Collision { lane }));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::StageCleared { .. })));
        assert_eq!(state.stage, 1);
    }

    #[test]
    fn test_last_stage_completes_run() {
        let mut state = RunState::at_stage(Arena::default(), MAX_STAGE);
        assert!(start(&mut state));
        let mut rng = ScriptedRandom::new(&[0.0]);
        state.score = state.difficulty().goal_count - 1;
        let passing = about_to_pass(&state, 2);
        state.obstacles.push(passing);

        tick(&mut state, &at(1.0), &mut rng);
        let events = tick(&mut state, &at(1.0 + REFERENCE_FRAME_MS), &mut rng);

        assert!(events.contains(&GameEvent::RunComplete));
        assert_eq!(state.phase, RunPhase::RunComplete);
        assert_eq!(state.stage, 1);
        assert_eq!(state.best_stage, MAX_STAGE);

        assert!(start(&mut state));
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.stage, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.attempts, 1);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut state = running_state();
        let mut rng = ScriptedRandom::new(&[0.5]);
        tick(&mut state, &at(1.0), &mut rng);
        tick(&mut state, &at(1000.0), &mut rng);
        state.score = 3;
        let before = (state.stage, state.score, state.obstacles.clone(), state.attempts);

        assert!(!start(&mut state));
        let after = (state.stage, state.score, state.obstacles.clone(), state.attempts);
        assert_eq!(before, after);
    }

    #[test]
    fn test_lane_recentered_on_restart() {
        let mut state = running_state();
        state.player.lane = 0;
        state.phase = RunPhase::Lost;
        assert!(start(&mut state));
        assert_eq!(state.player.lane, CENTER_LANE);
    }
}
