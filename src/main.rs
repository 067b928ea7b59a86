//! Rush 1000 entry point
//!
//! Headless driver: feeds fixed-step timestamps into the simulation, restarts
//! after losses and stage clears, and prints the final snapshot as JSON.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rush_1000::Settings;
    use rush_1000::sim::autopilot::choose_move;
    use rush_1000::sim::{GameEvent, RunPhase, RunStateMachine};

    env_logger::init();
    log::info!("Rush 1000 (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{}", err);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    let mut run = RunStateMachine::new(&settings);
    let mut losses = 0u32;
    let mut stages_cleared = 0u32;

    for frame in 0..settings.max_frames {
        let now = frame as f64 * settings.frame_ms;

        match run.state().phase {
            RunPhase::Running => {}
            RunPhase::Lost => {
                losses += 1;
                if losses >= settings.max_attempts {
                    log::info!("Giving up after {} losses", losses);
                    break;
                }
                run.start();
            }
            RunPhase::RunComplete => break,
            RunPhase::Ready | RunPhase::StageCleared => {
                run.start();
            }
        }

        if settings.autopilot {
            if let Some(direction) = choose_move(run.state()) {
                run.request_move(direction);
            }
        }

        for event in run.tick(now) {
            match event {
                GameEvent::StageCleared { stage, score } => {
                    stages_cleared += 1;
                    log::info!("Cleared stage {} ({} passed) at {:.0}ms", stage, score, now);
                }
                GameEvent::RunComplete => log::info!("Run complete!"),
                _ => {}
            }
        }
    }

    log::info!("Cleared {} stages with {} losses", stages_cleared, losses);
    match serde_json::to_string_pretty(&run.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Failed to serialize snapshot: {}", err),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser front end drives `RunStateMachine` directly
}
