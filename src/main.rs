//! Headless demo runner
//!
//! Drives the simulation with the autopilot for a few simulated minutes
//! and prints the outcome. Useful for balance checks and for watching
//! the event stream without a renderer.
//!
//! Usage: `block-dodge [seed] [minutes]`

use block_dodge::sim::{tick, GameEvent, GameState, TickInput};
use block_dodge::HighScores;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let minutes: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3.0);

    log::info!("demo run: seed {seed}, {minutes} simulated minutes");

    let mut state = GameState::new(seed, 420.0, 780.0);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let dt = 1000.0 / 60.0;
    let total_frames = (minutes * 60.0 * 60.0) as u64;
    let mut board = HighScores::new();

    for _ in 0..total_frames {
        tick(&mut state, &input, dt);
        for event in state.drain_events() {
            match event {
                GameEvent::LevelUp { level } => log::info!("reached level {}", level + 1),
                GameEvent::GameOver { score } => log::info!("run ended with score {score}"),
                _ => {}
            }
        }
        if !state.running {
            if let Some(rank) = board.add_score(state.score, state.level_index as u32 + 1, state.time_ms) {
                log::info!("run ranked #{rank}");
            }
            state.reset();
        }
    }

    let hud = state.hud();
    println!(
        "seed {seed}: score {}, level {}, lives {}, {} obstacles live",
        hud.score,
        hud.level + 1,
        hud.lives,
        state.obstacles.len()
    );
    match board.top_score() {
        Some(top) => println!("best completed run: {top}"),
        None => println!("no run finished within the time budget"),
    }
}
