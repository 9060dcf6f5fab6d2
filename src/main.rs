//! Shape Runner headless entry point
//!
//! Drives the simulation from wall time without any renderer attached:
//! useful for smoke-testing balance changes and watching event flow in logs.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use shape_runner::sim::{GameEvent, GameState, SimClock, TickInput, tick};

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("starting headless session, seed {seed}");

    let mut state = GameState::new(seed);
    let mut clock = SimClock::new();

    // Crude pilot: hold right and drift toward the exit
    let input = TickInput {
        right: true,
        ..Default::default()
    };

    let start = Instant::now();
    while start.elapsed() < Duration::from_secs(20) {
        let now_ms = start.elapsed().as_secs_f64() * 1000.0;
        for _ in 0..clock.advance(now_ms) {
            tick(&mut state, &input);
        }

        for event in state.drain_events() {
            match event {
                GameEvent::LevelChanged(level) => log::info!("level {level}"),
                GameEvent::Success => log::info!("reached the exit"),
                GameEvent::GameOver => log::info!("caught at tick {}", state.time_ticks),
            }
        }

        std::thread::sleep(Duration::from_millis(16));
    }

    log::info!(
        "done: level {}, {} ticks, {} obstacles",
        state.level,
        state.time_ticks,
        state.obstacles.len()
    );
}
