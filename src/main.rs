//! Gapflap entry point
//!
//! Runs a headless autopilot session and logs what a renderer would observe.
//! Usage: `gapflap [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use gapflap::Settings;
    use gapflap::consts::*;
    use gapflap::sim::{GameEvent, GameSession, TickInput, tick};

    /// Simulated wall-clock length of the demo
    const DEMO_SECS: f32 = 60.0;
    /// Host frame rate, deliberately not a multiple of the sim rate
    const FRAME_DT: f32 = 1.0 / 45.0;

    env_logger::init();
    log::info!("Gapflap (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Started new session with seed: {}", seed);

    let mut session = GameSession::new(settings, seed);
    let input = TickInput {
        tap: false,
        autopilot: true,
    };

    let mut accumulator = 0.0;
    let mut elapsed = 0.0;
    while elapsed < DEMO_SECS {
        let dt = FRAME_DT.min(0.1);
        accumulator += dt;
        elapsed += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut session, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in session.drain_events() {
            match event {
                GameEvent::Scored { score } => log::info!("Score: {}", score),
                GameEvent::GameOver { score, rank } => {
                    log::info!("{} (score {}, rank {:?})", GAME_OVER_TEXT, score, rank)
                }
                other => log::debug!("{:?}", other),
            }
        }
    }

    println!("Runs played: {}", session.run);
    println!("Current score: {}", session.score);
    for (i, entry) in session.high_scores.entries.iter().enumerate() {
        println!("{:>2}. {:>4}  (run {})", i + 1, entry.score, entry.run);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No browser front-end; the library is driven by the embedding host
}
