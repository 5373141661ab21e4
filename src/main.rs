//! Retro Breaker entry point
//!
//! Native builds run a headless autopilot session: useful for soak testing
//! the simulation and for watching the event log.
//!
//! ```text
//! retro-breaker --seed 42 --minutes 5 --quality low
//! ```

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser)]
#[command(name = "retro-breaker")]
#[command(about = "Run a headless autopilot session and record it in the ranking")]
struct Args {
    /// RNG seed (defaults to the wall clock)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Simulated minutes before stopping
    #[arg(short, long, default_value_t = 10)]
    minutes: u32,

    /// Particle quality preset: low, medium or high
    #[arg(short, long, default_value = "medium")]
    quality: retro_breaker::QualityPreset,

    /// Ranking file
    #[arg(long, default_value = "retro_breaker_rankings.json")]
    rankings: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;
    use retro_breaker::audio::LogAudio;
    use retro_breaker::consts::TICK_MS;
    use retro_breaker::persistence::JsonFileStore;
    use retro_breaker::sim::{GamePhase, TickInput};
    use retro_breaker::{Game, Settings, platform};

    let args = Args::parse();
    platform::init_logging();

    let seed = args.seed.unwrap_or_else(platform::seed_from_clock);
    let minutes = args.minutes;
    let quality = args.quality;

    log::info!("Retro Breaker (headless) seed={} minutes={} quality={}", seed, minutes, quality.as_str());

    let settings = Settings::from_preset(quality);
    let store = JsonFileStore::new(args.rankings);
    let mut game = Game::new(seed, LogAudio, store, settings);

    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let frames = minutes as u64 * 60 * 60;
    for _ in 0..frames {
        game.frame(TICK_MS, &input);
        if game.state.phase == GamePhase::GameOver {
            for c in "AUTO".chars() {
                game.type_char(c);
            }
            let rank = game.submit_name();
            log::info!("Recorded run, rank {:?}", rank);
            break;
        }
    }

    let state = &game.state;
    println!(
        "seed {}: stage {}, score {}, lives {}, max combo {}, {} ticks{}",
        seed,
        state.stage,
        state.score,
        state.lives,
        state.max_combo,
        state.time_ticks,
        if state.victory { " (victory)" } else { "" }
    );
    for (i, entry) in game.high_scores.entries.iter().enumerate() {
        println!("{:>2}. {:<8} {:>8}  stage {:>2}  {}", i + 1, entry.name, entry.score, entry.stage, entry.date);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Game` directly; nothing to do here
}
