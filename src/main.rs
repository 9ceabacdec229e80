//! Ping entry point
//!
//! With the `sdl` feature the game opens a window and runs until quit.
//! Without it, a scripted headless rally runs and its final frame is printed
//! as JSON.

use std::process::ExitCode;

use ping::Variant;

/// The build ships the most complete variant
const VARIANT: Variant = Variant::Sound;

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

#[cfg(feature = "sdl")]
fn main() -> ExitCode {
    init_logging();
    log::info!("Ping ({} variant) starting...", VARIANT.as_str());

    match ping::platform::sdl::run(VARIANT.capabilities()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("[ERROR] {}", err);
            ExitCode::from(1)
        }
    }
}

#[cfg(not(feature = "sdl"))]
fn main() -> ExitCode {
    /// Upper bound on the headless rally
    const DEMO_MAX_TICKS: u64 = 10_000;

    init_logging();
    log::info!("Ping ({} variant, headless) starting...", VARIANT.as_str());
    log::info!("Build with `--features sdl` for the windowed game");

    let view = ping::platform::headless::run_demo(VARIANT.capabilities(), DEMO_MAX_TICKS);
    match serde_json::to_string_pretty(&view) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Couldn't serialize final frame: {}", err);
            ExitCode::from(1)
        }
    }
}
