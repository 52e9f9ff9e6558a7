//! Bingo Roulette headless driver
//!
//! Plays a full game at a fixed frame step and logs every call.
//!
//! Usage: `bingo-roulette [--seed N] [settings.json]`
//!
//! On wasm32 the library's `WebSession` is the entry point instead.

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use bingo_roulette::Settings;
#[cfg(not(target_arch = "wasm32"))]
use bingo_roulette::platform::init_logging;
#[cfg(not(target_arch = "wasm32"))]
use bingo_roulette::sim::{Session, SessionEvent};

/// Parsed command line
#[cfg(not(target_arch = "wasm32"))]
struct Args {
    seed: Option<u64>,
    settings_path: Option<PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_args() -> Args {
    let mut args = Args {
        seed: None,
        settings_path: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            match iter.next().map(|s| s.parse::<u64>()) {
                Some(Ok(seed)) => args.seed = Some(seed),
                _ => log::warn!("--seed needs an unsigned integer, ignoring"),
            }
        } else {
            args.settings_path = Some(PathBuf::from(arg));
        }
    }
    args
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    init_logging();
    let args = parse_args();

    let mut settings = match &args.settings_path {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let frame_ms = settings.frame_ms;

    let mut session = Session::new(settings);
    log::info!("Bingo Roulette (seed {})", session.state().seed());

    let mut ticks = 0usize;
    while session.request_roll() {
        for event in session.run_spin(frame_ms) {
            match event {
                SessionEvent::Tick => ticks += 1,
                SessionEvent::DisplayChanged(_) => {}
                SessionEvent::SpinCompleted(n) => {
                    log::info!("call #{:>2}: {:>2}", session.state().drawn(), n)
                }
                SessionEvent::GameFinished => log::info!("all numbers called"),
            }
        }
    }

    log::info!("{} ticks, final rotation {:.1}", ticks, session.state().rotation());
    match session.snapshot_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("snapshot failed: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web entry point is `web::wasm_main`, this is just to satisfy the compiler
}
