//! Bingo Roulette - a 75-ball drawing wheel
//!
//! Core modules:
//! - `sim`: Deterministic core (random utilities, wheel layout, draw state, spin animator)
//! - `platform`: Browser/native platform glue
//! - `settings`: Data-driven spin tuning
//! - `web`: JS-facing session wrapper (wasm-bindgen on wasm32)

pub mod platform;
pub mod settings;
pub mod sim;
pub mod web;

pub use settings::Settings;
pub use web::WebSession;

use glam::DVec2;

/// A ball number on the wheel (1..=75)
pub type BingoNumber = u8;

/// Game configuration constants
pub mod consts {
    use super::BingoNumber;

    /// Numbers in the pool (and slices on the wheel)
    pub const TOTAL_NUMBERS: usize = 75;
    /// Lowest and highest ball
    pub const FIRST_NUMBER: BingoNumber = 1;
    pub const LAST_NUMBER: BingoNumber = 75;
    /// Angular width of one slice (degrees)
    pub const SLICE_ANGLE: f64 = 360.0 / TOTAL_NUMBERS as f64;

    /// Spin duration (milliseconds)
    pub const SPIN_DURATION_MS: f64 = 6000.0;
    /// Full turns every spin must cover before landing
    pub const MIN_SPINS: u32 = 5;

    /// Wheel geometry in a 1000x1000 view box
    pub const WHEEL_CENTER: f64 = 500.0;
    pub const WHEEL_RADIUS: f64 = 450.0;
    /// Labels sit this far inside the rim
    pub const LABEL_INSET: f64 = 20.0;
}

/// Normalize an angle in degrees to [0, 360)
///
/// Rotation accumulates across a whole round, so angles are kept in f64.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Convert a wheel angle (degrees clockwise from 12 o'clock) to a point
/// at distance `r` from `center`, in screen space (y grows downward)
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, degrees: f64) -> DVec2 {
    let rad = (degrees - 90.0).to_radians();
    center + DVec2::new(r * rad.cos(), r * rad.sin())
}
