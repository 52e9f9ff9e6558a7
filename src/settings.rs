//! Spin tuning and session preferences
//!
//! Stored as JSON. The wheel itself (75 numbers) is not configurable.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MIN_SPINS, SPIN_DURATION_MS};

/// Gain of one pointer tick
pub const DEFAULT_TICK_VOLUME: f32 = 0.05;

/// Default frame step for headless driving (60 Hz)
pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Length of one spin (milliseconds)
    pub spin_duration_ms: f64,
    /// Full turns before landing
    pub min_spins: u32,
    /// Emit tick events while the pointer crosses slices
    pub tick_sound: bool,
    /// Tick gain for the audio host (0.0 - 1.0)
    pub tick_volume: f32,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
    /// Frame step used by the headless driver
    pub frame_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spin_duration_ms: SPIN_DURATION_MS,
            min_spins: MIN_SPINS,
            tick_sound: true,
            tick_volume: DEFAULT_TICK_VOLUME,
            seed: None,
            frame_ms: DEFAULT_FRAME_MS,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp values that would stall or skip the spin
    pub fn sanitized(mut self) -> Self {
        if self.min_spins == 0 {
            log::warn!("min_spins must be at least 1, using 1");
            self.min_spins = 1;
        }
        if !self.spin_duration_ms.is_finite() || self.spin_duration_ms < 1.0 {
            log::warn!("spin_duration_ms {} out of range, using 1", self.spin_duration_ms);
            self.spin_duration_ms = 1.0;
        }
        if self.tick_volume.is_nan() {
            log::warn!("tick_volume is NaN, using default");
            self.tick_volume = DEFAULT_TICK_VOLUME;
        }
        self.tick_volume = self.tick_volume.clamp(0.0, 1.0);
        if !self.frame_ms.is_finite() || self.frame_ms <= 0.0 {
            log::warn!("frame_ms {} invalid, using default", self.frame_ms);
            self.frame_ms = DEFAULT_FRAME_MS;
        }
        self
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Bad settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Can't read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.spin_duration_ms, 6000.0);
        assert_eq!(s.min_spins, 5);
        assert!(s.tick_sound);
        assert_eq!(s.tick_volume, 0.05);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_partial_json() {
        let s = Settings::from_json(r#"{ "seed": 42, "min_spins": 3 }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.min_spins, 3);
        assert_eq!(s.spin_duration_ms, SPIN_DURATION_MS);
    }

    #[test]
    fn test_bad_json() {
        assert!(Settings::from_json("{ nope").is_err());
    }

    #[test]
    fn test_sanitized() {
        let s = Settings {
            min_spins: 0,
            spin_duration_ms: -5.0,
            frame_ms: f64::NAN,
            ..Settings::default()
        }
        .sanitized();
        assert_eq!(s.min_spins, 1);
        assert_eq!(s.spin_duration_ms, 1.0);
        assert_eq!(s.frame_ms, DEFAULT_FRAME_MS);
    }

    #[test]
    fn test_tick_volume_clamped() {
        let loud = Settings {
            tick_volume: 3.0,
            ..Settings::default()
        };
        assert_eq!(loud.sanitized().tick_volume, 1.0);

        let negative = Settings::from_json(r#"{ "tick_volume": -0.5 }"#).unwrap();
        assert_eq!(negative.sanitized().tick_volume, 0.0);

        let nan = Settings {
            tick_volume: f32::NAN,
            ..Settings::default()
        };
        assert_eq!(nan.sanitized().tick_volume, DEFAULT_TICK_VOLUME);
    }

    #[test]
    fn test_json_roundtrip() {
        let s = Settings {
            seed: Some(7),
            tick_sound: false,
            tick_volume: 0.25,
            ..Settings::default()
        };
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back.seed, Some(7));
        assert!(!back.tick_sound);
        assert_eq!(back.tick_volume, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let s = Settings::load(Path::new("/nonexistent/bingo-roulette.json"));
        assert_eq!(s, Settings::default());
    }
}
