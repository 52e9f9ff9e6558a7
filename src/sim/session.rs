//! Frame-driven game session
//!
//! Pairs the draw state with at most one in-flight spin. The host calls
//! `request_roll` / `request_reset` from its input handlers and `advance`
//! once per rendered frame; everything else is read through the query
//! methods or a snapshot.

use serde::{Deserialize, Serialize};

use super::spin::SpinAnimator;
use super::state::{GameSnapshot, GameState, GameStatus};
use super::wheel::WheelLayout;
use crate::BingoNumber;
use crate::settings::Settings;

/// Something the presentation layer may react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Pointer crossed into a new slice (tick sound)
    Tick,
    /// Hub number changed
    DisplayChanged(BingoNumber),
    /// A spin landed and its number was drawn
    SpinCompleted(BingoNumber),
    /// The last number was drawn
    GameFinished,
}

/// A single-player game driven by frame callbacks
#[derive(Debug, Clone)]
pub struct Session {
    state: GameState,
    spin: Option<SpinAnimator>,
    /// Rebuilt only when the round changes
    layout: WheelLayout,
    settings: Settings,
}

impl Session {
    /// Create a session; the seed comes from settings or entropy
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let state = match settings.seed {
            Some(seed) => GameState::new(seed),
            None => GameState::from_entropy(),
        };
        let layout = WheelLayout::new(state.wheel_order(), state.round());
        Self {
            state,
            spin: None,
            layout,
            settings,
        }
    }

    /// Default tuning with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::new(Settings {
            seed: Some(seed),
            ..Settings::default()
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// A spin animation is in flight
    pub fn is_animating(&self) -> bool {
        self.spin.as_ref().is_some_and(SpinAnimator::is_active)
    }

    /// Rolls are accepted right now
    pub fn can_roll(&self) -> bool {
        self.state.status() == GameStatus::Idle && !self.state.pool().is_empty()
    }

    /// Roll the wheel; returns true if a spin started
    pub fn request_roll(&mut self) -> bool {
        if !self.state.request_roll() {
            return false;
        }
        let Some(target) = self.state.target() else {
            return false;
        };
        self.spin = SpinAnimator::new(
            self.state.rotation(),
            target,
            self.state.wheel_order(),
            self.settings.min_spins,
            self.settings.spin_duration_ms,
        );
        if self.spin.is_none() {
            // Target always comes from the pool, which the wheel covers
            log::error!("target {target} missing from wheel order");
            self.state.abort_roll();
            return false;
        }
        true
    }

    /// New game, effective immediately; an in-flight spin is dropped
    pub fn request_reset(&mut self) {
        if let Some(mut spin) = self.spin.take() {
            spin.cancel();
        }
        self.state.reset();
        self.layout = WheelLayout::new(self.state.wheel_order(), self.state.round());
    }

    /// Step the in-flight spin by `dt_ms`
    pub fn advance(&mut self, dt_ms: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        let Some(spin) = self.spin.as_mut() else {
            return events;
        };
        let Some(frame) = spin.advance(dt_ms) else {
            self.spin = None;
            return events;
        };

        self.state.set_rotation(frame.rotation);
        if self.state.displayed() != Some(frame.displayed_number) {
            self.state.set_displayed(frame.displayed_number);
            events.push(SessionEvent::DisplayChanged(frame.displayed_number));
        }
        if frame.tick && self.settings.tick_sound {
            events.push(SessionEvent::Tick);
        }

        if frame.completed {
            self.spin = None;
            if let Some(number) = self.state.notify_spin_complete() {
                events.push(SessionEvent::SpinCompleted(number));
                if self.state.status() == GameStatus::Finished {
                    events.push(SessionEvent::GameFinished);
                }
            }
        }
        events
    }

    /// Step at a fixed frame interval until the current spin lands
    pub fn run_spin(&mut self, frame_ms: f64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if frame_ms <= 0.0 {
            return events;
        }
        while self.spin.is_some() {
            events.extend(self.advance(frame_ms));
        }
        events
    }

    /// Slice geometry for the current wheel order
    pub fn layout(&self) -> &WheelLayout {
        &self.layout
    }

    /// Gain the audio host should use for `SessionEvent::Tick`
    pub fn tick_volume(&self) -> f32 {
        self.settings.tick_volume
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }
}
