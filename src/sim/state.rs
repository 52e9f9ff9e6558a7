//! Draw state machine
//!
//! Owns the undrawn pool, the draw history, the wheel order and the
//! cumulative wheel rotation. Transitions are run-to-completion: each event
//! either applies fully or is ignored by its guard.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::random::{generate_range, pick_random};
use super::wheel::WheelOrder;
use crate::BingoNumber;
use crate::consts::*;

/// Where the game is in its roll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Ready for a roll
    Idle,
    /// Wheel is spinning; rolls are ignored
    Spinning,
    /// Every number has been drawn
    Finished,
}

/// Read-only copy of everything a presentation layer renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub seed: u64,
    pub round: u32,
    pub status: GameStatus,
    pub target: Option<BingoNumber>,
    pub displayed: Option<BingoNumber>,
    /// Target of the last landed spin (hidden while spinning)
    pub last_called: Option<BingoNumber>,
    /// Undrawn numbers, ascending
    pub pool: Vec<BingoNumber>,
    /// Drawn numbers in draw order
    pub history: Vec<BingoNumber>,
    pub wheel_order: WheelOrder,
    pub rotation: f64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    seed: u64,
    rng: Pcg32,
    /// Bumped on every reset
    round: u32,
    pool: Vec<BingoNumber>,
    history: Vec<BingoNumber>,
    status: GameStatus,
    target: Option<BingoNumber>,
    /// Number shown in the wheel hub
    displayed: Option<BingoNumber>,
    wheel_order: WheelOrder,
    /// Cumulative rotation (degrees), only grows within a round
    rotation: f64,
}

impl GameState {
    /// Create a new game with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let wheel_order = WheelOrder::generate(&mut rng);
        log::info!("new game (seed {seed})");
        Self {
            seed,
            rng,
            round: 0,
            pool: generate_range(FIRST_NUMBER, LAST_NUMBER),
            history: Vec::with_capacity(TOTAL_NUMBERS),
            status: GameStatus::Idle,
            target: None,
            displayed: None,
            wheel_order,
            rotation: 0.0,
        }
    }

    /// Create a new game with a seed from the thread RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Roll request
    ///
    /// Picks a winner and starts spinning when idle. Returns true if a spin
    /// started. Ignored while spinning; an empty pool moves to `Finished`.
    pub fn request_roll(&mut self) -> bool {
        if self.pool.is_empty() {
            if self.status != GameStatus::Finished {
                log::warn!("roll with empty pool, finishing");
            }
            self.status = GameStatus::Finished;
            return false;
        }

        match self.status {
            GameStatus::Idle => {}
            GameStatus::Spinning => {
                log::warn!("roll ignored: already spinning");
                return false;
            }
            GameStatus::Finished => {
                log::warn!("roll ignored: game finished");
                return false;
            }
        }

        let Some(winner) = pick_random(&self.pool, &mut self.rng) else {
            return false;
        };
        self.target = Some(winner);
        self.status = GameStatus::Spinning;
        log::debug!("roll: winner {} ({} left)", winner, self.pool.len());
        true
    }

    /// Spin landed: move the target from the pool to the history
    ///
    /// Only meaningful while spinning; returns the drawn number. The target
    /// is kept so hosts can show the last call.
    pub fn notify_spin_complete(&mut self) -> Option<BingoNumber> {
        if self.status != GameStatus::Spinning {
            log::warn!("spin completion ignored in {:?}", self.status);
            return None;
        }
        let Some(number) = self.target else {
            log::warn!("spin completion ignored: no target");
            return None;
        };

        self.pool.retain(|&n| n != number);
        self.history.push(number);
        self.displayed = Some(number);
        self.status = if self.pool.is_empty() {
            log::info!("all {} numbers drawn", self.history.len());
            GameStatus::Finished
        } else {
            GameStatus::Idle
        };
        log::debug!("drawn {} (call #{})", number, self.history.len());
        Some(number)
    }

    /// Back out of a roll that has no spin to carry it
    ///
    /// Returns to `Idle` with the previous call as target; pool and history
    /// are untouched.
    pub(crate) fn abort_roll(&mut self) {
        if self.status != GameStatus::Spinning {
            return;
        }
        log::warn!("roll of {:?} aborted", self.target);
        self.target = self.history.last().copied();
        self.status = GameStatus::Idle;
    }

    #[cfg(test)]
    pub(crate) fn set_wheel_order(&mut self, order: WheelOrder) {
        self.wheel_order = order;
    }

    /// Start over: full pool, empty history, new wheel order, rotation 0
    pub fn reset(&mut self) {
        if self.status == GameStatus::Spinning {
            log::debug!("reset during spin, abandoning {:?}", self.target);
        }
        self.pool = generate_range(FIRST_NUMBER, LAST_NUMBER);
        self.history.clear();
        self.target = None;
        self.displayed = None;
        self.status = GameStatus::Idle;
        self.wheel_order = WheelOrder::generate(&mut self.rng);
        self.rotation = 0.0;
        self.round += 1;
        log::info!("game reset (round {})", self.round);
    }

    /// Advance the wheel to `rotation`; backwards moves are dropped
    pub(crate) fn set_rotation(&mut self, rotation: f64) {
        if rotation >= self.rotation {
            self.rotation = rotation;
        }
    }

    pub(crate) fn set_displayed(&mut self, number: BingoNumber) {
        self.displayed = Some(number);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn target(&self) -> Option<BingoNumber> {
        self.target
    }

    pub fn displayed(&self) -> Option<BingoNumber> {
        self.displayed
    }

    /// Last landed number, hidden while a spin is in flight
    pub fn last_called(&self) -> Option<BingoNumber> {
        match self.status {
            GameStatus::Spinning => None,
            _ => self.target,
        }
    }

    pub fn pool(&self) -> &[BingoNumber] {
        &self.pool
    }

    pub fn history(&self) -> &[BingoNumber] {
        &self.history
    }

    pub fn wheel_order(&self) -> &WheelOrder {
        &self.wheel_order
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn drawn(&self) -> usize {
        self.history.len()
    }

    /// Whether `number` has already been called this round
    pub fn is_drawn(&self, number: BingoNumber) -> bool {
        self.history.contains(&number)
    }

    /// Pool and history partition 1..=75 and the wheel order is valid
    pub fn check_invariants(&self) -> bool {
        let mut seen = [0u8; TOTAL_NUMBERS];
        for &n in self.pool.iter().chain(&self.history) {
            match n.checked_sub(1).map(usize::from) {
                Some(i) if i < TOTAL_NUMBERS => seen[i] += 1,
                _ => return false,
            }
        }
        let target_ok = match (self.status, self.target) {
            (GameStatus::Spinning, t) => t.is_some_and(|t| self.pool.contains(&t)),
            (_, Some(t)) => self.history.last() == Some(&t),
            (_, None) => true,
        };
        seen.iter().all(|&c| c == 1) && self.wheel_order.is_valid() && target_ok
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut pool = self.pool.clone();
        pool.sort_unstable();
        GameSnapshot {
            seed: self.seed,
            round: self.round,
            status: self.status,
            target: self.target,
            displayed: self.displayed,
            last_called: self.last_called(),
            pool,
            history: self.history.clone(),
            wheel_order: self.wheel_order.clone(),
            rotation: self.rotation,
        }
    }
}
