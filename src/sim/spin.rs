//! Spin trajectory and frame-stepped animator
//!
//! The trajectory is a pure function of elapsed time; the animator wraps it
//! with the per-frame bookkeeping (which slice sits under the pointer, when
//! to tick, when the spin is done). Any driver can step it: a display
//! refresh callback, a fixed-step headless loop, or a test.

use serde::{Deserialize, Serialize};

use super::random::ease_out_cubic;
use super::wheel::{WheelOrder, slice_center_angle, slice_index_at};
use crate::BingoNumber;

/// Smallest rotation `>= start + min_spins * 360` that parks the slice at
/// `index` under the top pointer, i.e. `-r ≡ slice_center (mod 360)`
pub fn compute_target_rotation(start_rotation: f64, index: usize, min_spins: u32) -> f64 {
    let center = slice_center_angle(index);
    let threshold = start_rotation + 360.0 * min_spins as f64;
    let turns = ((threshold + center) / 360.0).ceil();
    360.0 * turns - center
}

/// Wheel position under the pointer for a given wheel rotation
pub fn slice_index_under_pointer(rotation: f64) -> usize {
    slice_index_at(-rotation)
}

/// Ease-out path from a start rotation to a landing rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinTrajectory {
    pub start_rotation: f64,
    pub target_rotation: f64,
    pub duration_ms: f64,
}

impl SpinTrajectory {
    /// Plan a spin that lands on `index`
    pub fn new(start_rotation: f64, index: usize, min_spins: u32, duration_ms: f64) -> Self {
        Self {
            start_rotation,
            target_rotation: compute_target_rotation(start_rotation, index, min_spins),
            duration_ms,
        }
    }

    /// Total travel (degrees)
    #[inline]
    pub fn delta(&self) -> f64 {
        self.target_rotation - self.start_rotation
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self, elapsed_ms: f64) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Rotation at `elapsed_ms` into the spin
    pub fn rotation_at(&self, elapsed_ms: f64) -> f64 {
        let p = self.progress(elapsed_ms);
        if p >= 1.0 {
            // Land exactly, no rounding residue from the easing
            return self.target_rotation;
        }
        self.start_rotation + self.delta() * ease_out_cubic(p)
    }
}

/// What one animation step produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinFrame {
    /// Current wheel rotation (degrees, cumulative)
    pub rotation: f64,
    /// Wheel position under the pointer
    pub slice_index: usize,
    /// Number under the pointer
    pub displayed_number: BingoNumber,
    /// Pointer crossed into a new slice since the previous frame
    pub tick: bool,
    /// Last frame of the spin
    pub completed: bool,
}

/// One in-flight spin
#[derive(Debug, Clone)]
pub struct SpinAnimator {
    trajectory: SpinTrajectory,
    order: WheelOrder,
    target: BingoNumber,
    elapsed_ms: f64,
    last_index: Option<usize>,
    finished: bool,
    cancelled: bool,
}

impl SpinAnimator {
    /// Start a spin toward `target`; `None` if the number isn't on the wheel
    pub fn new(
        start_rotation: f64,
        target: BingoNumber,
        order: &WheelOrder,
        min_spins: u32,
        duration_ms: f64,
    ) -> Option<Self> {
        let index = order.index_of(target)?;
        let trajectory = SpinTrajectory::new(start_rotation, index, min_spins, duration_ms);
        log::debug!(
            "spin to {} (slice {}): {:.1} -> {:.1}",
            target,
            index,
            trajectory.start_rotation,
            trajectory.target_rotation
        );
        Some(Self {
            trajectory,
            order: order.clone(),
            target,
            elapsed_ms: 0.0,
            last_index: None,
            finished: false,
            cancelled: false,
        })
    }

    pub fn trajectory(&self) -> &SpinTrajectory {
        &self.trajectory
    }

    pub fn target(&self) -> BingoNumber {
        self.target
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Still producing frames
    pub fn is_active(&self) -> bool {
        !self.finished && !self.cancelled
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Abandon the spin; no further frames (and no completion) are produced
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("spin to {} cancelled at {:.0} ms", self.target, self.elapsed_ms);
        }
        self.cancelled = true;
    }

    /// Step the animation by `dt_ms`
    ///
    /// Returns `None` once the spin has completed or been cancelled. The
    /// frame with `completed == true` is produced exactly once.
    pub fn advance(&mut self, dt_ms: f64) -> Option<SpinFrame> {
        if !self.is_active() {
            return None;
        }

        self.elapsed_ms += dt_ms.max(0.0);
        let rotation = self.trajectory.rotation_at(self.elapsed_ms);
        let slice_index = slice_index_under_pointer(rotation);
        let displayed_number = self.order.number_at(slice_index).unwrap_or(self.target);

        // No tick on the first frame, only on slice changes afterwards
        let tick = self.last_index.is_some_and(|last| last != slice_index);
        self.last_index = Some(slice_index);

        let completed = self.trajectory.progress(self.elapsed_ms) >= 1.0;
        if completed {
            self.finished = true;
        }
        if tick {
            log::trace!("tick: slice {} ({})", slice_index, displayed_number);
        }

        Some(SpinFrame {
            rotation,
            slice_index,
            displayed_number,
            tick,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::normalize_degrees;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn wheel_residue(rotation: f64) -> f64 {
        normalize_degrees(-rotation)
    }

    #[test]
    fn test_target_rotation_from_zero() {
        for idx in [0usize, 1, 37, 74] {
            let r = compute_target_rotation(0.0, idx, MIN_SPINS);
            assert!(r >= 1800.0, "idx {idx}: {r}");
            assert!(r < 1800.0 + 360.0);
            let expected = idx as f64 * 4.8 + 2.4;
            assert!((wheel_residue(r) - expected).abs() < 1e-6, "idx {idx}");
        }
    }

    #[test]
    fn test_target_rotation_slice_zero() {
        // -2.4 + 360 * 6 is the first value past 1800
        let r = compute_target_rotation(0.0, 0, 5);
        assert!((r - 2157.6).abs() < 1e-9);
    }

    #[test]
    fn test_target_rotation_from_nonzero_start() {
        let start = 2157.6;
        let r = compute_target_rotation(start, 10, 5);
        assert!(r >= start + 1800.0);
        assert!(r < start + 1800.0 + 360.0);
        assert_eq!(slice_index_under_pointer(r), 10);
    }

    #[test]
    fn test_slice_under_pointer() {
        assert_eq!(slice_index_under_pointer(0.0), 0);
        // Rotating clockwise by a hair brings the last slice under the pointer
        assert_eq!(slice_index_under_pointer(0.1), 74);
        assert_eq!(slice_index_under_pointer(-5.0), 1);
        assert_eq!(slice_index_under_pointer(360.0 * 3.0 - 7.0), 1);
    }

    #[test]
    fn test_trajectory_endpoints() {
        let t = SpinTrajectory::new(100.0, 20, 5, 6000.0);
        assert_eq!(t.rotation_at(0.0), 100.0);
        assert_eq!(t.rotation_at(6000.0), t.target_rotation);
        assert_eq!(t.rotation_at(9000.0), t.target_rotation);
        assert_eq!(t.rotation_at(-50.0), 100.0);
        // Ease-out: more than half the travel done by the midpoint
        assert!(t.rotation_at(3000.0) - 100.0 > t.delta() * 0.5);
    }

    #[test]
    fn test_zero_duration_lands_immediately() {
        let t = SpinTrajectory::new(0.0, 3, 5, 0.0);
        assert_eq!(t.rotation_at(0.0), t.target_rotation);
    }

    #[test]
    fn test_animator_lands_on_target() {
        let mut rng = Pcg32::seed_from_u64(21);
        let order = WheelOrder::generate(&mut rng);
        let mut anim = SpinAnimator::new(0.0, 42, &order, MIN_SPINS, SPIN_DURATION_MS).unwrap();

        let mut last = None;
        let mut completions = 0;
        while let Some(frame) = anim.advance(16.0) {
            if frame.completed {
                completions += 1;
            }
            last = Some(frame);
        }
        let last = last.unwrap();
        assert_eq!(completions, 1);
        assert!(last.completed);
        assert_eq!(last.displayed_number, 42);
        assert_eq!(Some(last.slice_index), order.index_of(42));
        assert!(!anim.is_active());
        assert!(anim.advance(16.0).is_none());
    }

    #[test]
    fn test_first_frame_never_ticks() {
        let order = WheelOrder::sequential();
        let mut anim = SpinAnimator::new(0.0, 30, &order, MIN_SPINS, SPIN_DURATION_MS).unwrap();
        let first = anim.advance(100.0).unwrap();
        assert!(!first.tick);
        // A big step guarantees a different slice on the second frame
        let second = anim.advance(100.0).unwrap();
        assert_ne!(first.slice_index, second.slice_index);
        assert!(second.tick);
    }

    #[test]
    fn test_ticks_only_on_index_change() {
        let order = WheelOrder::sequential();
        let mut anim = SpinAnimator::new(0.0, 5, &order, MIN_SPINS, SPIN_DURATION_MS).unwrap();
        let mut prev: Option<usize> = None;
        while let Some(frame) = anim.advance(5.0) {
            let changed = prev.is_some_and(|p| p != frame.slice_index);
            assert_eq!(frame.tick, changed);
            prev = Some(frame.slice_index);
        }
    }

    #[test]
    fn test_cancel_suppresses_completion() {
        let order = WheelOrder::sequential();
        let mut anim = SpinAnimator::new(0.0, 9, &order, MIN_SPINS, SPIN_DURATION_MS).unwrap();
        assert!(anim.advance(1000.0).is_some());
        anim.cancel();
        assert!(anim.is_cancelled());
        assert!(anim.advance(10_000.0).is_none());
    }

    #[test]
    fn test_unknown_target() {
        let order = WheelOrder::sequential();
        assert!(SpinAnimator::new(0.0, 0, &order, MIN_SPINS, SPIN_DURATION_MS).is_none());
    }

    proptest! {
        #[test]
        fn prop_target_congruence(start in 0.0f64..200_000.0, idx in 0usize..75, spins in 1u32..10) {
            let r = compute_target_rotation(start, idx, spins);
            prop_assert!(r >= start + 360.0 * spins as f64 - 1e-6);
            prop_assert!(r < start + 360.0 * (spins + 1) as f64 + 1e-6);
            prop_assert_eq!(slice_index_under_pointer(r), idx);
        }

        #[test]
        fn prop_trajectory_monotonic(idx in 0usize..75, steps in proptest::collection::vec(0.0f64..500.0, 1..40)) {
            let t = SpinTrajectory::new(0.0, idx, MIN_SPINS, SPIN_DURATION_MS);
            let mut elapsed = 0.0;
            let mut prev = t.rotation_at(0.0);
            for dt in steps {
                elapsed += dt;
                let r = t.rotation_at(elapsed);
                prop_assert!(r >= prev);
                prev = r;
            }
        }
    }
}
