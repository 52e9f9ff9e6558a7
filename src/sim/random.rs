//! Random helpers shared by the wheel and the draw state
//!
//! Pure functions over a caller-supplied generator so the core stays
//! reproducible from a seed.

use rand::Rng;

use crate::BingoNumber;

/// Inclusive range `[start, start + 1, ..., end]`
///
/// Returns an empty vector when `end < start`.
pub fn generate_range(start: BingoNumber, end: BingoNumber) -> Vec<BingoNumber> {
    (start..=end).collect()
}

/// Fisher-Yates shuffle into a new vector (the input is left untouched)
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Uniformly pick one element; `None` on an empty slice
pub fn pick_random<T: Copy, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.random_range(0..items.len())])
}

/// Cubic ease-out: fast start, smooth stop
#[inline]
pub fn ease_out_cubic(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}
