//! Wheel order and slice geometry
//!
//! Angles are in degrees, measured clockwise from 12 o'clock. A slice at
//! position `i` spans `[i * SLICE_ANGLE, (i + 1) * SLICE_ANGLE)`:
//! - the wedge runs from the center out to the rim
//! - the label sits at the mid-angle, `LABEL_INSET` inside the rim
//! - the label is rotated by `mid + 90` so it reads along the radius

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::random::{generate_range, shuffle};
use crate::consts::*;
use crate::{BingoNumber, normalize_degrees, polar_to_cartesian};

/// Arrangement of the 75 numbers around the wheel
///
/// Position 0 always holds 1; positions 1..75 are a shuffle of 2..=75.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelOrder(Vec<BingoNumber>);

impl WheelOrder {
    /// Shuffle a fresh order (1 pinned at the top)
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut order = Vec::with_capacity(TOTAL_NUMBERS);
        order.push(FIRST_NUMBER);
        order.extend(shuffle(&generate_range(FIRST_NUMBER + 1, LAST_NUMBER), rng));
        Self(order)
    }

    /// Unshuffled order 1..=75
    pub fn sequential() -> Self {
        Self(generate_range(FIRST_NUMBER, LAST_NUMBER))
    }

    #[cfg(test)]
    pub(crate) fn from_numbers(numbers: Vec<BingoNumber>) -> Self {
        Self(numbers)
    }

    pub fn as_slice(&self) -> &[BingoNumber] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `number` on the wheel
    pub fn index_of(&self, number: BingoNumber) -> Option<usize> {
        self.0.iter().position(|&n| n == number)
    }

    /// Number at a wheel position
    pub fn number_at(&self, index: usize) -> Option<BingoNumber> {
        self.0.get(index).copied()
    }

    /// True if this is a permutation of 1..=75 with 1 first
    pub fn is_valid(&self) -> bool {
        if self.0.len() != TOTAL_NUMBERS || self.0.first() != Some(&FIRST_NUMBER) {
            return false;
        }
        let mut seen = [false; TOTAL_NUMBERS];
        for &n in &self.0 {
            if !(FIRST_NUMBER..=LAST_NUMBER).contains(&n) || seen[(n - 1) as usize] {
                return false;
            }
            seen[(n - 1) as usize] = true;
        }
        true
    }
}

/// Mid-angle of the slice at `index`, in wheel space
#[inline]
pub fn slice_center_angle(index: usize) -> f64 {
    index as f64 * SLICE_ANGLE + SLICE_ANGLE / 2.0
}

/// Wheel position covering a wheel-space angle
///
/// Every angle-to-slice lookup goes through here so boundaries agree.
#[inline]
pub fn slice_index_at(degrees: f64) -> usize {
    let idx = (normalize_degrees(degrees) / SLICE_ANGLE).floor() as usize;
    idx.min(TOTAL_NUMBERS - 1)
}

/// One wedge of the wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelSlice {
    /// Position on the wheel (0 = top)
    pub index: usize,
    pub number: BingoNumber,
    /// Angular extent (degrees)
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
    /// Rim points at the start and end angles
    pub rim_start: DVec2,
    pub rim_end: DVec2,
    /// Label anchor
    pub label_pos: DVec2,
    /// Label rotation about its anchor (degrees)
    pub label_rotation: f64,
}

impl WheelSlice {
    pub fn new(index: usize, number: BingoNumber, center: DVec2, radius: f64) -> Self {
        let start_angle = index as f64 * SLICE_ANGLE;
        let end_angle = (index + 1) as f64 * SLICE_ANGLE;
        let mid_angle = start_angle + SLICE_ANGLE / 2.0;
        Self {
            index,
            number,
            start_angle,
            end_angle,
            mid_angle,
            rim_start: polar_to_cartesian(center, radius, start_angle),
            rim_end: polar_to_cartesian(center, radius, end_angle),
            label_pos: polar_to_cartesian(center, radius - LABEL_INSET, mid_angle),
            label_rotation: mid_angle + 90.0,
        }
    }

    /// Check if a wheel-space angle falls in this slice (start inclusive)
    pub fn contains_angle(&self, degrees: f64) -> bool {
        slice_index_at(degrees) == self.index
    }

    /// SVG path for the wedge: center, line to rim, clockwise arc, close
    pub fn svg_path(&self, center: DVec2, radius: f64) -> String {
        format!(
            "M {} {} L {} {} A {} {} 0 0 1 {} {} Z",
            center.x,
            center.y,
            self.rim_start.x,
            self.rim_start.y,
            radius,
            radius,
            self.rim_end.x,
            self.rim_end.y
        )
    }
}

/// Slice geometry for a whole wheel
///
/// Only depends on the order, so hosts rebuild it when the round changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelLayout {
    /// Round the order belongs to; a host can cache on it
    pub round: u32,
    pub center: DVec2,
    pub radius: f64,
    pub slices: Vec<WheelSlice>,
}

impl WheelLayout {
    /// Layout in the default 1000x1000 view box
    pub fn new(order: &WheelOrder, round: u32) -> Self {
        Self::with_geometry(order, round, DVec2::splat(WHEEL_CENTER), WHEEL_RADIUS)
    }

    pub fn with_geometry(order: &WheelOrder, round: u32, center: DVec2, radius: f64) -> Self {
        let slices = order
            .as_slice()
            .iter()
            .enumerate()
            .map(|(i, &n)| WheelSlice::new(i, n, center, radius))
            .collect();
        Self {
            round,
            center,
            radius,
            slices,
        }
    }

    /// Slice covering a wheel-space angle
    pub fn slice_at_angle(&self, degrees: f64) -> Option<&WheelSlice> {
        self.slices.get(slice_index_at(degrees))
    }

    /// Slice holding `number`
    pub fn slice_for(&self, number: BingoNumber) -> Option<&WheelSlice> {
        self.slices.iter().find(|s| s.number == number)
    }

    /// SVG wedge path for every slice, in wheel order
    pub fn svg_paths(&self) -> Vec<String> {
        self.slices
            .iter()
            .map(|s| s.svg_path(self.center, self.radius))
            .collect()
    }
}
