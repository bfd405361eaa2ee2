// src/motion/vector.rs
//! Fixed four-axis (X, Y, Z, E) vector used for positions, velocities and
//! accelerations.
//!
//! All per-axis operations run in X, Y, Z, E order so reductions such as the
//! jerk clamp factor are deterministic.

use std::ops::Sub;

/// Threshold below which lengths, times and magnitudes count as zero.
pub const EPSILON: f64 = 5e-7;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub e: f64,
}

impl Vector4 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64, e: f64) -> Self {
        Self { x, y, z, e }
    }

    /// Apply `op` to every component.
    pub fn map(self, op: impl Fn(f64) -> f64) -> Self {
        Self::new(op(self.x), op(self.y), op(self.z), op(self.e))
    }

    /// Combine two vectors component by component.
    pub fn zip_map(self, other: Self, op: impl Fn(f64, f64) -> f64) -> Self {
        Self::new(
            op(self.x, other.x),
            op(self.y, other.y),
            op(self.z, other.z),
            op(self.e, other.e),
        )
    }

    /// Reduce the components into a single value, starting from `init`.
    pub fn fold<T>(self, init: T, op: impl Fn(T, f64) -> T) -> T {
        let acc = op(init, self.x);
        let acc = op(acc, self.y);
        let acc = op(acc, self.z);
        op(acc, self.e)
    }

    /// Euclidean length over all four components, extrusion included.
    pub fn norm(self) -> f64 {
        self.fold(0.0, |acc, c| acc + c * c).sqrt()
    }

    pub fn abs(self) -> Self {
        self.map(f64::abs)
    }

    pub fn scale(self, factor: f64) -> Self {
        self.map(|c| c * factor)
    }

    pub fn components(self) -> [f64; 4] {
        [self.x, self.y, self.z, self.e]
    }
}

impl Sub for Vector4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl From<[f64; 4]> for Vector4 {
    fn from(c: [f64; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}
