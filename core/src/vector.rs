use std::ops::{Add, Mul, Sub};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D position or vector expressed in canvas pixels.
///
/// Values are treated as immutable: every operation returns a new vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component, growing to the right.
    pub x: f32,
    /// Vertical component, growing downwards.
    pub y: f32,
}

impl Vector2 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Direction vector pointing from `from` to `to`.
    #[must_use]
    pub fn direction(from: Self, to: Self) -> Self {
        to - from
    }

    /// Euclidean length of `vector`.
    #[must_use]
    pub fn magnitude(vector: Self) -> f32 {
        Vec2::from(vector).length()
    }

    /// Unit vector with the same direction. The zero vector normalises to zero.
    #[must_use]
    pub fn normalize(self) -> Self {
        Vec2::from(self).normalize_or_zero().into()
    }

    /// Whether both components differ from `other` by at most `tolerance`.
    #[must_use]
    pub fn equals_tolerance(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<Vec2> for Vector2 {
    fn from(value: Vec2) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Vector2> for Vec2 {
    fn from(value: Vector2) -> Self {
        Vec2::new(value.x, value.y)
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_componentwise_difference() {
        let a = Vector2::new(300.0, 360.0);
        let b = Vector2::new(300.0, 560.0);
        assert_eq!(Vector2::direction(a, b), Vector2::new(0.0, 200.0));
    }

    #[test]
    fn magnitude_of_three_four_is_five() {
        assert_eq!(Vector2::magnitude(Vector2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn zero_vector_normalises_to_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
    }

    #[test]
    fn tolerance_comparison_is_inclusive() {
        let a = Vector2::new(1.0, 1.0);
        assert!(a.equals_tolerance(Vector2::new(1.5, 0.5), 0.5));
        assert!(!a.equals_tolerance(Vector2::new(1.6, 1.0), 0.5));
    }
}
