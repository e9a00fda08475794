use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::Serialize;

// ─────────────────────────────────────────────────────────────────────────────
// Vector2
// ─────────────────────────────────────────────────────────────────────────────

/// A point or displacement on the playfield.
///
/// The vertical axis grows downward, like the beatmap coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }

    #[must_use]
    pub const fn squared_norm(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn norm(self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self - other).norm()
    }

    /// Linear interpolation between two points.
    /// Returns `self * (1 - t) + rhs * t`.
    #[must_use]
    pub fn lerp(self, rhs: Self, t: f64) -> Self {
        Self::new(self.x + (rhs.x - self.x) * t, self.y + (rhs.y - self.y) * t)
    }

    /// Snaps both components to the nearest integer, ties away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        Self::new(self.x.round(), self.y.round())
    }

    /// Rotates around the origin by `angle` radians.
    ///
    /// With the y axis pointing down a positive angle turns clockwise on screen.
    #[must_use]
    pub fn rotated(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Z component of the 2D cross product.
    #[must_use]
    pub const fn cross(self, rhs: Self) -> f64 {
        self.x * rhs.y - self.y * rhs.x
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Vector2 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<[f64; 2]> for Vector2 {
    fn from(arr: [f64; 2]) -> Self {
        Self::new(arr[0], arr[1])
    }
}

impl From<Vector2> for [f64; 2] {
    fn from(v: Vector2) -> Self {
        v.to_array()
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector2> for f64 {
    type Output = Vector2;
    fn mul(self, rhs: Vector2) -> Self::Output {
        Vector2::new(self * rhs.x, self * rhs.y)
    }
}

impl Div<f64> for Vector2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tolerance
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub eps: f64,
}

impl Tolerance {
    /// Default geometric tolerance (1e-9).
    pub const DEFAULT: Self = Self { eps: 1e-9 };

    /// Loose tolerance for coarse comparisons (1e-6).
    pub const LOOSE: Self = Self { eps: 1e-6 };

    /// Distance to the nearest playfield pixel after snapping (0.5 plus rounding noise).
    pub const PIXEL: Self = Self { eps: 0.5 + 1e-9 };

    #[must_use]
    pub const fn new(eps: f64) -> Self {
        Self { eps }
    }

    #[must_use]
    pub const fn eps_squared(self) -> f64 {
        self.eps * self.eps
    }

    #[must_use]
    pub fn approx_eq_f64(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.eps
    }

    #[must_use]
    pub fn approx_eq_vector2(self, a: Vector2, b: Vector2) -> bool {
        (a - b).squared_norm() <= self.eps_squared()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_operators() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(4.0, 6.0);

        assert_eq!(a + b, Vector2::new(5.0, 8.0));
        assert_eq!(b - a, Vector2::new(3.0, 4.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(2.0 * a, Vector2::new(2.0, 4.0));
        assert_eq!(b / 2.0, Vector2::new(2.0, 3.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
    }

    #[test]
    fn test_vector2_norms() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.squared_norm(), 25.0);
        assert_eq!(v.norm(), 5.0);
        assert_eq!(Vector2::ZERO.distance_to(v), 5.0);
    }

    #[test]
    fn test_vector2_round_ties_away_from_zero() {
        assert_eq!(Vector2::new(2.5, -2.5).round(), Vector2::new(3.0, -3.0));
        assert_eq!(Vector2::new(1.49, 7.51).round(), Vector2::new(1.0, 8.0));
    }

    #[test]
    fn test_vector2_rotation_is_clockwise_on_screen() {
        let rotated = Vector2::new(1.0, 0.0).rotated(std::f64::consts::FRAC_PI_2);
        assert!(Tolerance::DEFAULT.approx_eq_vector2(rotated, Vector2::new(0.0, 1.0)));
    }

    #[test]
    fn test_vector2_equality_is_exact() {
        assert_ne!(Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0 + 1e-12));
    }
}
