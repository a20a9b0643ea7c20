//! 2D vector arithmetic for positions and headings.
//!
//! A `Vector` is used both as a point in the world and as a direction.
//! All operations return new values. Operations that are undefined at
//! zero magnitude (normalization, cosine similarity, angles) return
//! `Option` so callers can keep their previous value instead of
//! propagating NaN.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Magnitudes at or below this are treated as zero.
pub const NEAR_ZERO: f64 = 1e-12;

/// A point or direction in the simulation plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing `degrees` counter-clockwise from the +x axis.
    pub fn from_degrees(degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(rad.cos(), rad.sin())
    }

    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn magnitude_squared(&self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    pub fn distance_squared_to(&self, other: &Vector) -> f64 {
        (*self - *other).magnitude_squared()
    }

    pub fn distance_to(&self, other: &Vector) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Unit vector in the same direction, or `None` at zero magnitude.
    pub fn try_normalize(&self) -> Option<Vector> {
        let mag = self.magnitude();
        if mag <= NEAR_ZERO || !mag.is_finite() {
            return None;
        }
        Some(Vector::new(self.x / mag, self.y / mag))
    }

    /// Unit vector in the same direction, or `fallback` at zero magnitude.
    pub fn normalize_or(&self, fallback: Vector) -> Vector {
        self.try_normalize().unwrap_or(fallback)
    }

    /// Rotate counter-clockwise by `degrees`.
    pub fn rotate(&self, degrees: f64) -> Vector {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Vector::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Cosine of the angle between the two vectors, in `[-1, 1]`.
    ///
    /// `None` if either vector has zero magnitude.
    pub fn cosine_similarity(&self, other: &Vector) -> Option<f64> {
        let denom = self.magnitude() * other.magnitude();
        if denom <= NEAR_ZERO || !denom.is_finite() {
            return None;
        }
        Some((self.dot(other) / denom).clamp(-1.0, 1.0))
    }

    /// Unsigned angle between the two vectors in degrees, in `[0, 180]`.
    pub fn angle_between(&self, other: &Vector) -> Option<f64> {
        self.cosine_similarity(other).map(|cos| cos.acos().to_degrees())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector, b: Vector) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn arithmetic_operators() {
        let a = Vector::new(1.0, 2.0);
        let b = Vector::new(3.0, -1.0);
        assert_eq!(a + b, Vector::new(4.0, 1.0));
        assert_eq!(a - b, Vector::new(-2.0, 3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0));
    }

    #[test]
    fn magnitude_and_distance() {
        let v = Vector::new(3.0, 4.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(Vector::ZERO.distance_to(&v), 5.0);
        assert_eq!(Vector::ZERO.distance_squared_to(&v), 25.0);
    }

    #[test]
    fn normalize_unit_length() {
        let n = Vector::new(10.0, 0.0).try_normalize().unwrap();
        assert_eq!(n, Vector::new(1.0, 0.0));
        let m = Vector::new(-2.0, 7.5).try_normalize().unwrap();
        assert!((m.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_zero_is_none() {
        assert!(Vector::ZERO.try_normalize().is_none());
        let keep = Vector::new(0.0, 1.0);
        assert_eq!(Vector::ZERO.normalize_or(keep), keep);
    }

    #[test]
    fn rotate_quarter_turn() {
        let r = Vector::new(1.0, 0.0).rotate(90.0);
        assert!(approx(r, Vector::new(0.0, 1.0)), "got {:?}", r);
        let back = r.rotate(-90.0);
        assert!(approx(back, Vector::new(1.0, 0.0)));
    }

    #[test]
    fn rotation_preserves_magnitude() {
        let v = Vector::new(2.0, -3.0);
        for deg in [-179.0, -45.0, 0.5, 33.0, 270.0] {
            assert!((v.rotate(deg).magnitude() - v.magnitude()).abs() < 1e-9);
        }
    }

    #[test]
    fn cosine_similarity_cases() {
        let x = Vector::new(1.0, 0.0);
        assert_eq!(x.cosine_similarity(&Vector::new(5.0, 0.0)), Some(1.0));
        assert_eq!(x.cosine_similarity(&Vector::new(-2.0, 0.0)), Some(-1.0));
        let ortho = x.cosine_similarity(&Vector::new(0.0, 3.0)).unwrap();
        assert!(ortho.abs() < 1e-12);
        assert!(x.cosine_similarity(&Vector::ZERO).is_none());
    }

    #[test]
    fn angle_between_is_clamped() {
        let a = Vector::new(1.0, 1e-17);
        let angle = a.angle_between(&a).unwrap();
        assert!(!angle.is_nan());
        assert!(angle.abs() < 1e-6);
        let half = Vector::new(1.0, 0.0).angle_between(&Vector::new(-1.0, 0.0)).unwrap();
        assert!((half - 180.0).abs() < 1e-9);
    }

    #[test]
    fn from_degrees_is_unit() {
        for deg in [0.0, 45.0, 190.0] {
            assert!((Vector::from_degrees(deg).magnitude() - 1.0).abs() < 1e-12);
        }
        assert!(approx(Vector::from_degrees(180.0), Vector::new(-1.0, 0.0)));
    }
}
