use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;

/// Immutable 3D vector used for position (m), velocity (m/s) and acceleration (m/s^2).
///
/// Every operation returns a new value. Dividing by an exact zero is the only
/// failing case: `checked_div` reports it, the `/` operator panics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zeros() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub const fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn scale(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }

    /// Divide every component by `scalar`, rejecting an exact zero.
    pub fn checked_div(self, scalar: f64) -> Result<Self, PhysicsError> {
        if scalar == 0.0 {
            return Err(PhysicsError::DivisionByZero);
        }
        Ok(Self::new(self.x / scalar, self.y / scalar, self.z / scalar))
    }

    pub fn magnitude(&self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction. The zero vector maps to itself.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            return Self::zeros();
        }
        self.scale(1.0 / mag)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

impl Add for Vector3D {
    type Output = Vector3D;
    fn add(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;
    fn sub(self, rhs: Vector3D) -> Vector3D {
        Vector3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;
    fn neg(self) -> Vector3D {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;
    fn mul(self, rhs: f64) -> Vector3D {
        self.scale(rhs)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;
    fn mul(self, rhs: Vector3D) -> Vector3D {
        rhs.scale(self)
    }
}

impl Div<f64> for Vector3D {
    type Output = Vector3D;

    /// Panics when `rhs` is exactly zero, like integer division in std.
    fn div(self, rhs: f64) -> Vector3D {
        match self.checked_div(rhs) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl std::iter::Sum for Vector3D {
    fn sum<I: Iterator<Item = Vector3D>>(iter: I) -> Vector3D {
        iter.fold(Vector3D::zeros(), |acc, v| acc + v)
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3e}, {:.3e}, {:.3e})", self.x, self.y, self.z)
    }
}

// ---------------------------------------------------------------------------
// nalgebra interop (used for frame rotations)
// ---------------------------------------------------------------------------

impl From<Vector3<f64>> for Vector3D {
    fn from(v: Vector3<f64>) -> Self {
        Vector3D::new(v.x, v.y, v.z)
    }
}

impl From<Vector3D> for Vector3<f64> {
    fn from(v: Vector3D) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn normalize_gives_unit_length() {
        let samples = [
            Vector3D::new(3.0, 4.0, 0.0),
            Vector3D::new(-1.0e11, 2.5e10, 7.0e9),
            Vector3D::new(1e-9, -1e-9, 1e-9),
        ];
        for v in samples {
            assert_abs_diff_eq!(v.normalize().magnitude(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn normalize_zero_is_zero() {
        let n = Vector3D::zeros().normalize();
        assert!(n.is_zero());
        assert!(n.x.is_finite() && n.y.is_finite() && n.z.is_finite());
    }

    #[test]
    fn cross_is_anticommutative() {
        let pairs = [
            (Vector3D::new(1.0, 2.0, 3.0), Vector3D::new(-4.0, 0.5, 9.0)),
            (Vector3D::new(1.496e11, 0.0, 0.0), Vector3D::new(0.0, 29_780.0, 0.0)),
            (Vector3D::new(0.0, 0.0, 1.0), Vector3D::new(0.0, 0.0, 2.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.cross(&b), -(b.cross(&a)));
        }
    }

    #[test]
    fn cross_of_basis_vectors() {
        let x = Vector3D::new(1.0, 0.0, 0.0);
        let y = Vector3D::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(&y), Vector3D::unit_z());
    }

    #[test]
    fn arithmetic_returns_new_values() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let b = Vector3D::new(0.5, -1.0, 2.0);
        assert_eq!(a + b, Vector3D::new(1.5, 1.0, 5.0));
        assert_eq!(a - b, Vector3D::new(0.5, 3.0, 1.0));
        assert_eq!(a * 2.0, Vector3D::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, a.scale(2.0));
        assert_eq!(a / 2.0, Vector3D::new(0.5, 1.0, 1.5));
        assert_abs_diff_eq!(a.dot(&b), 4.5);
        // operands untouched
        assert_eq!(a, Vector3D::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn checked_div_rejects_zero() {
        let v = Vector3D::new(1.0, 1.0, 1.0);
        assert_eq!(v.checked_div(0.0), Err(PhysicsError::DivisionByZero));
        assert_eq!(v.checked_div(4.0), Ok(Vector3D::new(0.25, 0.25, 0.25)));
    }

    #[test]
    #[should_panic(expected = "division of a vector by zero")]
    fn div_operator_panics_on_zero() {
        let _ = Vector3D::new(1.0, 0.0, 0.0) / 0.0;
    }

    #[test]
    fn nalgebra_conversion_preserves_components() {
        let v = Vector3D::new(1.0, -2.0, 3.5);
        let n: Vector3<f64> = v.into();
        assert_abs_diff_eq!(n.norm(), v.magnitude(), epsilon = 1e-12);
        assert_eq!(Vector3D::from(n), v);
    }
}
