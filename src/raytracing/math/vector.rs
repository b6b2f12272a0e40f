use std::ops;

use crate::raytracing::error::GeometryError;

/// Affine 4-component vector.
///
/// `h` is the homogeneous weight: 1.0 for positions, 0.0 for directions.
/// Subtracting two positions gives a direction, adding a direction to a
/// position gives a position, so the same operators serve both.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub h: f64,
}

impl ops::Add<Vector> for Vector {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: Vector) -> Self::Output {
        Vector {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            h: self.h + rhs.h,
        }
    }
}

impl ops::AddAssign<Vector> for Vector {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
        self.h += rhs.h;
    }
}

impl ops::Sub<Vector> for Vector {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: Vector) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
            h: self.h - rhs.h,
        }
    }
}

impl ops::Neg for Vector {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        self * -1.0
    }
}

impl ops::Mul<f64> for Vector {
    type Output = Self;

    #[inline(always)]
    fn mul(self, rhs: f64) -> Self::Output {
        Vector {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            h: self.h * rhs,
        }
    }
}

impl ops::Mul<Vector> for f64 {
    type Output = Vector;

    #[inline(always)]
    fn mul(self, rhs: Vector) -> Self::Output {
        rhs * self
    }
}

impl ops::Div<f64> for Vector {
    type Output = Self;

    #[inline(always)]
    fn div(self, rhs: f64) -> Self::Output {
        Vector {
            x: self.x / rhs,
            y: self.y / rhs,
            z: self.z / rhs,
            h: self.h / rhs,
        }
    }
}

impl Vector {
    #[inline(always)]
    pub fn new(x: f64, y: f64, z: f64, h: f64) -> Vector {
        Vector { x, y, z, h }
    }

    /// A position in space (`h = 1`).
    #[inline(always)]
    pub fn point(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z, 1.0)
    }

    /// A direction, unaffected by translation (`h = 0`).
    #[inline(always)]
    pub fn direction(x: f64, y: f64, z: f64) -> Vector {
        Vector::new(x, y, z, 0.0)
    }

    #[inline(always)]
    pub fn origin() -> Vector {
        Vector::point(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub fn zero() -> Vector {
        Vector::direction(0.0, 0.0, 0.0)
    }

    #[inline(always)]
    pub fn y_axis() -> Vector {
        Vector::direction(0.0, 1.0, 0.0)
    }

    #[inline(always)]
    pub fn z_axis() -> Vector {
        Vector::direction(0.0, 0.0, 1.0)
    }

    #[inline(always)]
    pub fn dot(self: &Self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.h * other.h
    }

    /// Cross product of the xyz parts, always a direction.
    #[inline(always)]
    pub fn cross(self, other: Vector) -> Vector {
        Vector::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    #[inline(always)]
    pub fn squared_len(self) -> f64 {
        self.dot(self)
    }

    /// Euclidean norm over all four components: only meaningful as a length
    /// when `h` is zero.
    #[inline(always)]
    pub fn len(self) -> f64 {
        self.squared_len().sqrt()
    }

    #[inline(always)]
    pub fn distance(self, other: Vector) -> f64 {
        (self - other).len()
    }

    /// Unchecked normalization for the shading hot path, where the inputs are
    /// built from already validated geometry.
    #[inline(always)]
    pub fn normalize(self: &Self) -> Vector {
        let len = self.len();
        debug_assert!(len > 0.0, "normalizing a zero-length vector");
        *self / len
    }

    pub fn try_normalize(self: &Self) -> Result<Vector, GeometryError> {
        let len = self.len();
        if len == 0.0 || !len.is_finite() {
            return Err(GeometryError::DivisionByZero);
        }
        Ok(*self / len)
    }

    /// Mirror this incident direction about `normal`.
    #[inline(always)]
    pub fn reflect(self: Self, normal: Vector) -> Vector {
        let c = (-normal).dot(self);
        (self + normal * (2.0 * c)).normalize()
    }

    /// Bend this incident direction through a surface with relative index of
    /// refraction `ior`.
    ///
    /// Returns `InvalidDomain` when the radicand is negative, i.e. the ray is
    /// totally internally reflected and no refracted direction exists.
    pub fn refract(self: Self, normal: Vector, ior: f64) -> Result<Vector, GeometryError> {
        let c = (-normal).dot(self);
        let radicand = 1.0 - ior * ior * (1.0 - c * c);
        if radicand < 0.0 {
            return Err(GeometryError::InvalidDomain);
        }
        Ok((self * ior + normal * (ior * c - radicand.sqrt())).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn test_normalized_has_unit_length() {
        let samples = [
            Vector::direction(3.0, 4.0, 0.0),
            Vector::direction(-1.0, 2.0, -7.5),
            Vector::direction(1e-3, 0.0, 2e-3),
            Vector::direction(123.0, -456.0, 789.0),
        ];
        for v in samples {
            assert!(approx_eq!(f64, v.normalize().len(), 1.0, epsilon = 1e-9));
        }
    }

    #[test]
    fn test_try_normalize_zero_vector() {
        assert_eq!(
            Vector::zero().try_normalize(),
            Err(GeometryError::DivisionByZero)
        );
    }

    #[test]
    fn test_point_minus_point_is_direction() {
        let d = Vector::point(1.0, 2.0, 3.0) - Vector::point(0.0, 0.0, 1.0);
        assert_eq!(d, Vector::direction(1.0, 2.0, 2.0));
        assert_eq!((Vector::origin() + d).h, 1.0);
    }

    #[test]
    fn test_cross_is_direction() {
        let c = Vector::point(1.0, 0.0, 0.0).cross(Vector::point(0.0, 1.0, 0.0));
        assert_eq!(c, Vector::z_axis());
    }

    #[test]
    fn test_reflect_mirror_law() {
        let n = Vector::direction(0.0, 1.0, 0.0);
        let incidents = [
            Vector::direction(1.0, -1.0, 0.0).normalize(),
            Vector::direction(0.3, -0.8, 0.2).normalize(),
            Vector::direction(0.0, -1.0, 0.0),
        ];
        for d in incidents {
            let r = d.reflect(n);
            assert!(approx_eq!(f64, r.dot(n), -d.dot(n), epsilon = 1e-9));
            assert!(approx_eq!(f64, r.len(), 1.0, epsilon = 1e-9));
        }
    }

    #[test]
    fn test_refract_same_medium_is_straight() {
        let n = Vector::direction(0.0, 1.0, 0.0);
        let d = Vector::direction(1.0, -1.0, 0.0).normalize();
        let r = d.refract(n, 1.0).unwrap();
        assert!(approx_eq!(f64, r.x, d.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, r.y, d.y, epsilon = 1e-9));
    }

    #[test]
    fn test_refract_bends_toward_normal() {
        let n = Vector::direction(0.0, 1.0, 0.0);
        let d = Vector::direction(1.0, -1.0, 0.0).normalize();
        let r = d.refract(n, 1.0 / 1.5).unwrap();
        // entering a denser medium: the ray gets steeper
        assert!(r.x.abs() < d.x.abs());
        assert!(r.y < 0.0);
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        let n = Vector::direction(0.0, 1.0, 0.0);
        let grazing = Vector::direction(1.0, -0.1, 0.0).normalize();
        assert_eq!(grazing.refract(n, 1.5), Err(GeometryError::InvalidDomain));
    }
}
