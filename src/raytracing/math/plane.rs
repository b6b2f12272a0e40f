use super::Vector;
use crate::raytracing::error::GeometryError;

/// Plane `a·x + b·y + c·z = d`, oriented by the sign of `(a, b, c)`.
///
/// The normal is never flipped: which side is "outside" is decided by whoever
/// wrote the coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector,
    /// A point lying on the plane.
    pub point: Vector,
}

impl Plane {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Result<Plane, GeometryError> {
        let point = if a != 0.0 {
            Vector::point(d / a, 0.0, 0.0)
        } else if b != 0.0 {
            Vector::point(0.0, d / b, 0.0)
        } else if c != 0.0 {
            Vector::point(0.0, 0.0, d / c)
        } else {
            return Err(GeometryError::InvalidInput(format!(
                "plane ({a}, {b}, {c}, {d}) has no orientation"
            )));
        };
        let normal = Vector::direction(a, b, c).try_normalize()?;
        Ok(Plane { normal, point })
    }

    /// Distance of `p` from the plane, positive on the side the normal points to.
    #[inline(always)]
    pub fn signed_distance(&self, p: Vector) -> f64 {
        (p - self.point).dot(self.normal)
    }
}
