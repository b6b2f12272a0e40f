use super::error::GeometryError;
use super::math::{Ray, Vector};

/// Pinhole camera looking from `position` through `proj_position`, the
/// center of the image plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vector,
    pub proj_position: Vector,
    pub up: Vector,
    /// Vertical field of view in degrees.
    pub fovy: f64,
}

/// Image plane geometry for one render, shared read-only by every pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub eye: Vector,
    pub top_left: Vector,
    /// Step between two horizontally adjacent pixels.
    pub x_step: Vector,
    /// Step between two vertically adjacent pixels (pointing down).
    pub y_step: Vector,
}

impl Camera {
    pub fn new(
        position: Vector,
        proj_position: Vector,
        up: Vector,
        fovy: f64,
    ) -> Result<Camera, GeometryError> {
        let camera = Camera {
            position,
            proj_position,
            up: up.try_normalize()?,
            fovy,
        };
        // fail early on a basis we could not build at render time
        camera.right()?;
        Ok(camera)
    }

    /// Unit vector from the image plane back to the eye.
    pub fn direction(&self) -> Result<Vector, GeometryError> {
        (self.position - self.proj_position)
            .try_normalize()
            .map_err(|_| {
                GeometryError::InvalidInput(
                    "camera position and projection point coincide".to_string(),
                )
            })
    }

    pub fn right(&self) -> Result<Vector, GeometryError> {
        self.direction()?.cross(self.up).try_normalize().map_err(|_| {
            GeometryError::InvalidInput("camera up vector is parallel to the view".to_string())
        })
    }

    pub fn viewport(&self, width: u32, height: u32) -> Result<Viewport, GeometryError> {
        if width == 0 || height == 0 {
            return Err(GeometryError::InvalidInput(format!(
                "image size {width}x{height}"
            )));
        }
        let aspect_ratio = width as f64 / height as f64;
        let distance = self.position.distance(self.proj_position);
        let right = self.right()?;
        let down = -self.up;

        let plane_height = 2.0 * (0.5 * self.fovy).to_radians().tan() * distance;
        let plane_width = plane_height * aspect_ratio;

        Ok(Viewport {
            eye: self.position,
            top_left: self.proj_position + self.up * (plane_height / 2.0)
                - right * (plane_width / 2.0),
            x_step: right * (plane_width / width as f64),
            y_step: down * (plane_height / height as f64),
        })
    }
}

impl Viewport {
    pub fn pixel_position(&self, x: u32, y: u32) -> Vector {
        self.top_left + self.x_step * x as f64 + self.y_step * y as f64
    }

    /// Ray from the eye through the pixel.
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        Ray {
            origin: self.eye,
            direction: (self.pixel_position(x, y) - self.eye).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn camera() -> Camera {
        Camera::new(
            Vector::origin(),
            Vector::point(0.0, 0.0, 1.0),
            Vector::direction(0.0, 2.0, 0.0),
            90.0,
        )
        .unwrap()
    }

    #[test]
    fn test_up_is_normalized() {
        assert_eq!(camera().up, Vector::y_axis());
    }

    #[test]
    fn test_viewport_corners() {
        let viewport = camera().viewport(4, 2).unwrap();
        // fovy 90 at distance 1: plane is 2 high and 4 wide
        let top_left = viewport.top_left;
        assert!(approx_eq!(f64, top_left.y, 1.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, top_left.z, 1.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, top_left.x.abs(), 2.0, epsilon = 1e-9));
        assert_eq!(top_left.h, 1.0);
        assert!(approx_eq!(f64, viewport.x_step.len(), 1.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, viewport.y_step.y, -1.0, epsilon = 1e-9));
        // the far corner is the mirror of the top left one
        let far = viewport.pixel_position(4, 2);
        assert!(approx_eq!(f64, far.x, -top_left.x, epsilon = 1e-9));
        assert!(approx_eq!(f64, far.y, -1.0, epsilon = 1e-9));
    }

    #[test]
    fn test_primary_ray_is_unit() {
        let viewport = camera().viewport(8, 8).unwrap();
        let ray = viewport.primary_ray(3, 5);
        assert!(approx_eq!(f64, ray.direction.len(), 1.0, epsilon = 1e-9));
        assert_eq!(ray.direction.h, 0.0);
        assert!(ray.direction.z > 0.0);
    }

    #[test]
    fn test_degenerate_camera() {
        let coincident = Camera::new(
            Vector::origin(),
            Vector::origin(),
            Vector::y_axis(),
            45.0,
        );
        assert!(matches!(coincident, Err(GeometryError::InvalidInput(_))));

        let parallel_up = Camera::new(
            Vector::origin(),
            Vector::point(0.0, 0.0, 1.0),
            Vector::z_axis(),
            45.0,
        );
        assert!(matches!(parallel_up, Err(GeometryError::InvalidInput(_))));

        assert!(Camera::new(
            Vector::origin(),
            Vector::point(0.0, 0.0, 1.0),
            Vector::zero(),
            45.0
        )
        .is_err());
    }

    #[test]
    fn test_zero_sized_viewport() {
        assert!(camera().viewport(0, 10).is_err());
    }
}
