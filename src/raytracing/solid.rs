use super::math::{Plane, Ray, Vector};

/// Below this `|direction · normal|` a ray is considered parallel to a face.
const PARALLEL_EPSILON: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResult {
    pub t: f64,
    /// Faces against the incoming ray, flipped when the ray starts inside.
    pub normal: Vector,
    /// The ray origin lies inside the solid.
    pub inside: bool,
}

pub trait RayHittable {
    /// First intersection strictly beyond `t_min` along `ray`.
    fn hit(&self, ray: &Ray, t_min: f64) -> Option<HitResult>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: Vector,
    pub radius: f64,
}

/// Convex solid bounded by the intersection of half-spaces, every plane
/// normal pointing outward.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyhedron {
    pub planes: Vec<Plane>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Sphere(Sphere),
    Polyhedron(Polyhedron),
}

impl Sphere {
    pub fn new(center: Vector, radius: f64) -> Sphere {
        Sphere { center, radius }
    }

    pub fn normal_at(&self, point: Vector) -> Vector {
        (point - self.center).normalize()
    }
}

impl RayHittable for Sphere {
    fn hit(&self, ray: &Ray, t_min: f64) -> Option<HitResult> {
        let l = self.center - ray.origin;
        let tca = l.dot(ray.direction);
        // center behind the origin
        if tca < 0.0 {
            return None;
        }
        let radius_squared = self.radius * self.radius;
        // squared distance between the center and the ray line
        let d = l.dot(l) - tca * tca;
        if d > radius_squared {
            return None;
        }
        let thc = (radius_squared - d).sqrt();
        let (near, far) = (tca - thc, tca + thc);
        // a ray leaving the surface has its near root at ~0: use the far one
        let inside = near <= t_min;
        let t = if near > t_min {
            near
        } else if far > t_min {
            far
        } else {
            return None;
        };
        let normal = self.normal_at(ray.at(t));
        Some(HitResult {
            t,
            normal: if inside { -normal } else { normal },
            inside,
        })
    }
}

impl Polyhedron {
    pub fn new(planes: Vec<Plane>) -> Polyhedron {
        Polyhedron { planes }
    }
}

impl RayHittable for Polyhedron {
    fn hit(&self, ray: &Ray, t_min: f64) -> Option<HitResult> {
        // clip the ray against every half-space, keeping the farthest entry
        // and the nearest exit
        let mut entry = 0.0;
        let mut entry_normal = None;
        let mut exit = f64::INFINITY;
        let mut exit_normal = None;

        for plane in &self.planes {
            let facing = ray.direction.dot(plane.normal);
            let offset = plane.signed_distance(ray.origin);
            if facing.abs() <= PARALLEL_EPSILON {
                // parallel and outside this face: can never get in
                if offset > PARALLEL_EPSILON {
                    return None;
                }
                continue;
            }
            let t = -offset / facing;
            if facing > 0.0 {
                if t < exit {
                    exit = t;
                    exit_normal = Some(plane.normal);
                }
            } else if t > entry {
                entry = t;
                entry_normal = Some(plane.normal);
            }
        }

        if entry >= exit || exit <= t_min {
            return None;
        }
        if entry <= t_min {
            // no face crossed in front of the origin: we are leaving the solid
            return exit_normal.map(|normal| HitResult {
                t: exit,
                normal: -normal,
                inside: true,
            });
        }
        entry_normal.map(|normal| HitResult {
            t: entry,
            normal,
            inside: false,
        })
    }
}

impl RayHittable for Solid {
    fn hit(&self, ray: &Ray, t_min: f64) -> Option<HitResult> {
        match self {
            Solid::Sphere(sphere) => sphere.hit(ray, t_min),
            Solid::Polyhedron(polyhedron) => polyhedron.hit(ray, t_min),
        }
    }
}
