use super::camera::Camera;
use super::math::{Color, Ray, Vector};
use super::solid::{RayHittable, Solid};
use super::texture::Texture;

/// Hits closer than this to the ray origin are ignored (shadow acne).
const EPSILON: f64 = 1e-5;

/// Reflectance coefficients of a surface. Values outside [0, 1] are accepted
/// and simply scale their term.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    /// ambient
    pub ka: f64,
    /// diffuse
    pub kd: f64,
    /// specular
    pub ks: f64,
    /// shininess exponent
    pub shininess: f64,
    /// reflectivity
    pub kr: f64,
    /// transmissivity
    pub kt: f64,
    /// index of refraction
    pub ior: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
    pub constant: f64,
    pub linear: f64,
    pub quadratic: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Light {
    pub position: Vector,
    pub color: Color,
    pub attenuation: Attenuation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub solid: Solid,
    pub material: Material,
    pub texture: Texture,
}

/// Everything a render reads. Never mutated while rendering.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    /// Its color is both the ambient term and the background.
    pub ambient: Light,
    pub lights: Vec<Light>,
    pub objects: Vec<SceneObject>,
}

pub struct RaycastResult<'a> {
    pub hitted_object: &'a SceneObject,
    pub object_index: usize,
    pub t: f64,
    pub hit_point: Vector,
    pub normal: Vector,
    pub inside: bool,
}

impl Attenuation {
    pub fn none() -> Attenuation {
        Attenuation {
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
        }
    }

    /// Inverse attenuation factor at `distance` from the light.
    pub fn factor(&self, distance: f64) -> f64 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * self.quadratic * distance)
    }
}

impl Light {
    pub fn new(position: Vector, color: Color, attenuation: Attenuation) -> Light {
        Light {
            position,
            color,
            attenuation,
        }
    }

    /// A light only used for its color.
    pub fn ambient(color: Color) -> Light {
        Light::new(Vector::origin(), color, Attenuation::none())
    }
}

impl Material {
    pub fn diffuse() -> Material {
        Material {
            ka: 0.0,
            kd: 1.0,
            ks: 0.0,
            shininess: 1.0,
            kr: 0.0,
            kt: 0.0,
            ior: 1.0,
        }
    }
}

/// Nearest object hit by `ray`, skipping the object at index `ignore`.
pub fn hit<'a>(scene: &'a Scene, ray: &Ray, ignore: Option<usize>) -> Option<RaycastResult<'a>> {
    let mut closest: Option<RaycastResult> = None;
    for (index, object) in scene.objects.iter().enumerate() {
        if Some(index) == ignore {
            continue;
        }
        if let Some(result) = object.solid.hit(ray, EPSILON) {
            if closest.as_ref().map_or(true, |c| result.t < c.t) {
                closest = Some(RaycastResult {
                    hitted_object: object,
                    object_index: index,
                    t: result.t,
                    hit_point: ray.at(result.t),
                    normal: result.normal,
                    inside: result.inside,
                });
            }
        }
    }
    closest
}

/// Color seen along `ray`, following reflections and refractions while
/// `depth` is positive.
pub fn trace(scene: &Scene, ray: &Ray, depth: u32, ignore: Option<usize>) -> Color {
    let Some(result) = hit(scene, ray, ignore) else {
        return scene.ambient.color;
    };
    let material = result.hitted_object.material;
    let position = result.hit_point;
    let normal = result.normal;

    let ambient = scene.ambient.color * material.ka;
    let mut diffuse = Color::black();
    let mut specular = Color::black();
    let mut reflection = Color::black();
    let mut refraction = Color::black();

    for light in &scene.lights {
        let to_light = light.position - position;
        let light_distance = to_light.len();
        let light_dir = to_light.normalize();

        // the light is hidden only by something in between
        let shadow_ray = Ray::new(position, light_dir);
        if let Some(occluder) = hit(scene, &shadow_ray, None) {
            if occluder.t < light_distance {
                continue;
            }
        }

        let attenuation = light.attenuation.factor(light_distance);
        let diffuse_k = light_dir.dot(normal).max(0.0);
        diffuse += light.color * attenuation * diffuse_k * material.kd;

        // undefined when the light sits right along the ray
        if let Ok(halfway) = (light_dir - ray.direction).try_normalize() {
            let specular_k = halfway.dot(normal).max(0.0);
            specular +=
                light.color * attenuation * specular_k.powf(material.shininess) * material.ks;
        }
    }

    if depth > 0 {
        if material.kr > 0.0 {
            let reflected = Ray::new(position, ray.direction.reflect(normal));
            reflection = trace(scene, &reflected, depth - 1, Some(result.object_index)) * material.kr;
        }
        if material.kt > 0.0 {
            match ray.direction.refract(normal, material.ior) {
                Ok(direction) => {
                    let coeff = if result.inside {
                        1.0 / material.kt
                    } else {
                        material.kt
                    };
                    let refracted = Ray::new(position, direction);
                    refraction =
                        trace(scene, &refracted, depth - 1, Some(result.object_index)) * coeff;
                }
                Err(err) => {
                    log::trace!("no refraction at {:?}: {}", position, err);
                }
            }
        }
    }

    let surface = result.hitted_object.texture.color_at(position, normal);
    (surface * (ambient + diffuse) + specular + reflection + refraction).clamped()
}
