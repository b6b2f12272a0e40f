use whitted::raytracing::camera::Camera;
use whitted::raytracing::core::{Attenuation, Light, Material, Scene, SceneObject};
use whitted::raytracing::math::{Color, Plane, Vector};
use whitted::raytracing::parser::SceneParser;
use whitted::raytracing::render::{render, RenderConfig, RenderMode};
use whitted::raytracing::solid::{Polyhedron, Solid, Sphere};
use whitted::raytracing::texture::Texture;

fn sequential(max_depth: u32) -> RenderConfig {
    RenderConfig {
        max_depth,
        mode: RenderMode::Sequential,
    }
}

fn single_sphere_scene(lights: Vec<Light>) -> Scene {
    Scene {
        // narrow field of view so the single pixel lands on the sphere
        camera: Camera::new(
            Vector::origin(),
            Vector::point(0.0, 0.0, 1.0),
            Vector::y_axis(),
            10.0,
        )
        .unwrap(),
        ambient: Light::ambient(Color::rgb(0.1, 0.1, 0.1)),
        lights,
        objects: vec![SceneObject {
            solid: Solid::Sphere(Sphere::new(Vector::point(0.0, 0.0, 5.0), 1.0)),
            material: Material::diffuse(),
            texture: Texture::Solid(Color::white()),
        }],
    }
}

fn overhead_light() -> Light {
    Light::new(
        Vector::point(0.0, 10.0, 0.0),
        Color::white(),
        Attenuation::none(),
    )
}

fn showcase_scene() -> Scene {
    let cube_faces = [
        (-1.0, 0.0, 0.0, 1.0),
        (1.0, 0.0, 0.0, 0.0),
        (0.0, -1.0, 0.0, 1.0),
        (0.0, 1.0, 0.0, 0.0),
        (0.0, 0.0, -1.0, -4.0),
        (0.0, 0.0, 1.0, 5.0),
    ];
    let cube = Polyhedron::new(
        cube_faces
            .iter()
            .map(|&(a, b, c, d)| Plane::new(a, b, c, d).unwrap())
            .collect(),
    );
    let floor = Polyhedron::new(vec![Plane::new(0.0, 1.0, 0.0, -1.0).unwrap()]);

    Scene {
        camera: Camera::new(
            Vector::point(0.0, 0.5, -2.0),
            Vector::point(0.0, 0.4, -1.0),
            Vector::y_axis(),
            60.0,
        )
        .unwrap(),
        ambient: Light::ambient(Color::rgb(0.2, 0.25, 0.3)),
        lights: vec![
            Light::new(
                Vector::point(-3.0, 6.0, -2.0),
                Color::white(),
                Attenuation {
                    constant: 1.0,
                    linear: 0.05,
                    quadratic: 0.1,
                },
            ),
            Light::new(
                Vector::point(4.0, 3.0, 0.0),
                Color::rgb(0.4, 0.4, 0.8),
                Attenuation::none(),
            ),
        ],
        objects: vec![
            SceneObject {
                solid: Solid::Sphere(Sphere::new(Vector::point(0.8, 0.0, 4.0), 0.8)),
                material: Material {
                    ka: 0.1,
                    kd: 0.3,
                    ks: 0.6,
                    shininess: 30.0,
                    kr: 0.4,
                    kt: 0.5,
                    ior: 1.3,
                },
                texture: Texture::Solid(Color::rgb(0.9, 0.9, 1.0)),
            },
            SceneObject {
                solid: Solid::Polyhedron(cube),
                material: Material {
                    ka: 0.2,
                    kd: 0.7,
                    ks: 0.2,
                    shininess: 8.0,
                    kr: 0.2,
                    kt: 0.0,
                    ior: 1.0,
                },
                texture: Texture::Solid(Color::rgb(0.8, 0.2, 0.2)),
            },
            SceneObject {
                solid: Solid::Polyhedron(floor),
                material: Material {
                    ka: 0.3,
                    kd: 0.8,
                    ks: 0.0,
                    shininess: 1.0,
                    kr: 0.3,
                    kt: 0.0,
                    ior: 1.0,
                },
                texture: Texture::Checker {
                    primary: Color::white(),
                    secondary: Color::rgb(0.1, 0.1, 0.1),
                    size: 0.5,
                },
            },
        ],
    }
}

#[test]
fn diffuse_light_brightens_single_pixel() {
    let lit = single_sphere_scene(vec![overhead_light()]);
    let dark = single_sphere_scene(vec![]);

    let lit_frame = render(&lit, 1, 1, &sequential(5)).unwrap();
    let dark_frame = render(&dark, 1, 1, &sequential(5)).unwrap();

    let lit_pixel = lit_frame.get(0, 0).unwrap().rgb;
    let dark_pixel = dark_frame.get(0, 0).unwrap().rgb;
    assert!(lit_pixel.iter().zip(dark_pixel.iter()).all(|(l, d)| l > d));
    assert!(lit_pixel[0] > 100);
}

#[test]
fn render_is_idempotent() {
    let scene = showcase_scene();
    let first = render(&scene, 32, 24, &sequential(4)).unwrap();
    let second = render(&scene, 32, 24, &sequential(4)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn parallel_matches_sequential() {
    let scene = showcase_scene();
    let expected = render(&scene, 40, 30, &sequential(4)).unwrap();
    for workers in [1, 3, 4] {
        let config = RenderConfig {
            max_depth: 4,
            mode: RenderMode::Parallel { workers },
        };
        let frame = render(&scene, 40, 30, &config).unwrap();
        assert_eq!(frame, expected, "{} workers", workers);
    }
}

#[test]
fn showcase_scene_is_not_flat() {
    let frame = render(&showcase_scene(), 40, 30, &RenderConfig::default()).unwrap();
    assert_eq!(frame.samples.len(), 40 * 30);
    let first = frame.samples[0].rgb;
    assert!(frame.samples.iter().any(|sample| sample.rgb != first));
}

#[test]
fn render_parsed_scene() {
    let source = "\
0 0 0
0 0 1
0 1 0
10
2
0 0 0 0.1 0.1 0.1 1 0
0 10 0 1 1 1 1 0 0
1
solid 1 1 1
1
0 1 0 1 0 0 1
1
0 0 sphere 0 0 5 1
";
    let scene = SceneParser::new(source).parse_scene().unwrap();
    let parsed = render(&scene, 1, 1, &sequential(5)).unwrap();
    let built = render(&single_sphere_scene(vec![overhead_light()]), 1, 1, &sequential(5)).unwrap();
    assert_eq!(parsed.samples, built.samples);
}
