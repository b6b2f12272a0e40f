//! Whitted-style ray tracer: spheres and convex polyhedra lit by point
//! lights, with recursive reflection and refraction.

pub mod raytracing;
