pub mod color;
pub mod plane;
pub mod ray;
pub mod vector;

pub use color::*;
pub use plane::*;
pub use ray::*;
pub use vector::*;
