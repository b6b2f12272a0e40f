pub mod camera;
pub mod core;
pub mod error;
pub mod math;
pub mod parser;
pub mod render;
pub mod solid;
pub mod texture;

pub use math::*;
