use std::path::PathBuf;

use super::math::{Color, Vector};

/// Color used by texture maps, which are accepted but never sampled.
pub const TEXTURE_MAP_PLACEHOLDER: Color = Color {
    r: 0.9,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Texture {
    Solid(Color),
    /// 3D checkerboard of cubic cells with side `size`.
    Checker {
        primary: Color,
        secondary: Color,
        size: f64,
    },
    /// Image texture projected between two reference points. Image sampling
    /// is not supported: it always yields [`TEXTURE_MAP_PLACEHOLDER`].
    Map {
        path: PathBuf,
        p0: Vector,
        p1: Vector,
    },
}

impl Texture {
    pub fn color_at(&self, position: Vector, _normal: Vector) -> Color {
        match self {
            Texture::Solid(color) => *color,
            Texture::Checker {
                primary,
                secondary,
                size,
            } => {
                let cell = (position.x / size).floor()
                    + (position.y / size).floor()
                    + (position.z / size).floor();
                if cell.rem_euclid(2.0) == 0.0 {
                    *primary
                } else {
                    *secondary
                }
            }
            Texture::Map { .. } => TEXTURE_MAP_PLACEHOLDER,
        }
    }
}
