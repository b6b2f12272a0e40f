//! Line oriented scene description.
//!
//! ```text
//! # camera: eye, projection point, up vector, vertical fov (degrees)
//! 0 0 0
//! 0 0 1
//! 0 1 0
//! 45
//! # lights, the first one is the ambient light: x y z r g b constant linear [quadratic]
//! 2
//! 0 0 0 0.1 0.1 0.1 1 0
//! 0 10 0 1 1 1 1 0 0
//! # textures
//! 1
//! checker 1 1 1 0 0 0 0.5
//! # materials: ka kd ks shininess kr kt ior
//! 1
//! 0.1 0.8 0.3 20 0 0 1
//! # objects: texture material kind ...
//! 1
//! 0 0 sphere 0 0 5 1
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use super::camera::Camera;
use super::core::{Attenuation, Light, Material, Scene, SceneObject};
use super::math::{Color, Plane, Vector};
use super::solid::{Polyhedron, Solid, Sphere};
use super::texture::Texture;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilePosition {
    /// 1-based
    pub line: u32,
    /// 1-based
    pub column: u32,
}

impl fmt::Display for FilePosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} at {position}")]
pub struct ParserError {
    pub position: FilePosition,
    pub message: String,
}

impl ParserError {
    fn new(message: impl Into<String>, position: FilePosition) -> ParserError {
        ParserError {
            position,
            message: message.into(),
        }
    }

    /// Formats the offending line with a caret under the failing column.
    pub fn error_location(&self, content: &str) -> Option<String> {
        let line = content.lines().nth(self.position.line.checked_sub(1)? as usize)?;
        let spacing = " ".repeat(self.position.column.saturating_sub(1) as usize);
        Some(format!("{}\n{}^", line, spacing))
    }
}

type ParserResult<T> = Result<T, ParserError>;

/// One non-empty line, comments stripped.
struct Record<'a> {
    line: u32,
    /// (1-based column, token)
    tokens: Vec<(u32, &'a str)>,
    end_column: u32,
}

impl<'a> Record<'a> {
    fn new(line: u32, content: &'a str) -> Record<'a> {
        let mut tokens = Vec::new();
        let mut start = None;
        for (i, c) in content.char_indices() {
            match (c.is_whitespace(), start) {
                (false, None) => start = Some(i),
                (true, Some(s)) => {
                    tokens.push((s as u32 + 1, &content[s..i]));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            tokens.push((s as u32 + 1, &content[s..]));
        }
        Record {
            line,
            tokens,
            end_column: content.len() as u32 + 1,
        }
    }

    fn position(&self, index: usize) -> FilePosition {
        let column = self
            .tokens
            .get(index)
            .map_or(self.end_column, |(column, _)| *column);
        FilePosition {
            line: self.line,
            column,
        }
    }

    fn error<T>(&self, index: usize, message: impl Into<String>) -> ParserResult<T> {
        Err(ParserError::new(message, self.position(index)))
    }

    fn token(&self, index: usize, what: &str) -> ParserResult<&'a str> {
        match self.tokens.get(index) {
            Some((_, token)) => Ok(*token),
            None => self.error(index, format!("expected {}", what)),
        }
    }

    /// Checks the record holds between `min` and `max` tokens.
    fn expect_len(&self, min: usize, max: usize, what: &str) -> ParserResult<()> {
        let len = self.tokens.len();
        if len < min {
            let message = format!("{} needs {} values, found {}", what, min, len);
            return self.error(len, message);
        }
        if len > max {
            return self.error(max, format!("unexpected extra value after {}", what));
        }
        Ok(())
    }

    fn float(&self, index: usize) -> ParserResult<f64> {
        let token = self.token(index, "a number")?;
        match token.parse::<f64>() {
            Ok(num) => Ok(num),
            Err(_) => self.error(index, format!("cannot interp '{}' as a float", token)),
        }
    }

    fn count(&self, index: usize) -> ParserResult<usize> {
        let token = self.token(index, "a count")?;
        match token.parse::<usize>() {
            Ok(num) => Ok(num),
            Err(_) => self.error(
                index,
                format!("cannot interp '{}' as a non-negative integer", token),
            ),
        }
    }

    fn point(&self, start: usize) -> ParserResult<Vector> {
        Ok(Vector::point(
            self.float(start)?,
            self.float(start + 1)?,
            self.float(start + 2)?,
        ))
    }

    fn color(&self, start: usize) -> ParserResult<Color> {
        Ok(Color::rgb(
            self.float(start)?,
            self.float(start + 1)?,
            self.float(start + 2)?,
        ))
    }
}

pub struct SceneParser<'a> {
    records: Vec<Record<'a>>,
    cursor: usize,
    last_line: u32,
}

impl<'a> SceneParser<'a> {
    pub fn new(content: &'a str) -> SceneParser<'a> {
        let records: Vec<Record> = content
            .lines()
            .enumerate()
            .map(|(i, line)| {
                // drop comments
                let line_content = line.split('#').next().unwrap_or("");
                Record::new(i as u32 + 1, line_content)
            })
            .filter(|record| !record.tokens.is_empty())
            .collect();
        SceneParser {
            records,
            cursor: 0,
            last_line: content.lines().count() as u32,
        }
    }

    fn next_record(&mut self, what: &str) -> ParserResult<&Record<'a>> {
        if self.cursor >= self.records.len() {
            let position = FilePosition {
                line: self.last_line.max(1),
                column: 1,
            };
            let message = format!("unexpected end of file, expected {}", what);
            return Err(ParserError::new(message, position));
        }
        self.cursor += 1;
        Ok(&self.records[self.cursor - 1])
    }

    fn parse_count(&mut self, what: &str) -> ParserResult<usize> {
        let record = self.next_record(what)?;
        record.expect_len(1, 1, what)?;
        record.count(0)
    }

    fn parse_point(&mut self, what: &str) -> ParserResult<Vector> {
        let record = self.next_record(what)?;
        record.expect_len(3, 3, what)?;
        record.point(0)
    }

    fn parse_camera(&mut self) -> ParserResult<Camera> {
        let position = self.parse_point("the camera position")?;
        let proj_position = self.parse_point("the camera projection point")?;
        let up = self.parse_point("the camera up vector")?;
        let record = self.next_record("the camera field of view")?;
        record.expect_len(1, 1, "the camera field of view")?;
        let fovy = record.float(0)?;
        let up = Vector::direction(up.x, up.y, up.z);
        Camera::new(position, proj_position, up, fovy)
            .or_else(|err| record.error(0, format!("invalid camera: {}", err)))
    }

    fn parse_light(&mut self) -> ParserResult<Light> {
        let record = self.next_record("a light")?;
        record.expect_len(8, 9, "a light")?;
        let position = record.point(0)?;
        let color = record.color(3)?;
        let quadratic = if record.tokens.len() == 9 {
            record.float(8)?
        } else {
            0.0
        };
        Ok(Light::new(
            position,
            color,
            Attenuation {
                constant: record.float(6)?,
                linear: record.float(7)?,
                quadratic,
            },
        ))
    }

    fn parse_texture(&mut self) -> ParserResult<Texture> {
        let record = self.next_record("a texture")?;
        match record.token(0, "a texture kind")? {
            "solid" => {
                record.expect_len(4, 4, "a solid texture")?;
                Ok(Texture::Solid(record.color(1)?))
            }
            "checker" => {
                record.expect_len(8, 8, "a checker texture")?;
                let size = record.float(7)?;
                if size <= 0.0 {
                    return record.error(7, "checker size must be positive");
                }
                Ok(Texture::Checker {
                    primary: record.color(1)?,
                    secondary: record.color(4)?,
                    size,
                })
            }
            "texmap" => {
                record.expect_len(2, 2, "a texture map")?;
                let path = PathBuf::from(record.token(1, "a file name")?);
                log::warn!(
                    "texture map {} (line {}) is not sampled, using a placeholder color",
                    path.display(),
                    record.line
                );
                let p0 = self.parse_point("the first texture map point")?;
                let p1 = self.parse_point("the second texture map point")?;
                Ok(Texture::Map { path, p0, p1 })
            }
            kind => record.error(0, format!("unknown texture kind '{}'", kind)),
        }
    }

    fn parse_material(&mut self) -> ParserResult<Material> {
        let record = self.next_record("a material")?;
        record.expect_len(7, 7, "a material")?;
        Ok(Material {
            ka: record.float(0)?,
            kd: record.float(1)?,
            ks: record.float(2)?,
            shininess: record.float(3)?,
            kr: record.float(4)?,
            kt: record.float(5)?,
            ior: record.float(6)?,
        })
    }

    fn parse_plane(&mut self) -> ParserResult<Plane> {
        let record = self.next_record("a polyhedron face")?;
        record.expect_len(4, 4, "a polyhedron face")?;
        let (a, b, c, d) = (
            record.float(0)?,
            record.float(1)?,
            record.float(2)?,
            record.float(3)?,
        );
        Plane::new(a, b, c, d).or_else(|err| record.error(0, err.to_string()))
    }

    fn parse_object(
        &mut self,
        textures: &[Texture],
        materials: &[Material],
    ) -> ParserResult<SceneObject> {
        let record = self.next_record("an object")?;
        let texture_id = record.count(0)?;
        let Some(texture) = textures.get(texture_id) else {
            return record.error(0, format!("no texture with id {}", texture_id));
        };
        let material_id = record.count(1)?;
        let Some(material) = materials.get(material_id) else {
            return record.error(1, format!("no material with id {}", material_id));
        };
        let (texture, material) = (texture.clone(), *material);

        let solid = match record.token(2, "an object kind")? {
            "sphere" => {
                record.expect_len(7, 7, "a sphere")?;
                let center = record.point(3)?;
                let radius = record.float(6)?;
                if radius <= 0.0 {
                    return record.error(6, "sphere radius must be positive");
                }
                Solid::Sphere(Sphere::new(center, radius))
            }
            "polyhedron" => {
                record.expect_len(4, 4, "a polyhedron")?;
                let face_count = record.count(3)?;
                let planes = (0..face_count)
                    .map(|_| self.parse_plane())
                    .collect::<ParserResult<Vec<Plane>>>()?;
                Solid::Polyhedron(Polyhedron::new(planes))
            }
            kind => return record.error(2, format!("unknown object kind '{}'", kind)),
        };

        Ok(SceneObject {
            solid,
            material,
            texture,
        })
    }

    /// Main routine that parses the whole file.
    pub fn parse_scene(&mut self) -> ParserResult<Scene> {
        let camera = self.parse_camera()?;

        let light_count = self.parse_count("the number of lights")?;
        if light_count == 0 {
            let record = &self.records[self.cursor - 1];
            return record.error(0, "the ambient light is required");
        }
        let ambient = self.parse_light()?;
        let lights = (1..light_count)
            .map(|_| self.parse_light())
            .collect::<ParserResult<Vec<Light>>>()?;

        let texture_count = self.parse_count("the number of textures")?;
        let textures = (0..texture_count)
            .map(|_| self.parse_texture())
            .collect::<ParserResult<Vec<Texture>>>()?;

        let material_count = self.parse_count("the number of materials")?;
        let materials = (0..material_count)
            .map(|_| self.parse_material())
            .collect::<ParserResult<Vec<Material>>>()?;

        let object_count = self.parse_count("the number of objects")?;
        let objects = (0..object_count)
            .map(|_| self.parse_object(&textures, &materials))
            .collect::<ParserResult<Vec<SceneObject>>>()?;

        if let Some(record) = self.records.get(self.cursor) {
            log::warn!("ignoring content after the last object, from line {}", record.line);
        }
        log::debug!(
            "parsed {} lights, {} textures, {} materials, {} objects",
            light_count,
            textures.len(),
            materials.len(),
            objects.len()
        );

        Ok(Scene {
            camera,
            ambient,
            lights,
            objects,
        })
    }
}
