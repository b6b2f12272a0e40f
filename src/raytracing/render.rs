//! Per-pixel dispatch of the tracer.
//!
//! Every pixel is a pure function of the scene and its coordinate, so the
//! frame is split into one stripe per image column and the stripes are
//! handed to a fixed-size rayon pool. Samples are stored in `(x, y)`
//! enumeration order whatever worker computes them.

use std::time::Instant;

use image::{ImageBuffer, Rgb};
use rayon::prelude::*;

use super::camera::Viewport;
use super::core::{trace, Scene};
use super::error::RenderError;

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_MAX_DEPTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Everything on the calling thread, for debugging.
    Sequential,
    Parallel { workers: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Maximum number of reflection/refraction bounces.
    pub max_depth: u32,
    pub mode: RenderMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            mode: RenderMode::Parallel {
                workers: DEFAULT_WORKERS,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelSample {
    pub x: u32,
    pub y: u32,
    pub rgb: [u8; 3],
}

/// Rendered image: one sample per pixel, ordered by `x` then `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<PixelSample>,
}

impl Frame {
    pub fn get(&self, x: u32, y: u32) -> Option<&PixelSample> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.samples.get((x * self.height + y) as usize)
    }

    pub fn to_image_buffer(&self) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
        let mut buffer = ImageBuffer::new(self.width, self.height);
        for sample in &self.samples {
            buffer.put_pixel(sample.x, sample.y, Rgb(sample.rgb));
        }
        buffer
    }
}

fn shade_pixel(scene: &Scene, viewport: &Viewport, max_depth: u32, x: u32, y: u32) -> PixelSample {
    let ray = viewport.primary_ray(x, y);
    let color = trace(scene, &ray, max_depth, None);
    PixelSample {
        x,
        y,
        rgb: color.to_rgb8(),
    }
}

fn render_stripe(
    scene: &Scene,
    viewport: &Viewport,
    max_depth: u32,
    x: u32,
    stripe: &mut [PixelSample],
) {
    for (y, sample) in stripe.iter_mut().enumerate() {
        *sample = shade_pixel(scene, viewport, max_depth, x, y as u32);
    }
}

/// Render `scene` at `width`x`height`.
///
/// Sequential and parallel modes produce identical frames.
pub fn render(
    scene: &Scene,
    width: u32,
    height: u32,
    config: &RenderConfig,
) -> Result<Frame, RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    let viewport = scene.camera.viewport(width, height)?;
    log::debug!("viewport {:?}", viewport);

    let mut samples = vec![PixelSample::default(); width as usize * height as usize];
    let stripes = samples.chunks_mut(height as usize).enumerate();
    let max_depth = config.max_depth;

    let start = Instant::now();
    match config.mode {
        RenderMode::Sequential => {
            log::info!("Rendering {}x{} sequentially", width, height);
            for (x, stripe) in stripes {
                render_stripe(scene, &viewport, max_depth, x as u32, stripe);
            }
        }
        RenderMode::Parallel { workers } => {
            // rayon reads 0 as "one thread per CPU"
            if workers == 0 {
                return Err(RenderError::NoWorkers);
            }
            log::info!("Rendering {}x{} with {} workers", width, height, workers);
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .build()?;
            let stripes: Vec<(usize, &mut [PixelSample])> = stripes.collect();
            pool.install(|| {
                stripes.into_par_iter().for_each(|(x, stripe)| {
                    render_stripe(scene, &viewport, max_depth, x as u32, stripe);
                });
            });
        }
    }
    log::info!("Rendered {} pixels in {:?}", samples.len(), start.elapsed());

    Ok(Frame {
        width,
        height,
        samples,
    })
}
