use thiserror::Error;

/// Failures of the geometric and numeric routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid geometry: {0}")]
    InvalidInput(String),

    #[error("cannot normalize a zero-length vector")]
    DivisionByZero,

    /// Negative radicand in refraction: the ray is totally internally reflected.
    #[error("refraction outside of its domain (total internal reflection)")]
    InvalidDomain,
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid image size {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("the worker pool needs at least one worker")]
    NoWorkers,

    #[error("cannot build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
