//! Lumen Shapes - procedural target positions for particle shapes
//!
//! Every generator returns exactly the requested number of points and fails
//! fast on a zero count or a non-positive size. Two density variants exist
//! per shape: surface-biased for small populations (outline stays readable)
//! and volume-biased for large ones (interior fills in).

pub mod composite;
pub mod config;
pub mod font;
pub mod geometry;
pub mod heart;
pub mod palette;
pub mod sampler;
pub mod shape;
pub mod sphere;
pub mod star;
pub mod text;
pub mod torus;

pub use config::SamplerConfig;
pub use sampler::{ShapeSampler, ShapeSet};
pub use shape::{Density, Shape, ShapeKind};

use lumen_core::{LumenError, Result};

pub(crate) fn require_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(LumenError::InvalidCount(0));
    }
    Ok(())
}

/// Rejects zero, negative and NaN sizes
pub(crate) fn require_positive(name: &str, value: f32) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(LumenError::dimension(name, value));
    }
    Ok(())
}
