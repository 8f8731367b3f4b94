//! Shape dimensions and the density threshold

use serde::{Deserialize, Serialize};

/// Sampler configuration (`[shapes]` table of the Lumen config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Populations at or above this size use the volume variant
    pub volume_threshold: usize,
    pub planet_radius: f32,
    /// Half-width of the heart
    pub heart_size: f32,
    /// Peak dome thickness of the volumetric heart
    pub heart_depth: f32,
    pub star_outer_radius: f32,
    pub star_inner_radius: f32,
    pub star_depth: f32,
    pub torus_major_radius: f32,
    pub torus_minor_radius: f32,
    /// Cap height of rasterized text in scene units
    pub text_height: f32,
    /// Extrusion band for volumetric text; `None` keeps it flat
    pub text_depth: Option<f32>,
    /// Used when a text shape is requested without a string
    pub default_text: String,
    pub arrow_heart_size: f32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            volume_threshold: 2000,
            planet_radius: 2.0,
            heart_size: 2.0,
            heart_depth: 0.8,
            star_outer_radius: 2.2,
            star_inner_radius: 0.9,
            star_depth: 0.6,
            torus_major_radius: 1.8,
            torus_minor_radius: 0.6,
            text_height: 1.2,
            text_depth: Some(0.3),
            default_text: "HELLO".to_string(),
            arrow_heart_size: 1.8,
        }
    }
}
