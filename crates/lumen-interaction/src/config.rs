use lumen_core::Rgb;
use serde::{Deserialize, Serialize};

/// Interaction tuning (`[interaction]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Hand speed above which a wave impulse fires
    pub velocity_threshold: f32,
    /// Particles farther than this from the hand ignore the wave
    pub influence_radius: f32,
    pub force_strength: f32,
    /// Palm area ratio mapped to `min_scale`
    pub min_area_ratio: f32,
    /// Palm area ratio mapped to `max_scale`
    pub max_area_ratio: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Fraction of the remaining gap closed per scale update
    pub smoothing: f32,
    /// Outward impulse of the finger-heart spread
    pub spread_strength: f32,
    /// Color particles take when the spread starts
    pub spread_color: Rgb,
    /// Seconds for the spread color to fade back to idle
    pub color_transition_duration: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 2.0,
            influence_radius: 3.0,
            force_strength: 60.0,
            min_area_ratio: 0.05,
            max_area_ratio: 0.4,
            min_scale: 0.5,
            max_scale: 2.0,
            smoothing: 0.1,
            spread_strength: 150.0,
            spread_color: Rgb {
                r: 1.0,
                g: 0.35,
                b: 0.6,
            },
            color_transition_duration: 1.5,
        }
    }
}
