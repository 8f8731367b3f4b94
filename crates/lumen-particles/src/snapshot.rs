//! Per-frame view handed to the renderer

use crate::particle::ParticleStore;
use lumen_core::Vec3;

/// Borrowed draw data for one frame.
///
/// Positions and colors are the store's own arrays, never copies. Scale is a
/// uniform factor the renderer applies on all three axes; rotation (Euler
/// radians) is owned by the rendering side and only echoed here.
pub struct FrameSnapshot<'a> {
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    pub scale: f32,
    pub rotation: Vec3,
}

impl<'a> FrameSnapshot<'a> {
    pub fn new(store: &'a ParticleStore, scale: f32, rotation: Vec3) -> Self {
        Self {
            positions: store.positions(),
            colors: store.colors(),
            scale,
            rotation,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Raw bytes of the position array, ready for a vertex buffer upload
    pub fn position_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.positions)
    }

    /// Raw bytes of the color array
    pub fn color_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.colors)
    }

    /// Positions with the uniform scale applied, as the renderer would see them
    pub fn scaled_positions(&self) -> Vec<f32> {
        self.positions.iter().map(|p| p * self.scale).collect()
    }
}
