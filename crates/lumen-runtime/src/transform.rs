//! Scene transform shared with the renderer

use lumen_core::Vec3;
use serde::{Deserialize, Serialize};

/// Rotation and uniform scale the renderer applies to the particle frame.
///
/// Rotation is Euler XYZ in radians, applied X first. The display shell owns
/// this value on the renderer's behalf; the particle core only reads it when
/// mapping hand-space points into the particle frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneTransform {
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for SceneTransform {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl SceneTransform {
    pub fn rotate(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Particle frame → scene
    pub fn local_to_world(&self, p: Vec3) -> Vec3 {
        let r = self.rotation;
        rotate_z(rotate_y(rotate_x(p, r.x), r.y), r.z) * self.scale
    }

    /// Scene → particle frame (inverse scale, then inverse rotation)
    pub fn world_to_local(&self, p: Vec3) -> Vec3 {
        let r = self.rotation;
        let unscaled = if self.scale != 0.0 { p / self.scale } else { p };
        rotate_x(rotate_y(rotate_z(unscaled, -r.z), -r.y), -r.x)
    }

    /// Rotate a direction into the particle frame; scale does not apply
    pub fn direction_to_local(&self, d: Vec3) -> Vec3 {
        let r = self.rotation;
        rotate_x(rotate_y(rotate_z(d, -r.z), -r.y), -r.x)
    }
}

fn rotate_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}

fn rotate_z(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}
