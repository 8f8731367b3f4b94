//! Particle population stored as parallel flat arrays
//!
//! Particle `i` lives at offset `3*i` of every array. The five arrays are
//! allocated together and never resized; a different population size means a
//! new store.

use lumen_core::{LumenError, Result, Rgb, SampleRng, Vec3};

/// Half-size of the cube new particles are scattered in
pub const SPAWN_HALF_EXTENT: f32 = 0.5;

/// Read view of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub target: Vec3,
    pub color: Rgb,
}

/// Partial write; only the `Some` fields are touched
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticlePatch {
    pub position: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub acceleration: Option<Vec3>,
    pub target: Option<Vec3>,
    pub color: Option<Rgb>,
}

/// Flat-array particle state
#[derive(Debug, Clone)]
pub struct ParticleStore {
    count: usize,
    positions: Vec<f32>,
    velocities: Vec<f32>,
    accelerations: Vec<f32>,
    targets: Vec<f32>,
    colors: Vec<f32>,
}

impl ParticleStore {
    /// Allocate `count` particles scattered in a small cube around the origin.
    ///
    /// Velocity and acceleration start at zero, each target is the spawn
    /// position and every particle takes the `idle` color.
    pub fn initialize(count: usize, idle: Rgb, rng: &mut SampleRng) -> Result<Self> {
        if count == 0 {
            return Err(LumenError::InvalidCount(0));
        }

        let len = count * 3;
        let positions: Vec<f32> = (0..len)
            .map(|_| rng.jitter(SPAWN_HALF_EXTENT))
            .collect();
        let targets = positions.clone();
        let colors = idle.to_array().repeat(count);

        Ok(Self {
            count,
            positions,
            velocities: vec![0.0; len],
            accelerations: vec![0.0; len],
            targets,
            colors,
        })
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn velocities(&self) -> &[f32] {
        &self.velocities
    }

    pub fn accelerations(&self) -> &[f32] {
        &self.accelerations
    }

    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn accelerations_mut(&mut self) -> &mut [f32] {
        &mut self.accelerations
    }

    pub fn velocities_mut(&mut self) -> &mut [f32] {
        &mut self.velocities
    }

    pub fn positions_mut(&mut self) -> &mut [f32] {
        &mut self.positions
    }

    pub fn targets_mut(&mut self) -> &mut [f32] {
        &mut self.targets
    }

    pub fn colors_mut(&mut self) -> &mut [f32] {
        &mut self.colors
    }

    #[inline]
    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions, index)
    }

    #[inline]
    pub fn target(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.targets, index)
    }

    #[inline]
    pub fn velocity(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.velocities, index)
    }

    #[inline]
    pub fn acceleration(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.accelerations, index)
    }

    /// Add to the acceleration of particle `index`
    #[inline]
    pub fn accelerate(&mut self, index: usize, delta: Vec3) {
        let o = index * 3;
        self.accelerations[o] += delta.x;
        self.accelerations[o + 1] += delta.y;
        self.accelerations[o + 2] += delta.z;
    }

    /// Read one particle
    pub fn get_particle(&self, index: usize) -> Result<Particle> {
        self.check_index(index)?;
        Ok(Particle {
            position: Vec3::from_slice(&self.positions, index),
            velocity: Vec3::from_slice(&self.velocities, index),
            acceleration: Vec3::from_slice(&self.accelerations, index),
            target: Vec3::from_slice(&self.targets, index),
            color: Rgb::from_slice(&self.colors, index),
        })
    }

    /// Write the supplied fields of one particle
    pub fn set_particle(&mut self, index: usize, patch: ParticlePatch) -> Result<()> {
        self.check_index(index)?;
        if let Some(p) = patch.position {
            p.write_to(&mut self.positions, index);
        }
        if let Some(v) = patch.velocity {
            v.write_to(&mut self.velocities, index);
        }
        if let Some(a) = patch.acceleration {
            a.write_to(&mut self.accelerations, index);
        }
        if let Some(t) = patch.target {
            t.write_to(&mut self.targets, index);
        }
        if let Some(c) = patch.color {
            // Rgb::new already clamped the channels
            c.write_to(&mut self.colors, index);
        }
        Ok(())
    }

    /// Overwrite every target and color from index-aligned slices
    pub fn assign_targets(&mut self, targets: &[Vec3], colors: &[Rgb]) -> Result<()> {
        for actual in [targets.len(), colors.len()] {
            if actual != self.count {
                return Err(LumenError::TargetCountMismatch {
                    expected: self.count,
                    actual,
                });
            }
        }
        for (i, (t, c)) in targets.iter().zip(colors).enumerate() {
            t.write_to(&mut self.targets, i);
            c.write_to(&mut self.colors, i);
        }
        Ok(())
    }

    /// Paint every particle with one color
    pub fn fill_color(&mut self, color: Rgb) {
        for chunk in self.colors.chunks_exact_mut(3) {
            chunk.copy_from_slice(&color.to_array());
        }
    }

    /// Semi-implicit Euler step: velocity first, then position from the new velocity
    pub fn update_physics(&mut self, dt: f32) {
        for ((v, a), p) in self
            .velocities
            .iter_mut()
            .zip(&self.accelerations)
            .zip(self.positions.iter_mut())
        {
            *v += *a * dt;
            *p += *v * dt;
        }
    }

    pub fn reset_accelerations(&mut self) {
        self.accelerations.fill(0.0);
    }

    /// Shorten every velocity longer than `max_speed`
    pub fn clamp_velocities(&mut self, max_speed: f32) {
        clamp_vectors(&mut self.velocities, max_speed);
    }

    /// Shorten every acceleration longer than `max_accel`
    pub fn clamp_accelerations(&mut self, max_accel: f32) {
        clamp_vectors(&mut self.accelerations, max_accel);
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.count {
            return Err(LumenError::IndexOutOfRange {
                index,
                len: self.count,
            });
        }
        Ok(())
    }
}

fn clamp_vectors(data: &mut [f32], max_len: f32) {
    for chunk in data.chunks_exact_mut(3) {
        let v = Vec3::new(chunk[0], chunk[1], chunk[2]).clamp_length(max_len);
        chunk.copy_from_slice(&v.to_array());
    }
}
