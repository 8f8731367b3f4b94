//! Force model over the particle store
//!
//! Forces are accumulated into the acceleration array between ticks and by
//! the tick itself; `update` integrates and then clears the accumulator, so
//! an impulse applied by orchestration code before `update` lands in exactly
//! one integration step.

use crate::config::PhysicsConfig;
use crate::particle::ParticleStore;
use log::{debug, info, warn};
use lumen_core::{Result, Rgb, SampleRng, Vec3};

/// Transient explosion record: active flag, elapsed time, fixed duration, center
#[derive(Debug, Clone, PartialEq)]
pub struct ExplosionState {
    pub active: bool,
    pub timer: f32,
    pub duration: f32,
    pub center: Vec3,
}

impl ExplosionState {
    pub fn new(duration: f32) -> Self {
        Self {
            active: false,
            timer: 0.0,
            duration,
            center: Vec3::ZERO,
        }
    }

    /// (Re)start the window, moving the center
    pub fn trigger(&mut self, center: Vec3) {
        self.active = true;
        self.timer = 0.0;
        self.center = center;
    }

    /// Advance the timer; returns true on the tick the window closes
    pub fn advance(&mut self, dt: f32) -> bool {
        if !self.active {
            return false;
        }
        self.timer += dt;
        if self.timer >= self.duration {
            self.active = false;
            return true;
        }
        false
    }
}

/// Owns the particle population and applies the force model to it
pub struct PhysicsSimulator {
    config: PhysicsConfig,
    store: Option<ParticleStore>,
    explosion: ExplosionState,
}

impl PhysicsSimulator {
    /// Create a simulator with no population yet; call `initialize` before use
    pub fn new(config: PhysicsConfig) -> Self {
        let explosion = ExplosionState::new(config.explosion_duration);
        Self {
            config,
            store: None,
            explosion,
        }
    }

    /// Allocate a fresh population, discarding any previous one
    pub fn initialize(&mut self, count: usize, idle: Rgb, rng: &mut SampleRng) -> Result<()> {
        let store = ParticleStore::initialize(count, idle, rng)?;
        self.replace_store(store);
        Ok(())
    }

    /// Swap in a fully built population and return the old one.
    ///
    /// Any running explosion belongs to the discarded particles and is cleared.
    pub fn replace_store(&mut self, store: ParticleStore) -> Option<ParticleStore> {
        info!("[physics] Population set to {} particle(s)", store.len());
        self.explosion = ExplosionState::new(self.config.explosion_duration);
        self.store.replace(store)
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.store.as_ref().map(|s| s.len()).unwrap_or(0)
    }

    pub fn store(&self) -> Option<&ParticleStore> {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> Option<&mut ParticleStore> {
        self.store.as_mut()
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn explosion(&self) -> &ExplosionState {
        &self.explosion
    }

    pub fn is_explosion_active(&self) -> bool {
        self.explosion.active
    }

    /// One simulation tick: explosion timer, target attraction (suppressed
    /// while exploding), damping, integration.
    ///
    /// Accelerations are cleared after integrating rather than before, so
    /// impulses applied since the last tick are integrated here. As a
    /// consequence `accelerations()` reads zero once `update` returns; forces
    /// applied after it are visible until the next tick.
    pub fn update(&mut self, dt: f32) {
        if self.store.is_none() {
            debug!("[physics] update skipped: no population");
            return;
        }

        if self.explosion.advance(dt) {
            debug!("[physics] Explosion window closed");
        }
        if !self.explosion.active {
            self.apply_target_attraction();
        }
        self.apply_damping();

        let limits = self.config.enforce_limits;
        let (max_speed, max_accel) = (self.config.max_speed, self.config.max_acceleration);
        if let Some(store) = self.store.as_mut() {
            if limits {
                store.clamp_accelerations(max_accel);
            }
            store.update_physics(dt);
            if limits {
                store.clamp_velocities(max_speed);
            }
            store.reset_accelerations();
        }
    }

    /// Add `force / mass` to every particle within `radius` of `center`.
    ///
    /// The radius is inclusive; `f32::INFINITY` selects every particle.
    pub fn apply_force(&mut self, force: Vec3, radius: f32, center: Vec3) {
        let inv_mass = 1.0 / self.config.mass;
        let Some(store) = self.store_or_warn("apply_force") else {
            return;
        };
        let delta = force * inv_mass;
        let unbounded = radius.is_infinite();
        let radius_sq = radius * radius;
        for i in 0..store.len() {
            if unbounded || store.position(i).distance_squared(&center) <= radius_sq {
                store.accelerate(i, delta);
            }
        }
    }

    /// Add a per-particle force computed from each particle's position.
    ///
    /// Particles for which `force_at` returns `None` are left alone.
    pub fn apply_force_field<F>(&mut self, mut force_at: F)
    where
        F: FnMut(Vec3) -> Option<Vec3>,
    {
        let inv_mass = 1.0 / self.config.mass;
        let Some(store) = self.store_or_warn("apply_force_field") else {
            return;
        };
        for i in 0..store.len() {
            if let Some(force) = force_at(store.position(i)) {
                store.accelerate(i, force * inv_mass);
            }
        }
    }

    /// Scale velocity by `damping` for particles close to their target
    pub fn apply_damping(&mut self) {
        let damping = self.config.damping;
        let radius_sq = self.config.attraction_radius * self.config.attraction_radius;
        let Some(store) = self.store_or_warn("apply_damping") else {
            return;
        };
        for i in 0..store.len() {
            if store.position(i).distance_squared(&store.target(i)) < radius_sq {
                let v = store.velocity(i) * damping;
                v.write_to(store.velocities_mut(), i);
            }
        }
    }

    /// Proportional spring toward each particle's target
    pub fn apply_target_attraction(&mut self) {
        let k = self.config.attraction_strength / self.config.mass;
        let Some(store) = self.store_or_warn("apply_target_attraction") else {
            return;
        };
        for i in 0..store.len() {
            let pull = (store.target(i) - store.position(i)) * k;
            store.accelerate(i, pull);
        }
    }

    /// Start (or restart) an explosion and add its one-shot outward impulse
    pub fn trigger_explosion(&mut self, center: Option<Vec3>) {
        if self.store.is_none() {
            warn!("[physics] trigger_explosion ignored: no population");
            return;
        }
        let center = center.unwrap_or(Vec3::ZERO);
        self.explosion.duration = self.config.explosion_duration;
        self.explosion.trigger(center);
        debug!(
            "[physics] Explosion at ({:.2}, {:.2}, {:.2})",
            center.x, center.y, center.z
        );
        self.apply_radial_impulse(center, self.config.explosion_strength);
    }

    /// Add `unit(position - center) * strength / mass` to every particle.
    ///
    /// A particle sitting exactly on `center` is pushed along +X.
    pub fn apply_radial_impulse(&mut self, center: Vec3, strength: f32) {
        let magnitude = strength / self.config.mass;
        let Some(store) = self.store_or_warn("apply_radial_impulse") else {
            return;
        };
        for i in 0..store.len() {
            let offset = store.position(i) - center;
            let dir = if offset.length_squared() > 0.0 {
                offset.normalized()
            } else {
                Vec3::RIGHT
            };
            store.accelerate(i, dir * magnitude);
        }
    }

    fn store_or_warn(&mut self, op: &str) -> Option<&mut ParticleStore> {
        if self.store.is_none() {
            warn!("[physics] {op} ignored: no population");
        }
        self.store.as_mut()
    }
}
