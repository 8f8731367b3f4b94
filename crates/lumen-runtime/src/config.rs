//! Layered configuration system
//!
//! Layers, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. Global: `~/.lumen/config.toml`
//! 3. Project-local: `.lumen/config.toml`
//! 4. An explicit file passed on the command line
//! 5. Environment variables: `LUMEN_PARTICLES`, `LUMEN_SEED`
//!
//! File layers are merged as TOML tables before deserialization, so a layer
//! only needs the keys it changes.

use log::debug;
use lumen_core::{LumenError, Result, Rgb};
use lumen_gesture::GestureConfig;
use lumen_interaction::{GestureBindings, InteractionConfig};
use lumen_particles::PhysicsConfig;
use lumen_shapes::{palette, SamplerConfig, Shape};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PARTICLES: &str = "LUMEN_PARTICLES";
pub const ENV_SEED: &str = "LUMEN_SEED";

/// Population settings (`[particles]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub count: usize,
    /// Seed for spawn scatter and shape sampling
    pub seed: u32,
    /// Resting hue, also the color-spread fade target
    pub idle_color: Rgb,
    /// Shape formed at start-up
    pub initial_shape: Shape,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            count: 3000,
            seed: 0x5EED_1234,
            idle_color: palette::IDLE,
            initial_shape: Shape::Planet,
        }
    }
}

/// Fully resolved configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LumenConfig {
    pub particles: ParticleSettings,
    pub physics: PhysicsConfig,
    pub shapes: SamplerConfig,
    pub gesture: GestureConfig,
    pub interaction: InteractionConfig,
    pub bindings: GestureBindings,
}

impl LumenConfig {
    /// Load every layer; `explicit` is an extra file above the project layer
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut merged = toml::Table::new();

        let mut paths: Vec<PathBuf> = Vec::new();
        if let Some(global) = Self::global_config_path() {
            paths.push(global);
        }
        paths.push(PathBuf::from(".lumen/config.toml"));

        for path in &paths {
            if path.exists() {
                debug!("Loading config layer {}", path.display());
                merge_tables(&mut merged, Self::read_table(path)?);
            }
        }
        if let Some(path) = explicit {
            // An explicitly requested file must exist
            merge_tables(&mut merged, Self::read_table(path)?);
        }

        let mut config = Self::from_table(merged)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a single file on top of the defaults, then apply the environment
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_table(Self::read_table(path)?)?;
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;
        Self::from_table(table)
    }

    fn from_table(table: toml::Table) -> Result<Self> {
        Ok(toml::Value::Table(table).try_into()?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".lumen").join("config.toml"))
    }

    fn read_table(path: &Path) -> Result<toml::Table> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            LumenError::ConfigError(format!("Failed to parse config {}: {}", path.display(), e))
        })
    }

    /// Apply `LUMEN_PARTICLES` / `LUMEN_SEED` through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_PARTICLES) {
            self.particles.count = raw.trim().parse().map_err(|_| {
                LumenError::ConfigError(format!("{ENV_PARTICLES} is not a particle count: {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup(ENV_SEED) {
            self.particles.seed = raw.trim().parse().map_err(|_| {
                LumenError::ConfigError(format!("{ENV_SEED} is not a u32 seed: {raw:?}"))
            })?;
        }
        Ok(())
    }

    /// Reject values no subsystem can run with
    pub fn validate(&self) -> Result<()> {
        if self.particles.count == 0 {
            return Err(LumenError::InvalidCount(0));
        }

        let p = &self.physics;
        positive("physics.mass", p.mass)?;
        positive("physics.explosion_duration", p.explosion_duration)?;
        positive("physics.max_speed", p.max_speed)?;
        positive("physics.max_acceleration", p.max_acceleration)?;
        non_negative("physics.attraction_radius", p.attraction_radius)?;
        if !(0.0..=1.0).contains(&p.damping) {
            return Err(config_error("physics.damping must lie in [0, 1]"));
        }

        let s = &self.shapes;
        for (name, value) in [
            ("shapes.planet_radius", s.planet_radius),
            ("shapes.heart_size", s.heart_size),
            ("shapes.heart_depth", s.heart_depth),
            ("shapes.star_outer_radius", s.star_outer_radius),
            ("shapes.star_inner_radius", s.star_inner_radius),
            ("shapes.star_depth", s.star_depth),
            ("shapes.torus_major_radius", s.torus_major_radius),
            ("shapes.torus_minor_radius", s.torus_minor_radius),
            ("shapes.text_height", s.text_height),
            ("shapes.arrow_heart_size", s.arrow_heart_size),
        ] {
            positive(name, value)?;
        }
        if let Some(depth) = s.text_depth {
            positive("shapes.text_depth", depth)?;
        }
        if s.star_inner_radius >= s.star_outer_radius {
            return Err(config_error(
                "shapes.star_inner_radius must be smaller than star_outer_radius",
            ));
        }

        positive("gesture.transition_duration", self.gesture.transition_duration)?;

        let i = &self.interaction;
        positive("interaction.influence_radius", i.influence_radius)?;
        positive("interaction.color_transition_duration", i.color_transition_duration)?;
        positive("interaction.min_scale", i.min_scale)?;
        non_negative("interaction.velocity_threshold", i.velocity_threshold)?;
        if i.min_area_ratio >= i.max_area_ratio {
            return Err(config_error(
                "interaction.min_area_ratio must be smaller than max_area_ratio",
            ));
        }
        if i.min_scale > i.max_scale {
            return Err(config_error(
                "interaction.min_scale must not exceed max_scale",
            ));
        }
        if !(i.smoothing > 0.0 && i.smoothing <= 1.0) {
            return Err(config_error("interaction.smoothing must lie in (0, 1]"));
        }
        Ok(())
    }
}

/// Recursively overlay `overlay` onto `base`; nested tables merge, other
/// values replace
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(incoming)) => {
                merge_tables(existing, incoming);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

fn config_error(msg: &str) -> LumenError {
    LumenError::ConfigError(msg.to_string())
}

fn positive(name: &str, value: f32) -> Result<()> {
    if !(value > 0.0) || !value.is_finite() {
        return Err(LumenError::ConfigError(format!(
            "{name} must be greater than zero, got {value}"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, value: f32) -> Result<()> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(LumenError::ConfigError(format!(
            "{name} must not be negative, got {value}"
        )));
    }
    Ok(())
}
