//! Force-model tunables

use serde::{Deserialize, Serialize};

/// Physics configuration (`[physics]` table of the Lumen config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Mass shared by every particle
    pub mass: f32,
    /// Multiplicative velocity decay applied near the target
    pub damping: f32,
    /// Spring constant of the pull toward the target
    pub attraction_strength: f32,
    /// Damping only applies inside this distance from the target
    pub attraction_radius: f32,
    /// Magnitude of the one-shot explosion impulse
    pub explosion_strength: f32,
    /// Seconds target attraction stays suppressed after an explosion
    pub explosion_duration: f32,
    pub max_speed: f32,
    pub max_acceleration: f32,
    /// Clamp acceleration before and velocity after each integration step
    pub enforce_limits: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            damping: 0.92,
            attraction_strength: 4.0,
            attraction_radius: 3.0,
            explosion_strength: 400.0,
            explosion_duration: 0.6,
            max_speed: 20.0,
            max_acceleration: 500.0,
            enforce_limits: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_table_keeps_defaults() {
        let config: PhysicsConfig = toml::from_str("damping = 0.8\nenforce_limits = true").unwrap();
        assert!((config.damping - 0.8).abs() < 1e-6);
        assert!(config.enforce_limits);
        assert_eq!(config.mass, 1.0);
        assert_eq!(
            config.explosion_duration,
            PhysicsConfig::default().explosion_duration
        );
    }
}
