//! Lumen Particles - CPU particle population and force model
//!
//! Provides the simulation core that every frame runs through:
//! - `ParticleStore`: five parallel flat `3*N` arrays with semi-implicit Euler integration
//! - `PhysicsSimulator`: target attraction, damping, directional and radial forces, explosions
//! - `FrameSnapshot`: borrowed per-frame view handed to the renderer

pub mod config;
pub mod particle;
pub mod simulator;
pub mod snapshot;

pub use config::PhysicsConfig;
pub use particle::{Particle, ParticlePatch, ParticleStore};
pub use simulator::{ExplosionState, PhysicsSimulator};
pub use snapshot::FrameSnapshot;
