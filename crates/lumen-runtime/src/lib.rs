//! Lumen Runtime - the display shell around the particle core
//!
//! Ties the simulator, the interaction layer and the gesture state machine
//! into one per-frame driver, loads layered configuration, and plays
//! headless input scenarios on a fixed-step clock.

pub mod clock;
pub mod config;
pub mod controls;
pub mod display;
pub mod scenario;
pub mod transform;

pub use clock::GameClock;
pub use config::{LumenConfig, ParticleSettings};
pub use controls::{FrameInput, ManualControls};
pub use display::ParticleDisplay;
pub use scenario::{FrameStats, Keyframe, Scenario, ScenarioReport};
pub use transform::SceneTransform;
