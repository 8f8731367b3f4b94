//! Lumen Interaction - turns gestures and hand motion into particle behavior
//!
//! [`InteractionManager`] runs the explosion-then-reform shape transition,
//! the wave impulse, the depth-linked scale and the finger-heart color
//! spread. It never owns particles; every call borrows the simulator.

pub mod bindings;
pub mod config;
pub mod effects;
pub mod manager;

pub use bindings::GestureBindings;
pub use config::InteractionConfig;
pub use effects::{ColorSpread, ShapeTransition};
pub use manager::{InteractionManager, Reaction};
