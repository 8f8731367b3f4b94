//! Lumen Gesture - recognized hand gestures and their transitions
//!
//! The hand-tracking collaborator reports one [`HandData`] per frame (or
//! nothing when no hand is visible). [`GestureStateMachine`] turns the stream
//! of gesture values into discrete transitions and notifies observers.

pub mod config;
pub mod gesture;
pub mod machine;

pub use config::GestureConfig;
pub use gesture::{Gesture, HandData};
pub use machine::{GestureStateMachine, GestureTransition, ObserverId};
