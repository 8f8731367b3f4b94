//! Lumen Core - Foundational types for the Lumen particle display
//!
//! This crate provides the core types that all other Lumen crates depend on:
//! - `Vec3`, `Rgb` - Spatial and color types
//! - `SampleRng` - Seedable xorshift generator for sampling and jitter
//! - Error types and Result alias

mod error;
mod rand;
mod types;

pub use error::{LumenError, Result};
pub use rand::SampleRng;
pub use types::{Rgb, Vec3};
