//! CLI command implementations

pub mod config;
pub mod sample;
pub mod simulate;
