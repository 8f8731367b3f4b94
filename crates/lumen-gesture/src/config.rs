use serde::{Deserialize, Serialize};

/// Gesture state machine settings (`[gesture]` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Seconds over which transition progress runs from 0 to 1
    pub transition_duration: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            transition_duration: 0.5,
        }
    }
}
