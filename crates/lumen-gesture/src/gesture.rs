//! Gesture categories and per-frame hand data

use lumen_core::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A recognized hand pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// No recognized pose
    #[default]
    Idle,
    OpenHand,
    Fist,
    /// Index and middle finger raised
    Victory,
    /// Thumb and index crossed into a small heart
    FingerHeart,
    Pointing,
    ThumbsUp,
    /// Index and little finger raised
    RockOn,
}

impl Gesture {
    pub const ALL: [Gesture; 8] = [
        Gesture::Idle,
        Gesture::OpenHand,
        Gesture::Fist,
        Gesture::Victory,
        Gesture::FingerHeart,
        Gesture::Pointing,
        Gesture::ThumbsUp,
        Gesture::RockOn,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::OpenHand => "open_hand",
            Gesture::Fist => "fist",
            Gesture::Victory => "victory",
            Gesture::FingerHeart => "finger_heart",
            Gesture::Pointing => "pointing",
            Gesture::ThumbsUp => "thumbs_up",
            Gesture::RockOn => "rock_on",
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Gesture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_ascii_lowercase().replace('-', "_");
        Gesture::ALL
            .into_iter()
            .find(|g| g.name() == normalized)
            .ok_or_else(|| format!("unknown gesture '{s}'"))
    }
}

/// One frame of hand-tracking output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandData {
    pub gesture: Gesture,
    /// Hand center in scene space
    pub center: Vec3,
    /// Estimated hand velocity, scene units per second
    pub velocity: Vec3,
    /// Palm area as a fraction of the camera frame
    pub area_ratio: f32,
    /// Hand orientation estimate (Euler radians)
    pub rotation: Vec3,
}

impl Default for HandData {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            center: Vec3::ZERO,
            velocity: Vec3::ZERO,
            area_ratio: 0.1,
            rotation: Vec3::ZERO,
        }
    }
}

impl HandData {
    pub fn with_gesture(gesture: Gesture) -> Self {
        Self {
            gesture,
            ..Self::default()
        }
    }
}
