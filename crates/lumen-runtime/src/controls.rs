//! Per-frame input from the hand tracker and the manual fallback

use lumen_core::Vec3;
use lumen_gesture::HandData;
use lumen_shapes::Shape;
use serde::{Deserialize, Serialize};

/// Manual-control fallback, used the same way as camera-derived input but
/// bypassing gesture recognition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualControls {
    /// Shape to transition to
    pub shape: Option<Shape>,
    /// Incremental rotation (Euler radians) added this frame
    pub rotation_delta: Vec3,
    /// Absolute scale
    pub scale: Option<f32>,
}

impl ManualControls {
    pub fn is_empty(&self) -> bool {
        self.shape.is_none() && self.scale.is_none() && self.rotation_delta == Vec3::ZERO
    }
}

/// Everything the display consumes in one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// `None` when no hand is detected
    pub hand: Option<HandData>,
    pub manual: Option<ManualControls>,
}

impl FrameInput {
    pub fn with_hand(hand: HandData) -> Self {
        Self {
            hand: Some(hand),
            manual: None,
        }
    }

    pub fn with_manual(manual: ManualControls) -> Self {
        Self {
            hand: None,
            manual: Some(manual),
        }
    }
}
