//! Which shape each gesture asks for

use lumen_gesture::Gesture;
use lumen_shapes::Shape;
use serde::{Deserialize, Serialize};

/// Gesture → shape map (`[bindings]` table).
///
/// Idle never binds. Open hand is unbound by default because the
/// finger-heart → open-hand edge is reserved for the color spread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureBindings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_hand: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fist: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub victory: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finger_heart: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pointing: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbs_up: Option<Shape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rock_on: Option<Shape>,
}

impl Default for GestureBindings {
    fn default() -> Self {
        Self {
            open_hand: None,
            fist: Some(Shape::Planet),
            victory: Some(Shape::Star),
            finger_heart: Some(Shape::Heart),
            pointing: Some(Shape::Torus),
            thumbs_up: Some(Shape::Text("HELLO".to_string())),
            rock_on: Some(Shape::ArrowHeart),
        }
    }
}

impl GestureBindings {
    pub fn shape_for(&self, gesture: Gesture) -> Option<&Shape> {
        match gesture {
            Gesture::Idle => None,
            Gesture::OpenHand => self.open_hand.as_ref(),
            Gesture::Fist => self.fist.as_ref(),
            Gesture::Victory => self.victory.as_ref(),
            Gesture::FingerHeart => self.finger_heart.as_ref(),
            Gesture::Pointing => self.pointing.as_ref(),
            Gesture::ThumbsUp => self.thumbs_up.as_ref(),
            Gesture::RockOn => self.rock_on.as_ref(),
        }
    }
}
