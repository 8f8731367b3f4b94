//! Transient effect records advanced once per frame

use lumen_core::Rgb;
use lumen_shapes::Shape;

/// Explosion-then-reform bookkeeping.
///
/// While active, `pending` holds the shape that will be sampled once the
/// explosion window has elapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeTransition {
    pub active: bool,
    pub timer: f32,
    pub pending: Option<Shape>,
}

impl ShapeTransition {
    pub fn start(&mut self, shape: Shape) {
        self.active = true;
        self.timer = 0.0;
        self.pending = Some(shape);
    }

    /// Advance and hand back the pending shape on the tick `duration` is reached
    pub fn advance(&mut self, dt: f32, duration: f32) -> Option<Shape> {
        if !self.active {
            return None;
        }
        self.timer += dt;
        if self.timer < duration {
            return None;
        }
        self.active = false;
        self.pending.take()
    }

    pub fn cancel(&mut self) {
        self.active = false;
        self.pending = None;
    }
}

/// Finger-heart color fade from `start_color` back to the idle hue
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpread {
    pub active: bool,
    pub timer: f32,
    pub duration: f32,
    pub start_color: Rgb,
}

impl ColorSpread {
    pub fn new(duration: f32, start_color: Rgb) -> Self {
        Self {
            active: false,
            timer: 0.0,
            duration,
            start_color,
        }
    }

    pub fn start(&mut self) {
        self.active = true;
        self.timer = 0.0;
    }

    /// Advance and return the fade fraction in `[0, 1]`, or `None` when idle.
    ///
    /// Reaching 1 deactivates the record.
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.timer += dt;
        let t = if self.duration > 0.0 {
            (self.timer / self.duration).min(1.0)
        } else {
            1.0
        };
        if t >= 1.0 {
            self.active = false;
        }
        Some(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_releases_shape_once() {
        let mut t = ShapeTransition::default();
        t.start(Shape::Star);
        assert_eq!(t.advance(0.3, 0.6), None);
        assert_eq!(t.advance(0.3, 0.6), Some(Shape::Star));
        assert!(!t.active);
        assert_eq!(t.advance(1.0, 0.6), None);
    }

    #[test]
    fn restart_resets_timer() {
        let mut t = ShapeTransition::default();
        t.start(Shape::Star);
        t.advance(0.5, 0.6);
        t.start(Shape::Heart);
        assert_eq!(t.advance(0.5, 0.6), None);
        assert_eq!(t.advance(0.2, 0.6), Some(Shape::Heart));
    }

    #[test]
    fn spread_fraction_is_linear_and_finishes() {
        let mut s = ColorSpread::new(2.0, Rgb::WHITE);
        assert_eq!(s.advance(0.5), None);
        s.start();
        assert!((s.advance(0.5).unwrap() - 0.25).abs() < 1e-6);
        assert_eq!(s.advance(5.0), Some(1.0));
        assert!(!s.active);
    }
}
