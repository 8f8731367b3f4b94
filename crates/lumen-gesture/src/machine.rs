//! Gesture state machine
//!
//! Tracks the current and previous gesture plus a cosmetic transition timer.
//! Any gesture may follow any other. Observers are notified synchronously on
//! every change; a failing observer is logged and skipped.

use crate::config::GestureConfig;
use crate::gesture::Gesture;
use log::{debug, error};
use lumen_core::Result;

/// Observer callback: `(previous, current, progress)`
pub type GestureObserver = Box<dyn FnMut(Gesture, Gesture, f32) -> Result<()>>;

/// Handle returned by [`GestureStateMachine::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// A change of recognized gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureTransition {
    pub from: Gesture,
    pub to: Gesture,
}

pub struct GestureStateMachine {
    current: Gesture,
    previous: Gesture,
    timer: f32,
    is_transitioning: bool,
    transition_duration: f32,
    observers: Vec<(ObserverId, GestureObserver)>,
    next_observer: u64,
}

impl Default for GestureStateMachine {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureStateMachine {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            current: Gesture::Idle,
            previous: Gesture::Idle,
            timer: 0.0,
            is_transitioning: false,
            transition_duration: config.transition_duration,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    pub fn current(&self) -> Gesture {
        self.current
    }

    pub fn previous(&self) -> Gesture {
        self.previous
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    /// Seconds since the last change
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Register an observer for gesture changes
    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(Gesture, Gesture, f32) -> Result<()> + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Feed the latest recognized gesture.
    ///
    /// A different gesture switches state immediately and notifies every
    /// observer with progress 0. The same gesture only advances the timer.
    pub fn update(&mut self, gesture: Gesture, dt: f32) -> Option<GestureTransition> {
        if gesture != self.current {
            self.previous = self.current;
            self.current = gesture;
            self.timer = 0.0;
            self.is_transitioning = true;
            debug!("Gesture {} -> {}", self.previous, self.current);
            self.notify();
            return Some(GestureTransition {
                from: self.previous,
                to: self.current,
            });
        }

        self.timer += dt;
        if self.is_transitioning && self.timer >= self.transition_duration {
            self.is_transitioning = false;
        }
        None
    }

    /// 1.0 when settled, otherwise elapsed / duration capped at 1.0
    pub fn transition_progress(&self) -> f32 {
        if !self.is_transitioning || self.transition_duration <= 0.0 {
            return 1.0;
        }
        (self.timer / self.transition_duration).min(1.0)
    }

    /// Back to idle without notifying observers
    pub fn reset(&mut self) {
        self.current = Gesture::Idle;
        self.previous = Gesture::Idle;
        self.timer = 0.0;
        self.is_transitioning = false;
    }

    fn notify(&mut self) {
        let (previous, current) = (self.previous, self.current);
        for (id, observer) in self.observers.iter_mut() {
            if let Err(e) = observer(previous, current, 0.0) {
                error!("Gesture observer {:?} failed: {}", id, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::LumenError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn machine(duration: f32) -> GestureStateMachine {
        GestureStateMachine::new(GestureConfig {
            transition_duration: duration,
        })
    }

    #[test]
    fn change_switches_immediately() {
        let mut sm = machine(0.5);
        let t = sm.update(Gesture::Fist, 0.016);
        assert_eq!(
            t,
            Some(GestureTransition {
                from: Gesture::Idle,
                to: Gesture::Fist
            })
        );
        assert_eq!(sm.current(), Gesture::Fist);
        assert_eq!(sm.previous(), Gesture::Idle);
        assert!(sm.is_transitioning());
        assert_eq!(sm.timer(), 0.0);
        assert_eq!(sm.transition_progress(), 0.0);
    }

    #[test]
    fn same_gesture_advances_until_settled() {
        let mut sm = machine(0.5);
        sm.update(Gesture::Victory, 0.0);
        assert!(sm.update(Gesture::Victory, 0.2).is_none());
        assert!((sm.transition_progress() - 0.4).abs() < 1e-6);
        sm.update(Gesture::Victory, 0.4);
        assert!(!sm.is_transitioning());
        assert_eq!(sm.transition_progress(), 1.0);
    }

    #[test]
    fn any_gesture_may_follow_any_other() {
        let mut sm = machine(0.5);
        for from in Gesture::ALL {
            for to in Gesture::ALL {
                sm.reset();
                sm.update(from, 0.0);
                sm.update(to, 0.0);
                assert_eq!(sm.current(), to);
            }
        }
    }

    #[test]
    fn observers_receive_previous_and_current() {
        let mut sm = machine(0.5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        sm.subscribe(move |prev, curr, progress| {
            sink.borrow_mut().push((prev, curr, progress));
            Ok(())
        });

        sm.update(Gesture::FingerHeart, 0.0);
        sm.update(Gesture::FingerHeart, 0.1);
        sm.update(Gesture::OpenHand, 0.0);

        assert_eq!(
            *seen.borrow(),
            vec![
                (Gesture::Idle, Gesture::FingerHeart, 0.0),
                (Gesture::FingerHeart, Gesture::OpenHand, 0.0),
            ]
        );
    }

    #[test]
    fn failing_observer_does_not_stop_others() {
        let mut sm = machine(0.5);
        let calls = Rc::new(RefCell::new(0));
        sm.subscribe(|_, _, _| Err(LumenError::ObserverError("boom".into())));
        let counter = calls.clone();
        sm.subscribe(move |_, _, _| {
            *counter.borrow_mut() += 1;
            Ok(())
        });

        sm.update(Gesture::Pointing, 0.0);
        sm.update(Gesture::Fist, 0.0);
        assert_eq!(*calls.borrow(), 2);
        assert_eq!(sm.current(), Gesture::Fist);
        assert_eq!(sm.previous(), Gesture::Pointing);
    }

    #[test]
    fn unsubscribe_removes_observer() {
        let mut sm = machine(0.5);
        let id = sm.subscribe(|_, _, _| Ok(()));
        assert_eq!(sm.observer_count(), 1);
        assert!(sm.unsubscribe(id));
        assert!(!sm.unsubscribe(id));
        assert_eq!(sm.observer_count(), 0);
    }
}
