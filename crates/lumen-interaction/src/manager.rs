//! Gesture-driven orchestration over a borrowed simulator

use crate::bindings::GestureBindings;
use crate::config::InteractionConfig;
use crate::effects::{ColorSpread, ShapeTransition};
use log::{debug, error, warn};
use lumen_core::{LumenError, Result, Rgb, Vec3};
use lumen_gesture::{Gesture, GestureTransition, HandData};
use lumen_particles::{ParticleStore, PhysicsSimulator};
use lumen_shapes::{palette, Shape, ShapeSampler};

/// What a gesture change caused
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    Nothing,
    /// Explosion started; this shape forms when it ends
    Transition(Shape),
    ColorSpread,
}

pub struct InteractionManager {
    config: InteractionConfig,
    sampler: ShapeSampler,
    idle_color: Rgb,
    current_shape: Option<Shape>,
    /// Last shape whose targets were actually written
    formed_shape: Option<Shape>,
    transition: ShapeTransition,
    spread: ColorSpread,
    current_scale: f32,
}

impl InteractionManager {
    pub fn new(config: InteractionConfig, sampler: ShapeSampler) -> Self {
        let spread = ColorSpread::new(config.color_transition_duration, config.spread_color);
        let current_scale = 1.0_f32.max(config.min_scale).min(config.max_scale);
        Self {
            config,
            sampler,
            idle_color: palette::IDLE,
            current_shape: None,
            formed_shape: None,
            transition: ShapeTransition::default(),
            spread,
            current_scale,
        }
    }

    /// Hue the color spread fades back to
    pub fn with_idle_color(mut self, color: Rgb) -> Self {
        self.idle_color = color;
        self
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn sampler(&self) -> &ShapeSampler {
        &self.sampler
    }

    /// The shape particles are forming or about to form
    pub fn current_shape(&self) -> Option<&Shape> {
        self.current_shape.as_ref()
    }

    pub fn transition(&self) -> &ShapeTransition {
        &self.transition
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.active
    }

    pub fn spread(&self) -> &ColorSpread {
        &self.spread
    }

    // -- shape transitions --

    /// Explode the current formation; `shape` is sampled once the explosion
    /// window has passed.
    pub fn trigger_transition(
        &mut self,
        sim: &mut PhysicsSimulator,
        shape: Shape,
        center: Option<Vec3>,
    ) {
        if !sim.is_initialized() {
            warn!("[interaction] Transition to {} ignored: no population", shape);
            return;
        }
        debug!("[interaction] Transition to {}", shape);
        self.current_shape = Some(shape.clone());
        sim.trigger_explosion(center);
        self.transition.start(shape);
    }

    /// Advance the transition timer; on the tick it reaches the explosion
    /// duration, sample the pending shape and overwrite every target and color.
    ///
    /// Returns true on the tick new targets were applied. A failed reform
    /// keeps the old targets and puts the shape tag back to the formed shape.
    pub fn update_transition(&mut self, sim: &mut PhysicsSimulator, dt: f32) -> bool {
        let duration = sim.config().explosion_duration;
        let Some(shape) = self.transition.advance(dt, duration) else {
            return false;
        };
        match self.assign_shape(sim, &shape) {
            Ok(()) => {
                debug!("[interaction] Reformed as {}", shape);
                self.formed_shape = Some(shape);
                true
            }
            Err(e) => {
                error!("[interaction] Failed to reform as {}: {}", shape, e);
                self.current_shape = self.formed_shape.clone();
                false
            }
        }
    }

    /// Set targets and colors for `shape` right away, with no explosion.
    ///
    /// Cancels any pending transition. On error nothing changes.
    pub fn apply_shape_now(&mut self, sim: &mut PhysicsSimulator, shape: Shape) -> Result<()> {
        let store = sim.store_mut().ok_or(LumenError::NotInitialized)?;
        self.form_in(store, shape)
    }

    /// Like [`apply_shape_now`](Self::apply_shape_now), but against a store the
    /// simulator does not own yet. Used to shape a replacement population
    /// before it is swapped in.
    pub fn form_in(&mut self, store: &mut ParticleStore, shape: Shape) -> Result<()> {
        self.sample_into(store, &shape)?;
        self.transition.cancel();
        self.formed_shape = Some(shape.clone());
        self.current_shape = Some(shape);
        Ok(())
    }

    fn assign_shape(&mut self, sim: &mut PhysicsSimulator, shape: &Shape) -> Result<()> {
        let store = sim.store_mut().ok_or(LumenError::NotInitialized)?;
        self.sample_into(store, shape)
    }

    fn sample_into(&mut self, store: &mut ParticleStore, shape: &Shape) -> Result<()> {
        let set = self.sampler.sample(shape, store.len())?;
        store.assign_targets(&set.positions, &set.colors)
    }

    // -- wave impulse --

    /// True when the hand moves faster than the wave threshold
    pub fn check_wave_storm(&self, velocity: Vec3) -> bool {
        velocity.length() > self.config.velocity_threshold
    }

    /// Push particles near `center` along `direction`.
    ///
    /// Only the direction matters; magnitude is `force_strength` attenuated
    /// linearly to zero at `influence_radius`.
    pub fn apply_wave_force(&mut self, sim: &mut PhysicsSimulator, center: Vec3, direction: Vec3) {
        let dir = direction.normalized();
        if dir.length_squared() == 0.0 {
            return;
        }
        let radius = self.config.influence_radius;
        let strength = self.config.force_strength;
        sim.apply_force_field(|p| {
            let d = p.distance(&center);
            if d > radius {
                return None;
            }
            Some(dir * (strength * (1.0 - d / radius)))
        });
    }

    // -- depth-linked scale --

    /// Map the palm area ratio onto the scale range and move part of the way
    /// toward it
    pub fn update_scale(&mut self, area_ratio: f32) -> f32 {
        let c = &self.config;
        let ratio = area_ratio.max(c.min_area_ratio).min(c.max_area_ratio);
        let span = c.max_area_ratio - c.min_area_ratio;
        let t = if span > 0.0 {
            (ratio - c.min_area_ratio) / span
        } else {
            0.5
        };
        let target = c.min_scale + t * (c.max_scale - c.min_scale);
        let k = c.smoothing;
        self.current_scale = (self.current_scale * (1.0 - k) + target * k)
            .max(c.min_scale)
            .min(c.max_scale);
        self.current_scale
    }

    /// Smoothed uniform scale for the renderer
    pub fn current_scale(&self) -> f32 {
        self.current_scale
    }

    /// Jump straight to `scale` (manual controls), clamped to the range
    pub fn set_scale(&mut self, scale: f32) {
        self.current_scale = scale.max(self.config.min_scale).min(self.config.max_scale);
    }

    // -- finger-heart color spread --

    pub fn is_finger_heart_to_open_hand(previous: Gesture, current: Gesture) -> bool {
        previous == Gesture::FingerHeart && current == Gesture::OpenHand
    }

    /// Radial burst plus a color wash that fades back to idle
    pub fn trigger_finger_heart_spread(&mut self, sim: &mut PhysicsSimulator, center: Option<Vec3>) {
        let Some(store) = sim.store_mut() else {
            warn!("[interaction] Color spread ignored: no population");
            return;
        };
        store.fill_color(self.spread.start_color);
        sim.apply_radial_impulse(center.unwrap_or(Vec3::ZERO), self.config.spread_strength);
        self.spread.start();
        debug!("[interaction] Color spread started");
    }

    /// Advance the fade and repaint every particle
    pub fn update_finger_heart_spread(&mut self, sim: &mut PhysicsSimulator, dt: f32) {
        let Some(t) = self.spread.advance(dt) else {
            return;
        };
        let color = self.spread.start_color.lerp(&self.idle_color, t);
        if let Some(store) = sim.store_mut() {
            store.fill_color(color);
        }
        if !self.spread.active {
            debug!("[interaction] Color spread finished");
        }
    }

    // -- drivers --

    /// React to a gesture change: the finger-heart → open-hand edge fires the
    /// color spread, otherwise a bound gesture starts a shape transition.
    pub fn on_gesture_transition(
        &mut self,
        sim: &mut PhysicsSimulator,
        transition: GestureTransition,
        bindings: &GestureBindings,
        center: Option<Vec3>,
    ) -> Reaction {
        if Self::is_finger_heart_to_open_hand(transition.from, transition.to) {
            self.trigger_finger_heart_spread(sim, center);
            return Reaction::ColorSpread;
        }
        let Some(shape) = bindings.shape_for(transition.to) else {
            return Reaction::Nothing;
        };
        if self.current_shape.as_ref() == Some(shape) {
            debug!("[interaction] Already showing {}", shape);
            return Reaction::Nothing;
        }
        self.trigger_transition(sim, shape.clone(), center);
        if self.transition.active {
            Reaction::Transition(shape.clone())
        } else {
            Reaction::Nothing
        }
    }

    /// Per-frame driver: timers always advance; hand motion adds the wave
    /// and drives the scale
    pub fn update(&mut self, sim: &mut PhysicsSimulator, hand: Option<&HandData>, dt: f32) {
        self.update_transition(sim, dt);
        self.update_finger_heart_spread(sim, dt);

        if let Some(hand) = hand {
            if self.check_wave_storm(hand.velocity) {
                self.apply_wave_force(sim, hand.center, hand.velocity);
            }
            self.update_scale(hand.area_ratio);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::SampleRng;
    use lumen_particles::PhysicsConfig;
    use lumen_shapes::SamplerConfig;

    fn setup(count: usize) -> (PhysicsSimulator, InteractionManager) {
        let mut sim = PhysicsSimulator::new(PhysicsConfig::default());
        sim.initialize(count, palette::IDLE, &mut SampleRng::new(8))
            .unwrap();
        let manager = InteractionManager::new(
            InteractionConfig::default(),
            ShapeSampler::new(SamplerConfig::default(), 8),
        );
        (sim, manager)
    }

    fn targets(sim: &PhysicsSimulator) -> Vec<f32> {
        sim.store().unwrap().targets().to_vec()
    }

    #[test]
    fn transition_waits_for_explosion_then_reforms() {
        let (mut sim, mut manager) = setup(300);
        manager.apply_shape_now(&mut sim, Shape::Planet).unwrap();
        let planet = targets(&sim);

        manager.trigger_transition(&mut sim, Shape::Star, None);
        assert!(sim.is_explosion_active());
        assert_eq!(manager.current_shape(), Some(&Shape::Star));

        // explosion_duration is 0.6; 0.1 steps land at 0.1 .. 0.5
        for _ in 0..5 {
            assert!(!manager.update_transition(&mut sim, 0.1));
            assert_eq!(targets(&sim), planet);
        }
        assert!(manager.update_transition(&mut sim, 0.15));
        assert_ne!(targets(&sim), planet);
        assert!(!manager.is_transitioning());

        // Exactly once
        let star = targets(&sim);
        assert!(!manager.update_transition(&mut sim, 1.0));
        assert_eq!(targets(&sim), star);
        assert!(sim
            .store()
            .unwrap()
            .colors()
            .chunks(3)
            .all(|c| Rgb::new(c[0], c[1], c[2]) == palette::STAR));
    }

    #[test]
    fn transition_without_population_is_ignored() {
        let mut sim = PhysicsSimulator::new(PhysicsConfig::default());
        let mut manager = InteractionManager::new(
            InteractionConfig::default(),
            ShapeSampler::new(SamplerConfig::default(), 1),
        );
        manager.trigger_transition(&mut sim, Shape::Heart, None);
        assert!(!manager.is_transitioning());
        assert!(manager.apply_shape_now(&mut sim, Shape::Heart).is_err());
    }

    #[test]
    fn wave_storm_threshold_is_strict() {
        let (_, manager) = setup(1);
        assert!(!manager.check_wave_storm(Vec3::new(2.0, 0.0, 0.0)));
        assert!(manager.check_wave_storm(Vec3::new(2.0, 0.1, 0.0)));
    }

    #[test]
    fn wave_force_attenuates_and_respects_radius() {
        let (mut sim, mut manager) = setup(3);
        let positions = [
            Vec3::ZERO,
            Vec3::new(1.5, 0.0, 0.0),
            Vec3::new(10.0, 0.0, 0.0),
        ];
        {
            let store = sim.store_mut().unwrap();
            for (i, p) in positions.iter().enumerate() {
                p.write_to(store.positions_mut(), i);
            }
        }
        // Direction magnitude does not matter
        manager.apply_wave_force(&mut sim, Vec3::ZERO, Vec3::new(0.0, 50.0, 0.0));
        let store = sim.store().unwrap();
        assert!((store.acceleration(0) - Vec3::new(0.0, 60.0, 0.0)).length() < 1e-4);
        assert!((store.acceleration(1) - Vec3::new(0.0, 30.0, 0.0)).length() < 1e-4);
        assert_eq!(store.acceleration(2), Vec3::ZERO);
    }

    #[test]
    fn scale_is_monotonic_bounded_and_smoothed() {
        let (_, mut manager) = setup(1);
        let first = manager.update_scale(0.4);
        assert!(first > 1.0 && first < 2.0);

        let converge = |m: &mut InteractionManager, r: f32| {
            for _ in 0..500 {
                m.update_scale(r);
            }
            m.current_scale()
        };
        let big = converge(&mut manager, 0.3);
        let small = converge(&mut manager, 0.1);
        assert!(big > small);
        assert!((converge(&mut manager, 5.0) - 2.0).abs() < 1e-3);
        assert!((converge(&mut manager, -1.0) - 0.5).abs() < 1e-3);
        assert!(manager.current_scale() >= 0.5 && manager.current_scale() <= 2.0);
    }

    #[test]
    fn finger_heart_to_open_hand_fades_color() {
        let (mut sim, mut manager) = setup(20);
        let bindings = GestureBindings::default();
        let reaction = manager.on_gesture_transition(
            &mut sim,
            GestureTransition {
                from: Gesture::FingerHeart,
                to: Gesture::OpenHand,
            },
            &bindings,
            None,
        );
        assert_eq!(reaction, Reaction::ColorSpread);
        let spread = manager.config().spread_color;
        assert_eq!(Rgb::from_slice(sim.store().unwrap().colors(), 0), spread);
        assert!(sim.store().unwrap().acceleration(0).length() > 0.0);

        manager.update_finger_heart_spread(&mut sim, 0.75);
        let half = spread.lerp(&palette::IDLE, 0.5);
        let c = Rgb::from_slice(sim.store().unwrap().colors(), 3);
        assert!((c.r - half.r).abs() < 1e-4 && (c.b - half.b).abs() < 1e-4);

        manager.update_finger_heart_spread(&mut sim, 1.0);
        assert!(!manager.spread().active);
        let c = Rgb::from_slice(sim.store().unwrap().colors(), 7);
        assert!((c.g - palette::IDLE.g).abs() < 1e-4);
    }

    #[test]
    fn bound_gesture_starts_transition_once() {
        let (mut sim, mut manager) = setup(50);
        let bindings = GestureBindings::default();
        let to_fist = GestureTransition {
            from: Gesture::Idle,
            to: Gesture::Fist,
        };
        assert_eq!(
            manager.on_gesture_transition(&mut sim, to_fist, &bindings, None),
            Reaction::Transition(Shape::Planet)
        );
        assert_eq!(
            manager.on_gesture_transition(&mut sim, to_fist, &bindings, None),
            Reaction::Nothing
        );
        let to_open = GestureTransition {
            from: Gesture::Fist,
            to: Gesture::OpenHand,
        };
        assert_eq!(
            manager.on_gesture_transition(&mut sim, to_open, &bindings, None),
            Reaction::Nothing
        );
    }

    #[test]
    fn update_without_hand_only_advances_timers() {
        let (mut sim, mut manager) = setup(10);
        manager.trigger_transition(&mut sim, Shape::Torus, None);
        sim.store_mut().unwrap().reset_accelerations();
        let scale = manager.current_scale();
        manager.update(&mut sim, None, 0.7);
        assert!(!manager.is_transitioning());
        assert_eq!(manager.current_scale(), scale);
        assert_eq!(sim.store().unwrap().acceleration(0), Vec3::ZERO);

        let hand = HandData {
            velocity: Vec3::new(5.0, 0.0, 0.0),
            area_ratio: 0.4,
            ..HandData::default()
        };
        manager.update(&mut sim, Some(&hand), 0.016);
        assert!(manager.current_scale() > scale);
    }

    #[test]
    fn failed_reform_keeps_targets_and_formed_shape() {
        let (mut sim, mut manager) = setup(80);
        manager.apply_shape_now(&mut sim, Shape::Planet).unwrap();
        let planet = targets(&sim);

        manager.trigger_transition(&mut sim, Shape::Text("   ".to_string()), None);
        assert!(!manager.update_transition(&mut sim, 1.0));
        assert!(!manager.is_transitioning());
        assert_eq!(targets(&sim), planet);
        assert_eq!(manager.current_shape(), Some(&Shape::Planet));
    }

    #[test]
    fn failed_form_in_leaves_store_and_state_alone() {
        let (mut sim, mut manager) = setup(50);
        manager.apply_shape_now(&mut sim, Shape::Heart).unwrap();
        manager.trigger_transition(&mut sim, Shape::Torus, None);

        let mut store = ParticleStore::initialize(30, palette::IDLE, &mut SampleRng::new(4)).unwrap();
        let before = store.targets().to_vec();
        assert!(manager
            .form_in(&mut store, Shape::Text("   ".to_string()))
            .is_err());
        assert_eq!(store.targets(), &before[..]);
        assert!(manager.is_transitioning());
        assert_eq!(manager.current_shape(), Some(&Shape::Torus));

        manager.form_in(&mut store, Shape::Star).unwrap();
        assert!(!manager.is_transitioning());
        assert_eq!(manager.current_shape(), Some(&Shape::Star));
        assert_eq!(Rgb::from_slice(store.colors(), 29), palette::STAR);
    }
}
