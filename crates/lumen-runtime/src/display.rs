//! Per-frame driver tying input, gestures, interaction and physics together

use crate::config::LumenConfig;
use crate::controls::{FrameInput, ManualControls};
use crate::transform::SceneTransform;
use log::{error, info};
use lumen_core::{Result, SampleRng};
use lumen_gesture::{Gesture, GestureStateMachine, HandData};
use lumen_interaction::{InteractionManager, Reaction};
use lumen_particles::{FrameSnapshot, ParticleStore, PhysicsSimulator};
use lumen_shapes::ShapeSampler;

/// The display shell: owns the simulator, the interaction layer, the gesture
/// state machine and the scene transform.
pub struct ParticleDisplay {
    config: LumenConfig,
    sim: PhysicsSimulator,
    interaction: InteractionManager,
    gestures: GestureStateMachine,
    transform: SceneTransform,
    rng: SampleRng,
}

impl ParticleDisplay {
    /// Validate `config`, spawn the population and form the initial shape
    pub fn new(config: LumenConfig) -> Result<Self> {
        config.validate()?;
        let settings = &config.particles;
        let mut rng = SampleRng::new(settings.seed);

        let mut sim = PhysicsSimulator::new(config.physics.clone());
        sim.initialize(settings.count, settings.idle_color, &mut rng)?;

        let sampler = ShapeSampler::new(config.shapes.clone(), settings.seed);
        let mut interaction = InteractionManager::new(config.interaction.clone(), sampler)
            .with_idle_color(settings.idle_color);
        interaction.apply_shape_now(&mut sim, settings.initial_shape.clone())?;

        let gestures = GestureStateMachine::new(config.gesture.clone());
        info!(
            "Display ready: {} particles forming {}",
            settings.count, settings.initial_shape
        );

        Ok(Self {
            config,
            sim,
            interaction,
            gestures,
            transform: SceneTransform::default(),
            rng,
        })
    }

    pub fn config(&self) -> &LumenConfig {
        &self.config
    }

    pub fn simulator(&self) -> &PhysicsSimulator {
        &self.sim
    }

    pub fn interaction(&self) -> &InteractionManager {
        &self.interaction
    }

    pub fn gestures(&self) -> &GestureStateMachine {
        &self.gestures
    }

    /// For registering gesture observers
    pub fn gestures_mut(&mut self) -> &mut GestureStateMachine {
        &mut self.gestures
    }

    pub fn transform(&self) -> &SceneTransform {
        &self.transform
    }

    pub fn particle_count(&self) -> usize {
        self.sim.particle_count()
    }

    /// Advance one frame.
    ///
    /// Manual controls apply first, then the hand (mapped into the particle
    /// frame) feeds the gesture machine and the interaction layer, then
    /// physics integrates. A frame without a hand counts as idle.
    pub fn frame(&mut self, input: &FrameInput, dt: f32) -> Reaction {
        let mut reaction = Reaction::Nothing;

        if let Some(manual) = &input.manual {
            reaction = self.apply_manual(manual);
        }

        let hand = input.hand.map(|h| self.hand_to_local(&h));
        let gesture = hand.map_or(Gesture::Idle, |h| h.gesture);
        if let Some(transition) = self.gestures.update(gesture, dt) {
            let center = hand.map(|h| h.center);
            let response = self.interaction.on_gesture_transition(
                &mut self.sim,
                transition,
                &self.config.bindings,
                center,
            );
            if response != Reaction::Nothing {
                reaction = response;
            }
        }

        self.interaction.update(&mut self.sim, hand.as_ref(), dt);
        self.sim.update(dt);
        self.transform.scale = self.interaction.current_scale();
        reaction
    }

    fn apply_manual(&mut self, manual: &ManualControls) -> Reaction {
        self.transform.rotate(manual.rotation_delta);
        if let Some(scale) = manual.scale {
            self.interaction.set_scale(scale);
            self.transform.scale = self.interaction.current_scale();
        }
        match &manual.shape {
            Some(shape) if self.interaction.current_shape() != Some(shape) => {
                self.interaction
                    .trigger_transition(&mut self.sim, shape.clone(), None);
                Reaction::Transition(shape.clone())
            }
            _ => Reaction::Nothing,
        }
    }

    /// Hand position and motion expressed in the particle frame
    fn hand_to_local(&self, hand: &HandData) -> HandData {
        HandData {
            center: self.transform.world_to_local(hand.center),
            velocity: self.transform.direction_to_local(hand.velocity),
            ..*hand
        }
    }

    /// Replace the population with `count` fresh particles.
    ///
    /// The new store is built and shaped before the swap, so a failure
    /// leaves the old population, count and shape untouched. The scene
    /// transform and the active shape carry over.
    pub fn set_particle_count(&mut self, count: usize) -> Result<()> {
        let mut store =
            ParticleStore::initialize(count, self.config.particles.idle_color, &mut self.rng)?;
        let shape = self
            .interaction
            .current_shape()
            .cloned()
            .unwrap_or_else(|| self.config.particles.initial_shape.clone());
        if let Err(e) = self.interaction.form_in(&mut store, shape.clone()) {
            error!("Failed to form {} for {} particles: {}", shape, count, e);
            return Err(e);
        }

        self.sim.replace_store(store);
        self.config.particles.count = count;
        info!("Particle count changed to {}", count);
        Ok(())
    }

    /// Borrowed draw data for the renderer
    pub fn snapshot(&self) -> Option<FrameSnapshot<'_>> {
        let store = self.sim.store()?;
        Some(FrameSnapshot::new(
            store,
            self.interaction.current_scale(),
            self.transform.rotation,
        ))
    }
}
