//! Headless input scripts
//!
//! A scenario is a TOML file of timed keyframes. Each keyframe can replace
//! the tracked hand (or drop it) and can carry one frame of manual controls.
//! Playback runs the display on a fixed-step [`GameClock`] and samples
//! [`FrameStats`] once per simulated second.
//!
//! ```toml
//! name = "torus then wave"
//! duration = 4.0
//!
//! [[keyframes]]
//! at = 0.5
//! hand = { gesture = "pointing", area_ratio = 0.2 }
//!
//! [[keyframes]]
//! at = 2.0
//! hand = { gesture = "pointing", velocity = [4.0, 0.0, 0.0] }
//!
//! [[keyframes]]
//! at = 3.0
//! hand_lost = true
//! ```

use crate::clock::GameClock;
use crate::controls::{FrameInput, ManualControls};
use crate::display::ParticleDisplay;
use log::{debug, info};
use lumen_core::{LumenError, Result, Vec3};
use lumen_gesture::{Gesture, HandData};
use lumen_interaction::Reaction;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;

fn default_fps() -> f32 {
    60.0
}

/// One timed input change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds from the start
    pub at: f32,
    /// New tracked hand, held until the next keyframe that changes it
    #[serde(default)]
    pub hand: Option<HandData>,
    /// Clears the tracked hand
    #[serde(default)]
    pub hand_lost: bool,
    /// Applied on the single frame the keyframe fires
    #[serde(default)]
    pub manual: Option<ManualControls>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Seconds of simulated time
    pub duration: f32,
    #[serde(default = "default_fps")]
    pub fps: f32,
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

/// Aggregate state sampled during playback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub time: f32,
    pub mean_speed: f32,
    /// Mean distance from each particle to its target
    pub mean_target_distance: f32,
    pub shape: Option<String>,
    pub gesture: Gesture,
    pub scale: f32,
    pub explosion_active: bool,
}

impl FrameStats {
    pub fn capture(display: &ParticleDisplay, time: f32) -> Self {
        let (mean_speed, mean_target_distance) = match display.simulator().store() {
            Some(store) if !store.is_empty() => {
                let n = store.len();
                let (speed, dist) = (0..n).fold((0.0, 0.0), |(s, d), i| {
                    (
                        s + store.velocity(i).length(),
                        d + store.position(i).distance(&store.target(i)),
                    )
                });
                (speed / n as f32, dist / n as f32)
            }
            _ => (0.0, 0.0),
        };
        Self {
            time,
            mean_speed,
            mean_target_distance,
            shape: display.interaction().current_shape().map(|s| s.to_string()),
            gesture: display.gestures().current(),
            scale: display.interaction().current_scale(),
            explosion_active: display.simulator().is_explosion_active(),
        }
    }
}

/// Result of a playback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub frames: u64,
    pub gesture_changes: u32,
    /// Reactions other than `Nothing`, with the frame time they fired at
    pub reactions: Vec<(f32, String)>,
    pub stats: Vec<FrameStats>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            LumenError::TomlParseError(msg) => {
                LumenError::ScenarioError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse, order keyframes by time and validate
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut scenario: Scenario = toml::from_str(content)?;
        scenario
            .keyframes
            .sort_by(|a, b| a.at.total_cmp(&b.at));
        scenario.validate()?;
        Ok(scenario)
    }

    /// Checks duration, fps and keyframe times. Keyframes must be in time
    /// order; playback walks them front to back.
    pub fn validate(&self) -> Result<()> {
        if !(self.duration > 0.0) || !self.duration.is_finite() {
            return Err(LumenError::ScenarioError(format!(
                "duration must be greater than zero, got {}",
                self.duration
            )));
        }
        if !(self.fps > 0.0) || !self.fps.is_finite() {
            return Err(LumenError::ScenarioError(format!(
                "fps must be greater than zero, got {}",
                self.fps
            )));
        }
        if let Some(k) = self
            .keyframes
            .iter()
            .find(|k| !(k.at >= 0.0) || k.at > self.duration)
        {
            return Err(LumenError::ScenarioError(format!(
                "keyframe at {} lies outside 0..={}",
                k.at, self.duration
            )));
        }
        if let Some(pair) = self.keyframes.windows(2).find(|w| w[1].at < w[0].at) {
            return Err(LumenError::ScenarioError(format!(
                "keyframe at {} is listed after keyframe at {}; keyframes must be in time order",
                pair[1].at, pair[0].at
            )));
        }
        Ok(())
    }

    /// Play the scenario against `display`
    pub fn run(&self, display: &mut ParticleDisplay) -> Result<ScenarioReport> {
        self.validate()?;
        info!(
            "Playing scenario {:?}: {:.1}s at {} fps, {} keyframe(s)",
            self.name,
            self.duration,
            self.fps,
            self.keyframes.len()
        );

        let changes = Rc::new(Cell::new(0u32));
        let counter = changes.clone();
        let observer = display.gestures_mut().subscribe(move |prev, curr, _| {
            debug!("Scenario saw gesture {} -> {}", prev, curr);
            counter.set(counter.get() + 1);
            Ok(())
        });

        let step = 1.0 / self.fps;
        let mut clock = GameClock::with_fixed_timestep(self.fps as f64);
        let mut next_keyframe = 0;
        let mut hand: Option<HandData> = None;
        let mut reactions = Vec::new();
        let mut stats = Vec::new();
        let mut next_sample = 1.0_f32;

        while clock.step_time() < self.duration as f64 - 1e-6 {
            clock.advance(clock.fixed_timestep);
            while clock.should_fixed_update() {
                clock.consume_fixed_step();
                let now = clock.step_time() as f32;

                let mut manual = None;
                while let Some(k) = self.keyframes.get(next_keyframe) {
                    if k.at > now {
                        break;
                    }
                    if k.hand_lost {
                        hand = None;
                    }
                    if let Some(h) = k.hand {
                        hand = Some(h);
                    }
                    if k.manual.is_some() {
                        manual = k.manual.clone();
                    }
                    next_keyframe += 1;
                }

                let input = FrameInput { hand, manual };
                match display.frame(&input, step) {
                    Reaction::Nothing => {}
                    Reaction::Transition(shape) => {
                        reactions.push((now, format!("transition:{shape}")));
                    }
                    Reaction::ColorSpread => {
                        reactions.push((now, "color_spread".to_string()));
                    }
                }

                if now + 1e-4 >= next_sample {
                    stats.push(FrameStats::capture(display, now));
                    next_sample += 1.0;
                }
            }
        }

        let end = clock.step_time() as f32;
        if stats.last().map_or(true, |s| (s.time - end).abs() > 1e-4) {
            stats.push(FrameStats::capture(display, end));
        }

        display.gestures_mut().unsubscribe(observer);
        Ok(ScenarioReport {
            name: self.name.clone(),
            frames: clock.steps(),
            gesture_changes: changes.get(),
            reactions,
            stats,
        })
    }
}

impl ScenarioReport {
    /// Mean particle speed over all samples, for quick summaries
    pub fn overall_mean_speed(&self) -> f32 {
        if self.stats.is_empty() {
            return 0.0;
        }
        self.stats.iter().map(|s| s.mean_speed).sum::<f32>() / self.stats.len() as f32
    }
}

/// Built-in tour through every bound gesture, played when no scenario file
/// is given
pub fn demo() -> Scenario {
    let gestures = [
        Gesture::Fist,
        Gesture::Victory,
        Gesture::FingerHeart,
        Gesture::OpenHand,
        Gesture::Pointing,
        Gesture::ThumbsUp,
        Gesture::RockOn,
    ];
    let mut keyframes: Vec<Keyframe> = gestures
        .iter()
        .enumerate()
        .map(|(i, g)| Keyframe {
            at: i as f32 * 1.5,
            hand: Some(HandData {
                gesture: *g,
                area_ratio: 0.1 + 0.04 * i as f32,
                ..HandData::default()
            }),
            ..Keyframe::default()
        })
        .collect();
    keyframes.push(Keyframe {
        at: 4.0,
        hand: Some(HandData {
            gesture: Gesture::FingerHeart,
            velocity: Vec3::new(5.0, 0.0, 0.0),
            ..HandData::default()
        }),
        ..Keyframe::default()
    });
    keyframes.sort_by(|a, b| a.at.total_cmp(&b.at));
    Scenario {
        name: "demo".to_string(),
        duration: gestures.len() as f32 * 1.5 + 1.0,
        fps: 60.0,
        keyframes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LumenConfig;

    fn display(count: usize) -> ParticleDisplay {
        let mut config = LumenConfig::default();
        config.particles.count = count;
        ParticleDisplay::new(config).unwrap()
    }

    const SCRIPT: &str = r#"
name = "victory then release"
duration = 3.0
fps = 30.0

[[keyframes]]
at = 2.0
hand_lost = true

[[keyframes]]
at = 0.5
hand = { gesture = "victory", area_ratio = 0.3 }
"#;

    #[test]
    fn parses_and_orders_keyframes() {
        let s = Scenario::from_toml_str(SCRIPT).unwrap();
        assert_eq!(s.keyframes.len(), 2);
        assert!((s.keyframes[0].at - 0.5).abs() < 1e-6);
        assert!(s.keyframes[1].hand_lost);
        assert_eq!(s.keyframes[0].hand.unwrap().gesture, Gesture::Victory);
    }

    #[test]
    fn rejects_invalid_scripts() {
        assert!(matches!(
            Scenario::from_toml_str("duration = 0.0"),
            Err(LumenError::ScenarioError(_))
        ));
        assert!(Scenario::from_toml_str("duration = 1.0\n[[keyframes]]\nat = 5.0").is_err());
        assert!(Scenario::from_toml_str("duration = ").is_err());
    }

    #[test]
    fn unordered_keyframes_are_rejected_before_playback() {
        let mut scenario = Scenario::from_toml_str(SCRIPT).unwrap();
        scenario.keyframes.reverse();
        assert!(matches!(
            scenario.validate(),
            Err(LumenError::ScenarioError(_))
        ));

        let mut d = display(50);
        assert!(scenario.run(&mut d).is_err());
        assert_eq!(d.gestures().observer_count(), 0);
    }

    #[test]
    fn playback_counts_frames_changes_and_samples() {
        let scenario = Scenario::from_toml_str(SCRIPT).unwrap();
        let mut d = display(120);
        let report = scenario.run(&mut d).unwrap();

        assert_eq!(report.frames, 90);
        // idle -> victory, victory -> idle
        assert_eq!(report.gesture_changes, 2);
        assert_eq!(report.reactions.len(), 1);
        assert_eq!(report.reactions[0].1, "transition:star");
        assert_eq!(report.stats.len(), 3);
        assert!((report.stats[2].time - 3.0).abs() < 1e-3);
        assert_eq!(report.stats[2].gesture, Gesture::Idle);
        assert_eq!(d.gestures().observer_count(), 0);
    }

    #[test]
    fn demo_tour_visits_every_shape() {
        let scenario = demo();
        assert!(scenario.validate().is_ok());
        let mut d = display(200);
        let report = scenario.run(&mut d).unwrap();
        let transitions: Vec<&str> = report.reactions.iter().map(|(_, r)| r.as_str()).collect();
        assert!(transitions.contains(&"transition:star"));
        assert!(transitions.contains(&"transition:arrow_heart"));
        assert!(transitions.contains(&"color_spread"));
        assert!(report.stats.iter().all(|s| s.mean_speed.is_finite()));
        assert!(report.overall_mean_speed() >= 0.0);
    }
}
