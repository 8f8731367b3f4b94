//! Simulation clock with a fixed-timestep accumulator

/// Frame deltas longer than this are clamped so a stall cannot queue an
/// unbounded number of steps
const MAX_FRAME_TIME: f64 = 0.25;

/// Tracks simulated time and hands out fixed steps.
///
/// Time is fed in explicitly with [`GameClock::advance`], so the same clock
/// drives live frame callbacks and headless scenario playback.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Total simulated time in seconds
    pub total_time: f64,
    /// Length of the last advance in seconds, after clamping
    pub delta_time: f64,
    /// Fixed step length (default: 1/60 second)
    pub fixed_timestep: f64,
    accumulator: f64,
    steps: u64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            accumulator: 0.0,
            steps: 0,
        }
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clock stepping at `hz` steps per second
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Add `dt` seconds of elapsed time
    pub fn advance(&mut self, dt: f64) {
        self.delta_time = dt.clamp(0.0, MAX_FRAME_TIME);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Whether a full fixed step is waiting
    pub fn should_fixed_update(&self) -> bool {
        // Tolerance absorbs the rounding of repeated 1/hz additions
        self.accumulator + 1e-9 >= self.fixed_timestep
    }

    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
        self.steps += 1;
    }

    /// Fixed steps consumed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time covered by consumed steps
    pub fn step_time(&self) -> f64 {
        self.steps as f64 * self.fixed_timestep
    }
}
