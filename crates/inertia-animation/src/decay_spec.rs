//! Per-frame momentum decay.
//!
//! Velocity is in pixels per frame. Each frame the offset moves by the
//! current velocity, then velocity is multiplied by `deceleration`. Once it
//! is slower than `slow_threshold` the tail gets an extra `slow_deceleration`
//! factor so lists don't creep for seconds.

/// Main per-frame velocity multiplier.
pub const DECELERATION: f32 = 0.92;

/// Extra multiplier applied once velocity falls below [`SLOW_THRESHOLD`].
pub const SLOW_DECELERATION: f32 = 0.88;

/// Speed (px/frame) under which the steeper tail decay kicks in.
pub const SLOW_THRESHOLD: f32 = 3.0;

/// Speed (px/frame) under which momentum stops.
pub const MIN_VELOCITY: f32 = 0.6;

/// Guard against a misconfigured spec that never settles.
const MAX_FRAMES: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumDecaySpec {
    pub deceleration: f32,
    pub slow_deceleration: f32,
    pub slow_threshold: f32,
    pub min_velocity: f32,
}

impl Default for MomentumDecaySpec {
    fn default() -> Self {
        Self {
            deceleration: DECELERATION,
            slow_deceleration: SLOW_DECELERATION,
            slow_threshold: SLOW_THRESHOLD,
            min_velocity: MIN_VELOCITY,
        }
    }
}

impl MomentumDecaySpec {
    pub fn with_deceleration(mut self, deceleration: f32) -> Self {
        self.deceleration = deceleration;
        self
    }

    pub fn with_slow_decay(mut self, threshold: f32, deceleration: f32) -> Self {
        self.slow_threshold = threshold;
        self.slow_deceleration = deceleration;
        self
    }

    pub fn with_min_velocity(mut self, min_velocity: f32) -> Self {
        self.min_velocity = min_velocity.abs();
        self
    }

    /// True when `velocity` is too slow to animate.
    pub fn is_settled(&self, velocity: f32) -> bool {
        !(velocity.abs() >= self.min_velocity)
    }

    /// Velocity for the next frame, after decay.
    pub fn decay(&self, velocity: f32) -> f32 {
        let mut next = velocity * self.deceleration;
        if next.abs() < self.slow_threshold {
            next *= self.slow_deceleration;
        }
        next
    }

    /// Decays `velocity` by one frame; `None` once it has settled.
    pub fn step(&self, velocity: f32) -> Option<f32> {
        let next = self.decay(velocity);
        if self.is_settled(next) {
            None
        } else {
            Some(next)
        }
    }

    /// Velocity after `frames` decay steps, ignoring the stop threshold.
    pub fn velocity_after(&self, initial_velocity: f32, frames: u32) -> f32 {
        (0..frames).fold(initial_velocity, |velocity, _| self.decay(velocity))
    }

    /// Number of frames that move the offset before the animation stops.
    pub fn frames_to_settle(&self, initial_velocity: f32) -> u32 {
        if self.is_settled(initial_velocity) {
            return 0;
        }
        let mut frames = 1;
        let mut velocity = initial_velocity;
        while let Some(next) = self.step(velocity) {
            velocity = next;
            frames += 1;
            if frames >= MAX_FRAMES {
                break;
            }
        }
        frames
    }

    /// Total offset change over the whole animation (offset moves by `-v`).
    pub fn total_displacement(&self, initial_velocity: f32) -> f32 {
        if self.is_settled(initial_velocity) {
            return 0.0;
        }
        let mut total = -initial_velocity;
        let mut velocity = initial_velocity;
        let mut frames = 1;
        while let Some(next) = self.step(velocity) {
            total -= next;
            velocity = next;
            frames += 1;
            if frames >= MAX_FRAMES {
                break;
            }
        }
        total
    }

    /// Upper bound on frames from pure exponential decay without the slow tail:
    /// `ceil(ln(min / |v0|) / ln(deceleration))`, and at least one frame for
    /// any velocity that moves the offset.
    pub fn frame_bound(&self, initial_velocity: f32) -> u32 {
        if self.is_settled(initial_velocity)
            || self.deceleration <= 0.0
            || self.deceleration >= 1.0
        {
            return 0;
        }
        let speed = initial_velocity.abs();
        let frames = ((self.min_velocity / speed).ln() / self.deceleration.ln()).ceil() as u32;
        frames.max(1)
    }
}
