use crate::gesture_constants::*;

/// Tuning for touch sampling, classification and release velocity.
///
/// The defaults were picked by feel on phones; treat them as knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    pub drag_threshold: f32,
    pub tap_timeout_ms: u64,
    pub long_press_ms: u64,
    pub click_suppress_ms: u64,
    pub sample_interval_ms: u64,
    pub jitter_threshold: f32,
    pub max_samples: usize,
    pub recent_window_ms: u64,
    pub velocity_multiplier: f32,
    pub max_velocity: f32,
    pub min_velocity: f32,
    pub haptics_enabled: bool,
    pub drag_haptic_ms: u32,
    pub long_press_haptic_ms: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            drag_threshold: DRAG_THRESHOLD,
            tap_timeout_ms: TAP_TIMEOUT_MS,
            long_press_ms: LONG_PRESS_MS,
            click_suppress_ms: CLICK_SUPPRESS_MS,
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            jitter_threshold: JITTER_THRESHOLD,
            max_samples: MAX_VELOCITY_SAMPLES,
            recent_window_ms: RECENT_SAMPLE_WINDOW_MS,
            velocity_multiplier: VELOCITY_MULTIPLIER,
            max_velocity: MAX_MOMENTUM_VELOCITY,
            min_velocity: MIN_MOMENTUM_VELOCITY,
            haptics_enabled: true,
            drag_haptic_ms: DRAG_HAPTIC_MS,
            long_press_haptic_ms: LONG_PRESS_HAPTIC_MS,
        }
    }
}

impl GestureConfig {
    pub fn with_drag_threshold(mut self, px: f32) -> Self {
        self.drag_threshold = px;
        self
    }

    pub fn with_tap_timeout(mut self, ms: u64) -> Self {
        self.tap_timeout_ms = ms;
        self
    }

    pub fn with_long_press_delay(mut self, ms: u64) -> Self {
        self.long_press_ms = ms;
        self
    }

    pub fn with_click_suppress(mut self, ms: u64) -> Self {
        self.click_suppress_ms = ms;
        self
    }

    pub fn with_sample_interval(mut self, ms: u64) -> Self {
        self.sample_interval_ms = ms;
        self
    }

    /// Sample buffer capacity; at least one sample is always kept.
    pub fn with_max_samples(mut self, count: usize) -> Self {
        self.max_samples = count.max(1);
        self
    }

    pub fn with_velocity_multiplier(mut self, factor: f32) -> Self {
        self.velocity_multiplier = factor;
        self
    }

    pub fn with_velocity_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_velocity = min.abs();
        self.max_velocity = max.abs().max(self.min_velocity);
        self
    }

    pub fn with_haptics(mut self, enabled: bool) -> Self {
        self.haptics_enabled = enabled;
        self
    }
}
