//! Velocity sampling for momentum scrolling.
//!
//! Movement is sampled on a throttled tick as a per-tick pixel delta. At
//! release the most recent samples are folded into one seed velocity with
//! exponential recency weighting, so the last flick of the finger dominates.

use smallvec::SmallVec;

use crate::config::GestureConfig;

/// Inline capacity of the sample buffer; one spare slot over the default cap.
const SAMPLE_BUFFER_INLINE: usize = 8;

/// A recorded per-tick vertical delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocitySample {
    /// Pixels moved since the previous tick (px/tick, signed).
    pub velocity: f32,
    pub timestamp_ms: u64,
}

/// Throttled, jitter-filtered recorder of vertical velocity samples.
///
/// The buffer is bounded: once it holds `max_samples` entries the oldest is
/// evicted for every new one.
#[derive(Clone, Debug)]
pub struct VelocitySampler {
    samples: SmallVec<[VelocitySample; SAMPLE_BUFFER_INLINE]>,
    last_y: f32,
    last_sample_time: u64,
    interval_ms: u64,
    jitter_threshold: f32,
    max_samples: usize,
}

impl VelocitySampler {
    pub fn new(config: &GestureConfig) -> Self {
        Self {
            samples: SmallVec::new(),
            last_y: 0.0,
            last_sample_time: 0,
            interval_ms: config.sample_interval_ms,
            jitter_threshold: config.jitter_threshold,
            max_samples: config.max_samples.max(1),
        }
    }

    /// Starts a new drag at `y`, clearing all samples.
    pub fn reset(&mut self, y: f32, timestamp_ms: u64) {
        self.samples.clear();
        self.last_y = y;
        self.last_sample_time = timestamp_ms;
    }

    /// Feeds a pointer position. Returns the sample if one was recorded.
    ///
    /// Calls closer than the sampling interval to the previous tick are
    /// ignored entirely. On a tick, `last_y` and the tick time always advance,
    /// even when the movement is below the jitter threshold.
    pub fn on_move(&mut self, y: f32, timestamp_ms: u64) -> Option<VelocitySample> {
        if timestamp_ms.saturating_sub(self.last_sample_time) < self.interval_ms {
            return None;
        }

        let current_velocity = y - self.last_y;
        self.last_y = y;
        self.last_sample_time = timestamp_ms;

        if current_velocity.abs() <= self.jitter_threshold {
            return None;
        }

        let sample = VelocitySample {
            velocity: current_velocity,
            timestamp_ms,
        };
        self.samples.push(sample);
        while self.samples.len() > self.max_samples {
            self.samples.remove(0);
        }
        log::trace!(
            "velocity sample {:.2}px at {}ms ({} buffered)",
            current_velocity,
            timestamp_ms,
            self.samples.len()
        );
        Some(sample)
    }

    pub fn samples(&self) -> &[VelocitySample] {
        &self.samples
    }

    pub fn last_y(&self) -> f32 {
        self.last_y
    }

    pub fn last_sample_time(&self) -> u64 {
        self.last_sample_time
    }
}

/// Recency-weighted average of the samples within the recent window.
///
/// Sample `i` of the recent subset (0 = oldest) has weight `2^i`. Returns
/// `None` when no sample is recent enough.
pub fn weighted_recent_velocity(
    samples: &[VelocitySample],
    now_ms: u64,
    recent_window_ms: u64,
) -> Option<f32> {
    let mut weighted_sum = 0.0f32;
    let mut total_weight = 0.0f32;
    let mut weight = 1.0f32;

    for sample in samples
        .iter()
        .filter(|sample| now_ms.saturating_sub(sample.timestamp_ms) <= recent_window_ms)
    {
        weighted_sum += sample.velocity * weight;
        total_weight += weight;
        weight *= 2.0;
    }

    if total_weight == 0.0 {
        None
    } else {
        Some(weighted_sum / total_weight)
    }
}

/// Clamps a momentum seed to the configured bounds.
///
/// Seeds below `min_velocity` after clamping are a no-op release: `None`.
pub fn clamp_seed_velocity(seed: f32, config: &GestureConfig) -> Option<f32> {
    if !seed.is_finite() {
        return None;
    }
    let clamped = seed.clamp(-config.max_velocity, config.max_velocity);
    if clamped.abs() < config.min_velocity {
        None
    } else {
        Some(clamped)
    }
}

/// Estimates the momentum seed (px/frame) at release time `now_ms`.
pub fn estimate_release_velocity(
    samples: &[VelocitySample],
    now_ms: u64,
    config: &GestureConfig,
) -> Option<f32> {
    let average = weighted_recent_velocity(samples, now_ms, config.recent_window_ms)?;
    let seed = clamp_seed_velocity(average * config.velocity_multiplier, config);
    log::debug!(
        "release velocity: average {:.3}px/tick -> seed {:?}",
        average,
        seed
    );
    seed
}

#[cfg(test)]
#[path = "tests/velocity_tracker_tests.rs"]
mod tests;
