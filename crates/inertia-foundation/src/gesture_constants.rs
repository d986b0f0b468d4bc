//! Shared gesture constants for touch handling on scrollable lists.
//!
//! All distances are in logical pixels, all durations in milliseconds.
//! These are the defaults behind [`GestureConfig`](crate::GestureConfig);
//! every one of them can be overridden per controller.

/// Displacement on either axis after which a touch becomes a drag.
///
/// The same threshold cancels a pending long press, so a touch can never be
/// both scrolling and about to open a context action.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// A touch released sooner than this (and never dragged) is a tap.
pub const TAP_TIMEOUT_MS: u64 = 200;

/// Hold duration that turns a stationary touch into a long press.
pub const LONG_PRESS_MS: u64 = 1_300;

/// Window after a drag during which the host's synthetic click is ignored.
pub const CLICK_SUPPRESS_MS: u64 = 300;

/// Minimum spacing between two velocity sampling ticks.
pub const SAMPLE_INTERVAL_MS: u64 = 16;

/// Per-tick movement at or below this is jitter and is not recorded.
pub const JITTER_THRESHOLD: f32 = 0.3;

/// Capacity of the velocity sample buffer.
pub const MAX_VELOCITY_SAMPLES: usize = 7;

/// Only samples this recent at release take part in the estimate.
pub const RECENT_SAMPLE_WINDOW_MS: u64 = 80;

/// Converts a raw per-tick pixel delta into a momentum seed.
pub const VELOCITY_MULTIPLIER: f32 = 0.9;

/// Seeds are clamped to `[-MAX_MOMENTUM_VELOCITY, MAX_MOMENTUM_VELOCITY]` px/frame.
pub const MAX_MOMENTUM_VELOCITY: f32 = 20.0;

/// Seeds smaller than this never start momentum.
pub const MIN_MOMENTUM_VELOCITY: f32 = 0.6;

/// Haptic pulse when a touch turns into a drag.
pub const DRAG_HAPTIC_MS: u32 = 10;

/// Haptic pulse when a long press fires.
pub const LONG_PRESS_HAPTIC_MS: u32 = 50;
