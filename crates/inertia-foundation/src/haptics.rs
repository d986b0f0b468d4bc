//! Optional haptic feedback.
//!
//! Haptics are cosmetic: a failing or missing implementation never changes
//! gesture behavior.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HapticError {
    Unsupported,
    Platform(String),
}

impl fmt::Display for HapticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HapticError::Unsupported => write!(f, "haptic feedback unsupported"),
            HapticError::Platform(reason) => write!(f, "haptic feedback failed: {reason}"),
        }
    }
}

impl std::error::Error for HapticError {}

pub trait HapticFeedback {
    fn vibrate(&self, duration_ms: u32) -> Result<(), HapticError>;
}

/// Haptics for hosts without a vibration motor.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticFeedback for NoHaptics {
    fn vibrate(&self, _duration_ms: u32) -> Result<(), HapticError> {
        Err(HapticError::Unsupported)
    }
}

/// Best-effort pulse; errors are dropped.
pub fn pulse(haptics: &dyn HapticFeedback, duration_ms: u32) {
    if let Err(err) = haptics.vibrate(duration_ms) {
        log::trace!("ignoring haptic failure: {err}");
    }
}
