//! Touch gesture primitives for Inertia.
//!
//! Everything here is pure state: sampling, classification and the scroll
//! container seam. Frame scheduling and side effects live in `inertia-ui`.

pub mod click_guard;
pub mod config;
pub mod gesture_constants;
pub mod gesture_session;
pub mod haptics;
pub mod long_press;
pub mod scrollable;
pub mod tap_drag;
pub mod touch;
pub mod touch_session;
pub mod velocity_tracker;

pub use click_guard::ClickGuard;
pub use config::GestureConfig;
pub use gesture_session::GestureSession;
pub use haptics::{pulse, HapticError, HapticFeedback, NoHaptics};
pub use long_press::LongPressDetector;
pub use scrollable::{ScrollContainer, ScrollError, ScrollState};
pub use tap_drag::{TapDragClassifier, TouchRelease};
pub use touch::{ItemId, TouchEvent, TouchPhase, TouchPoint};
pub use touch_session::{MoveOutcome, SessionEnd, TouchSession};
pub use velocity_tracker::{
    clamp_seed_velocity, estimate_release_velocity, weighted_recent_velocity, VelocitySample,
    VelocitySampler,
};

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
