//! Testing utilities and harness for Inertia

pub mod recorders;
pub mod robot;

pub use recorders::{OffsetTrace, RecordingHaptics, RecordingSelection};
pub use robot::{TouchRobot, FRAME_INTERVAL_MS};

pub mod prelude {
    pub use crate::recorders::*;
    pub use crate::robot::*;
}
