//! Per-touch state from touch-start to touch-end.
//!
//! A `TouchSession` bundles the classifier, the velocity sampler and the
//! long-press detector for one touch and turns raw positions into outcomes.
//! It performs no side effects: selecting items, vibrating and scrolling are
//! left to the caller.

use std::rc::Rc;

use crate::config::GestureConfig;
use crate::gesture_session::GestureSession;
use crate::long_press::LongPressDetector;
use crate::tap_drag::{TapDragClassifier, TouchRelease};
use crate::touch::{ItemId, TouchPoint};
use crate::velocity_tracker::{estimate_release_velocity, VelocitySample, VelocitySampler};

/// What a single move did to the session.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveOutcome {
    /// This move crossed the drag threshold.
    pub drag_started: bool,
    /// Vertical finger movement since the previous move, reported only while
    /// dragging. Positive means the finger moved down.
    pub drag_delta: Option<f32>,
    pub sample: Option<VelocitySample>,
}

/// Result of ending a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionEnd {
    pub release: TouchRelease,
    /// Momentum seed in px/frame; only for drags fast enough to coast.
    pub seed_velocity: Option<f32>,
}

#[derive(Debug)]
pub struct TouchSession {
    gesture: Rc<GestureSession>,
    classifier: TapDragClassifier,
    sampler: VelocitySampler,
    long_press: LongPressDetector,
    config: GestureConfig,
    last_position: TouchPoint,
}

impl TouchSession {
    pub fn begin(
        gesture: Rc<GestureSession>,
        config: &GestureConfig,
        position: TouchPoint,
        uptime_ms: u64,
        target: Option<ItemId>,
    ) -> Self {
        gesture.begin();
        let mut classifier = TapDragClassifier::new(Rc::clone(&gesture), config);
        classifier.begin(position, uptime_ms, target);
        let mut sampler = VelocitySampler::new(config);
        sampler.reset(position.y, uptime_ms);
        let mut long_press = LongPressDetector::new(Rc::clone(&gesture), config);
        long_press.arm(target, position, uptime_ms);
        Self {
            gesture,
            classifier,
            sampler,
            long_press,
            config: config.clone(),
            last_position: position,
        }
    }

    pub fn on_move(&mut self, position: TouchPoint, uptime_ms: u64) -> MoveOutcome {
        let was_dragging = self.classifier.is_dragging();
        let drag_started = self.classifier.on_move(position);
        self.long_press.on_move(position);
        if drag_started {
            self.long_press.cancel();
        }

        let drag_delta = if was_dragging || drag_started {
            Some(position.y - self.last_position.y)
        } else {
            None
        };
        let sample = self.sampler.on_move(position.y, uptime_ms);

        self.last_position = position;
        MoveOutcome {
            drag_started,
            drag_delta,
            sample,
        }
    }

    /// Checks the long-press deadline against `now_ms`.
    pub fn poll_long_press(&mut self, now_ms: u64) -> Option<ItemId> {
        self.long_press.poll(now_ms)
    }

    pub fn long_press_deadline(&self) -> Option<u64> {
        if self.long_press.is_pending() {
            self.long_press.deadline()
        } else {
            None
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.classifier.is_dragging()
    }

    pub fn target(&self) -> Option<ItemId> {
        self.classifier.target()
    }

    pub fn samples(&self) -> &[VelocitySample] {
        self.sampler.samples()
    }

    /// Ends the touch at `uptime_ms` and classifies it.
    pub fn finish(mut self, uptime_ms: u64) -> SessionEnd {
        self.long_press.cancel();
        let release = self.classifier.release(uptime_ms);
        let seed_velocity = match release {
            TouchRelease::Drag => {
                estimate_release_velocity(self.sampler.samples(), uptime_ms, &self.config)
            }
            _ => None,
        };
        self.gesture.end();
        SessionEnd {
            release,
            seed_velocity,
        }
    }

    /// Abandons the touch: no tap, no momentum.
    pub fn cancel(mut self) {
        self.long_press.cancel();
        self.gesture.end();
    }
}

#[cfg(test)]
#[path = "tests/touch_session_tests.rs"]
mod tests;
