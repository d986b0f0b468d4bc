//! Tap versus drag classification for a single touch.

use std::rc::Rc;

use crate::config::GestureConfig;
use crate::gesture_session::GestureSession;
use crate::touch::{ItemId, TouchPoint};

/// How a finished touch should be handled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchRelease {
    /// Quick, stationary touch on an item: select it.
    Tap(ItemId),
    /// The touch scrolled; hand the release to the momentum estimator.
    Drag,
    /// A long press already handled this touch.
    LongPressed,
    /// Slow press, press on empty space, or a cancelled touch.
    Ignored,
}

#[derive(Debug)]
pub struct TapDragClassifier {
    session: Rc<GestureSession>,
    drag_threshold: f32,
    tap_timeout_ms: u64,
    start: TouchPoint,
    start_time: u64,
    target: Option<ItemId>,
}

impl TapDragClassifier {
    pub fn new(session: Rc<GestureSession>, config: &GestureConfig) -> Self {
        Self {
            session,
            drag_threshold: config.drag_threshold,
            tap_timeout_ms: config.tap_timeout_ms,
            start: TouchPoint::ZERO,
            start_time: 0,
            target: None,
        }
    }

    pub fn begin(&mut self, position: TouchPoint, uptime_ms: u64, target: Option<ItemId>) {
        self.start = position;
        self.start_time = uptime_ms;
        self.target = target;
    }

    /// Returns true exactly once: on the move that crosses the drag threshold.
    ///
    /// A touch that already fired its long press never becomes a drag.
    pub fn on_move(&mut self, position: TouchPoint) -> bool {
        if self.session.is_dragging() || self.session.is_long_press_active() {
            return false;
        }
        let delta_x = (position.x - self.start.x).abs();
        let delta_y = (position.y - self.start.y).abs();
        if delta_x > self.drag_threshold || delta_y > self.drag_threshold {
            log::debug!("touch became a drag (dx={delta_x:.1}, dy={delta_y:.1})");
            return self.session.mark_dragging();
        }
        false
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_dragging()
    }

    pub fn target(&self) -> Option<ItemId> {
        self.target
    }

    pub fn release(&self, uptime_ms: u64) -> TouchRelease {
        if self.session.is_long_press_active() {
            return TouchRelease::LongPressed;
        }
        if self.session.is_dragging() {
            return TouchRelease::Drag;
        }
        let elapsed = uptime_ms.saturating_sub(self.start_time);
        match self.target {
            Some(item) if elapsed < self.tap_timeout_ms => TouchRelease::Tap(item),
            _ => TouchRelease::Ignored,
        }
    }
}
