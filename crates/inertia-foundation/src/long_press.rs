//! Long-press detection on list items.

use std::rc::Rc;

use crate::config::GestureConfig;
use crate::gesture_session::GestureSession;
use crate::touch::{ItemId, TouchPoint};

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingPress {
    item: ItemId,
    origin: TouchPoint,
    deadline_ms: u64,
}

/// Fires once per touch when a press on an item is held still long enough.
///
/// Movement past the drag threshold, or the shared session turning into a
/// drag, disarms the pending press.
#[derive(Debug)]
pub struct LongPressDetector {
    session: Rc<GestureSession>,
    delay_ms: u64,
    slop: f32,
    pending: Option<PendingPress>,
}

impl LongPressDetector {
    pub fn new(session: Rc<GestureSession>, config: &GestureConfig) -> Self {
        Self {
            session,
            delay_ms: config.long_press_ms,
            slop: config.drag_threshold,
            pending: None,
        }
    }

    /// Arms a press; touches that did not start on an item never long-press.
    pub fn arm(&mut self, target: Option<ItemId>, origin: TouchPoint, uptime_ms: u64) {
        self.pending = target.map(|item| PendingPress {
            item,
            origin,
            deadline_ms: uptime_ms.saturating_add(self.delay_ms),
        });
    }

    pub fn on_move(&mut self, position: TouchPoint) {
        let Some(pending) = self.pending else {
            return;
        };
        let moved_x = (position.x - pending.origin.x).abs();
        let moved_y = (position.y - pending.origin.y).abs();
        if moved_x > self.slop || moved_y > self.slop {
            log::trace!("long press on item {} disarmed by movement", pending.item);
            self.pending = None;
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some() && !self.session.is_dragging()
    }

    pub fn deadline(&self) -> Option<u64> {
        self.pending.map(|pending| pending.deadline_ms)
    }

    /// Returns the item once the deadline has passed. Later polls return `None`.
    pub fn poll(&mut self, now_ms: u64) -> Option<ItemId> {
        if self.session.is_dragging() {
            self.pending = None;
            return None;
        }
        let pending = self.pending?;
        if now_ms < pending.deadline_ms {
            return None;
        }
        self.pending = None;
        self.session.mark_long_press();
        log::debug!("long press on item {}", pending.item);
        Some(pending.item)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
