//! Shared gesture flags for one touch target.
//!
//! The drag classifier and the long-press detector run independently but
//! must agree on two facts: whether the touch has become a drag, and whether
//! a long press already fired. They share one `Rc<GestureSession>` instead of
//! reaching for process-wide flags.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct GestureSession {
    active: Cell<bool>,
    dragging: Cell<bool>,
    long_press_active: Cell<bool>,
}

impl GestureSession {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Clears all flags and marks a touch as in progress.
    pub fn begin(&self) {
        self.active.set(true);
        self.dragging.set(false);
        self.long_press_active.set(false);
    }

    /// Marks the touch as finished. Flags stay readable until the next `begin`.
    pub fn end(&self) {
        self.active.set(false);
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging.get()
    }

    /// One-way: a session never goes back from drag to tap.
    ///
    /// Returns true only for the call that performed the transition.
    pub fn mark_dragging(&self) -> bool {
        !self.dragging.replace(true)
    }

    pub fn is_long_press_active(&self) -> bool {
        self.long_press_active.get()
    }

    pub fn mark_long_press(&self) {
        self.long_press_active.set(true);
    }
}
