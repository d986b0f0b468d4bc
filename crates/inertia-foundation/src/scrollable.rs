//! Scroll containers: the single mutable resource gestures write to.
//!
//! [`ScrollContainer`] is the seam between gesture code and whatever owns the
//! real viewport. [`ScrollState`] is the in-process implementation used by
//! hosts that draw the list themselves, and by tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SCROLL_STATE_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollError {
    /// The container is no longer part of the view tree.
    Detached,
    /// The requested offset was NaN or infinite.
    InvalidOffset(f32),
}

impl fmt::Display for ScrollError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollError::Detached => write!(f, "scroll container detached"),
            ScrollError::InvalidOffset(offset) => write!(f, "invalid scroll offset {offset}"),
        }
    }
}

impl std::error::Error for ScrollError {}

/// A viewport with a vertical scroll offset.
pub trait ScrollContainer {
    fn scroll_offset(&self) -> f32;

    /// Writes the offset and returns the value actually applied, which may be
    /// clamped by the container.
    fn set_scroll_offset(&self, offset: f32) -> Result<f32, ScrollError>;

    /// Adds `delta` to the offset.
    fn scroll_by(&self, delta: f32) -> Result<f32, ScrollError> {
        self.set_scroll_offset(self.scroll_offset() + delta)
    }
}

/// Scroll position of a vertical list, clamped to `[0, max_value]`.
#[derive(Clone)]
pub struct ScrollState {
    inner: Rc<ScrollStateInner>,
}

struct ScrollStateInner {
    id: u64,
    value: Cell<f32>,
    max_value: Cell<f32>,
    attached: Cell<bool>,
    /// Observers notified with the new offset after every change.
    listeners: RefCell<HashMap<u64, Rc<dyn Fn(f32)>>>,
}

impl ScrollState {
    pub fn new(initial: f32, max_value: f32) -> Self {
        let max_value = max_value.max(0.0);
        Self {
            inner: Rc::new(ScrollStateInner {
                id: NEXT_SCROLL_STATE_ID.fetch_add(1, Ordering::Relaxed),
                value: Cell::new(initial.clamp(0.0, max_value)),
                max_value: Cell::new(max_value),
                attached: Cell::new(true),
                listeners: RefCell::new(HashMap::new()),
            }),
        }
    }

    pub fn id(&self) -> u64 {
        self.inner.id
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    /// Updates the scroll range, e.g. after the list content changed size.
    pub fn set_max_value(&self, max: f32) {
        let max = max.max(0.0);
        self.inner.max_value.set(max);
        if self.value() > max {
            self.inner.value.set(max);
            self.notify(max);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// Marks the container as removed from the view tree; writes fail from now on.
    pub fn detach(&self) {
        self.inner.attached.set(false);
    }

    pub fn attach(&self) {
        self.inner.attached.set(true);
    }

    pub fn add_offset_listener(&self, listener: impl Fn(f32) + 'static) -> u64 {
        let id = NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .borrow_mut()
            .insert(id, Rc::new(listener));
        id
    }

    pub fn remove_offset_listener(&self, id: u64) {
        self.inner.listeners.borrow_mut().remove(&id);
    }

    fn notify(&self, value: f32) {
        // Snapshot so listeners may add or remove listeners.
        let listeners: Vec<Rc<dyn Fn(f32)>> =
            self.inner.listeners.borrow().values().cloned().collect();
        for listener in listeners {
            listener(value);
        }
    }
}

impl ScrollContainer for ScrollState {
    fn scroll_offset(&self) -> f32 {
        self.value()
    }

    fn set_scroll_offset(&self, offset: f32) -> Result<f32, ScrollError> {
        if !self.is_attached() {
            return Err(ScrollError::Detached);
        }
        if !offset.is_finite() {
            return Err(ScrollError::InvalidOffset(offset));
        }
        let clamped = offset.clamp(0.0, self.max_value());
        if (clamped - self.value()).abs() > 0.001 {
            self.inner.value.set(clamped);
            self.notify(clamped);
        }
        Ok(clamped)
    }
}

impl fmt::Debug for ScrollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollState")
            .field("id", &self.inner.id)
            .field("value", &self.value())
            .field("max_value", &self.max_value())
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/scrollable_tests.rs"]
mod tests;
