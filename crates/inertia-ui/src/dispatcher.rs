//! Touch event fan-out with explicit handler registration.
//!
//! Handlers are attached once and detached through the
//! [`HandlerRegistration`] returned by [`TouchDispatcher::register`].
//! Dropping the registration detaches the handler.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use inertia_foundation::TouchEvent;

type TouchHandler = Rc<dyn Fn(&TouchEvent)>;

struct DispatcherInner {
    handlers: RefCell<IndexMap<u64, TouchHandler>>,
    next_id: Cell<u64>,
}

/// Delivers touch events to registered handlers in registration order.
#[derive(Clone)]
pub struct TouchDispatcher {
    inner: Rc<DispatcherInner>,
}

impl TouchDispatcher {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(DispatcherInner {
                handlers: RefCell::new(IndexMap::new()),
                next_id: Cell::new(1),
            }),
        }
    }

    #[must_use = "dropping the registration detaches the handler immediately"]
    pub fn register(&self, handler: impl Fn(&TouchEvent) + 'static) -> HandlerRegistration {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .handlers
            .borrow_mut()
            .insert(id, Rc::new(handler));
        log::trace!("touch handler {id} registered");
        HandlerRegistration {
            dispatcher: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Sends `event` to every handler. Returns how many handlers ran.
    pub fn dispatch(&self, event: &TouchEvent) -> usize {
        // Snapshot: handlers may register or dispose while being called.
        let handlers: Vec<TouchHandler> = self.inner.handlers.borrow().values().cloned().collect();
        for handler in &handlers {
            handler(event);
        }
        handlers.len()
    }

    pub fn handler_count(&self) -> usize {
        self.inner.handlers.borrow().len()
    }
}

impl Default for TouchDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Disposer for a registered touch handler.
pub struct HandlerRegistration {
    dispatcher: Weak<DispatcherInner>,
    id: Option<u64>,
}

impl HandlerRegistration {
    pub fn is_active(&self) -> bool {
        self.id.is_some() && self.dispatcher.strong_count() > 0
    }

    pub fn dispose(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(dispatcher) = self.dispatcher.upgrade() {
            dispatcher.handlers.borrow_mut().shift_remove(&id);
            log::trace!("touch handler {id} disposed");
        }
    }
}

impl Drop for HandlerRegistration {
    fn drop(&mut self) {
        self.remove();
    }
}

impl std::fmt::Debug for HandlerRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistration")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
