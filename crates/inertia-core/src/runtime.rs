use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

type FrameCallback = Box<dyn FnOnce(u64) + 'static>;

/// FIFO of one-shot frame callbacks keyed by id.
#[derive(Default)]
struct FrameQueue {
    entries: VecDeque<(FrameCallbackId, FrameCallback)>,
    next_id: FrameCallbackId,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameCallbackId {
        self.next_id += 1;
        let id = self.next_id;
        self.entries.push_back((id, callback));
        id
    }

    fn remove(&mut self, id: FrameCallbackId) -> bool {
        match self.entries.iter().position(|(queued, _)| *queued == id) {
            Some(index) => self.entries.remove(index).is_some(),
            None => false,
        }
    }

    fn take_all(&mut self) -> Vec<FrameCallback> {
        self.entries.drain(..).map(|(_, callback)| callback).collect()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    queue: RefCell<FrameQueue>,
    frames_drained: Cell<u64>,
}

impl RuntimeInner {
    fn request_frame(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn enqueue(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.queue.borrow_mut().push(callback);
        self.request_frame();
        id
    }

    fn dequeue(&self, id: FrameCallbackId) {
        // Never borrowed while callbacks run, so cancelling from inside a
        // frame callback is fine.
        let mut queue = self.queue.borrow_mut();
        if queue.remove(id) {
            log::trace!("frame callback {id} cancelled");
        }
        if queue.len() == 0 {
            self.needs_frame.set(false);
        }
    }

    fn run_frame(&self, frame_time_nanos: u64) {
        let due = self.queue.borrow_mut().take_all();
        self.frames_drained.set(self.frames_drained.get() + 1);
        for callback in due {
            callback(frame_time_nanos);
        }
        if self.pending() == 0 {
            self.needs_frame.set(false);
        }
    }
}

/// Owns the frame callback queue. Dropping the last `Runtime` turns every
/// outstanding [`RuntimeHandle`] inert.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                scheduler,
                needs_frame: Cell::new(false),
                queue: RefCell::new(FrameQueue::default()),
                frames_drained: Cell::new(0),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// True while at least one frame callback waits for the next frame.
    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

/// Scheduler for hosts that pump frames themselves, such as tests.
#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Weak reference to a [`Runtime`]; every call is a no-op once it is gone.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Queues `callback` for the next frame. `None` if the runtime is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let inner = self.inner.upgrade()?;
        Some(inner.enqueue(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.dequeue(id);
        }
    }

    /// Runs every callback queued before this call with `frame_time_nanos`.
    ///
    /// Callbacks registered while draining land in the next frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.run_frame(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.pending_frame_callbacks() > 0
    }

    pub fn pending_frame_callbacks(&self) -> usize {
        self.inner.upgrade().map_or(0, |inner| inner.pending())
    }

    /// Number of frames drained since the runtime was created.
    pub fn frames_drained(&self) -> u64 {
        self.inner
            .upgrade()
            .map_or(0, |inner| inner.frames_drained.get())
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}
