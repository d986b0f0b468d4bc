//! `std`-backed scheduling and time for Inertia hosts.
//!
//! A host builds one [`StdRuntime`], stamps touch events with
//! [`StdRuntime::uptime_millis`] and drains a frame whenever its display
//! loop ticks. Hosts without a display loop can let [`StdRuntime::pace`]
//! sleep between frames instead.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::thread;
use std::time::Duration;

use inertia_core::{Clock, FrameClock, Runtime, RuntimeHandle, RuntimeScheduler, NANOS_PER_MILLI};
use web_time::Instant;

type FrameWaker = Arc<dyn Fn() + Send + Sync + 'static>;

/// Remembers that a frame was asked for and pokes the host's waker.
pub struct StdScheduler {
    requested: AtomicBool,
    waker: RwLock<Option<FrameWaker>>,
}

impl StdScheduler {
    pub fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
            waker: RwLock::new(None),
        }
    }

    /// Clears and returns the pending frame request.
    pub fn take_frame_request(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        match self.waker.write() {
            Ok(mut slot) => *slot = Some(Arc::new(waker)),
            Err(_) => log::warn!("frame waker lock poisoned; waker not installed"),
        }
    }

    pub fn clear_frame_waker(&self) {
        if let Ok(mut slot) = self.waker.write() {
            slot.take();
        }
    }
}

impl Default for StdScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StdScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdScheduler")
            .field("requested", &self.requested.load(Ordering::Acquire))
            .finish()
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::Release);
        // Clone out of the lock so the waker may reinstall itself.
        let waker = self.waker.read().ok().and_then(|slot| slot.clone());
        if let Some(waker) = waker {
            waker();
        }
    }
}

/// Monotonic clock on [`web_time::Instant`], which also works on wasm.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed_millis(&self, since: Instant) -> u64 {
        since.elapsed().as_millis() as u64
    }
}

/// Runtime, scheduler and clock bundled for a `std` host.
///
/// Event uptimes and frame times share one epoch: the instant the runtime
/// was created.
#[derive(Clone)]
pub struct StdRuntime {
    runtime: Runtime,
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    epoch: Instant,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::new());
        let clock = StdClock;
        Self {
            runtime: Runtime::new(scheduler.clone()),
            scheduler,
            epoch: clock.now(),
            clock,
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn frame_clock(&self) -> FrameClock {
        self.runtime.frame_clock()
    }

    /// Milliseconds since the runtime was created; use as touch event uptime.
    pub fn uptime_millis(&self) -> u64 {
        self.clock.elapsed_millis(self.epoch)
    }

    fn uptime_nanos(&self) -> u64 {
        self.epoch.elapsed().as_nanos() as u64
    }

    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    /// Called whenever the runtime wants a frame, possibly from the UI thread
    /// while it is handling an event.
    pub fn set_frame_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        self.scheduler.set_frame_waker(waker);
    }

    pub fn clear_frame_waker(&self) {
        self.scheduler.clear_frame_waker();
    }

    /// Drains one frame stamped `frame_time_nanos` after the epoch.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.runtime.handle().drain_frame_callbacks(frame_time_nanos);
    }

    /// Drains one frame stamped with the current uptime.
    pub fn drain_frame_now(&self) {
        self.drain_frame_callbacks(self.uptime_nanos());
    }

    /// Sleeps `interval` and drains a frame, for as long as callbacks are
    /// queued, at most `max_frames` times. Returns the number of frames run.
    pub fn pace(&self, interval: Duration, max_frames: u32) -> u32 {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() && frames < max_frames {
            thread::sleep(interval);
            self.scheduler.take_frame_request();
            self.drain_frame_now();
            frames += 1;
        }
        if frames > 0 {
            log::trace!(
                "paced {frames} frames, now at {}ms",
                self.uptime_nanos() / NANOS_PER_MILLI
            );
        }
        frames
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("uptime_ms", &self.uptime_millis())
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
