//! Robot-style driver for scripted touch gestures.
//!
//! [`TouchRobot`] owns a headless runtime, a virtual millisecond clock and a
//! [`TouchDispatcher`]. Advancing the clock drains one frame every
//! [`FRAME_INTERVAL_MS`], so momentum and long-press polling run exactly as
//! they would against a 60 Hz display.
//!
//! # Example
//!
//! ```
//! use inertia_testing::TouchRobot;
//!
//! let mut robot = TouchRobot::new();
//! robot.touch_start(10.0, 400.0, None);
//! robot.advance(16);
//! robot.touch_move(10.0, 380.0);
//! robot.touch_end();
//! robot.settle(600);
//! ```

use std::sync::Arc;

use inertia_core::{DefaultScheduler, Runtime, RuntimeHandle, NANOS_PER_MILLI};
use inertia_foundation::{ItemId, TouchEvent, TouchPoint};
use inertia_ui::TouchDispatcher;

/// Frame spacing of the virtual display.
pub const FRAME_INTERVAL_MS: u64 = 16;

pub struct TouchRobot {
    runtime: Runtime,
    dispatcher: TouchDispatcher,
    now_ms: u64,
    last_frame_ms: u64,
    pointer: TouchPoint,
}

impl TouchRobot {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Starts the virtual clock at `uptime_ms`.
    pub fn starting_at(uptime_ms: u64) -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
            dispatcher: TouchDispatcher::new(),
            now_ms: uptime_ms,
            last_frame_ms: uptime_ms,
            pointer: TouchPoint::ZERO,
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn dispatcher(&self) -> &TouchDispatcher {
        &self.dispatcher
    }

    /// Current virtual uptime in milliseconds.
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    pub fn pointer(&self) -> TouchPoint {
        self.pointer
    }

    /// Moves the clock forward by `ms`, draining every frame that falls due.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);
        loop {
            let next_frame = self.last_frame_ms + FRAME_INTERVAL_MS;
            if next_frame > target {
                break;
            }
            self.now_ms = next_frame;
            self.drain_at(next_frame);
        }
        self.now_ms = target;
    }

    /// Advances to the next frame boundary and drains it.
    pub fn frame(&mut self) {
        let next_frame = self.last_frame_ms + FRAME_INTERVAL_MS;
        let wait = next_frame.saturating_sub(self.now_ms);
        self.advance(wait.max(1));
    }

    pub fn run_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    /// Runs frames until no callback is queued, up to `max_frames`.
    ///
    /// Returns the number of frames run.
    pub fn settle(&mut self, max_frames: usize) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() && frames < max_frames {
            self.frame();
            frames += 1;
        }
        if handle.has_frame_callbacks() {
            log::warn!("robot gave up settling after {frames} frames");
        }
        frames
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.handle().has_frame_callbacks()
    }

    pub fn dispatch(&self, event: TouchEvent) -> usize {
        self.dispatcher.dispatch(&event)
    }

    pub fn touch_start(&mut self, x: f32, y: f32, target: Option<ItemId>) {
        self.pointer = TouchPoint::new(x, y);
        let mut event = TouchEvent::start(x, y, self.now_ms);
        if let Some(item) = target {
            event = event.on_item(item);
        }
        self.dispatch(event);
    }

    pub fn touch_move(&mut self, x: f32, y: f32) {
        self.pointer = TouchPoint::new(x, y);
        self.dispatch(TouchEvent::moved(x, y, self.now_ms));
    }

    pub fn touch_end(&mut self) {
        let TouchPoint { x, y } = self.pointer;
        self.dispatch(TouchEvent::end(x, y, self.now_ms));
    }

    pub fn touch_cancel(&mut self) {
        let TouchPoint { x, y } = self.pointer;
        self.dispatch(TouchEvent::cancel(x, y, self.now_ms));
    }

    /// Vertical swipe from `from_y` to `to_y` in `steps` equal moves,
    /// `step_ms` apart, released right after the last move.
    pub fn swipe(&mut self, x: f32, from_y: f32, to_y: f32, steps: u32, step_ms: u64) {
        self.touch_start(x, from_y, None);
        let steps = steps.max(1);
        let step = (to_y - from_y) / steps as f32;
        for i in 1..=steps {
            self.advance(step_ms);
            self.touch_move(x, from_y + step * i as f32);
        }
        self.touch_end();
    }

    /// Press and release on `item` after `hold_ms` without moving.
    pub fn tap(&mut self, x: f32, y: f32, item: ItemId, hold_ms: u64) {
        self.touch_start(x, y, Some(item));
        self.advance(hold_ms);
        self.touch_end();
    }

    fn drain_at(&mut self, frame_ms: u64) {
        self.last_frame_ms = frame_ms;
        self.runtime
            .handle()
            .drain_frame_callbacks(frame_ms * NANOS_PER_MILLI);
    }
}

impl Default for TouchRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TouchRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchRobot")
            .field("now_ms", &self.now_ms)
            .field("pointer", &self.pointer)
            .field("handlers", &self.dispatcher.handler_count())
            .finish()
    }
}
