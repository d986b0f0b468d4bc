//! Momentum scrolling for one scrollable list.
//!
//! `MomentumScrollController` turns raw touch events into item selection,
//! long-press actions, drag scrolling and post-release momentum on a single
//! [`ScrollContainer`]. Collaborators are injected at construction.
//!
//! Lifecycle of a touch:
//! - start: any running momentum is cancelled, a [`TouchSession`] begins and
//!   a long-press poll is scheduled when the touch landed on an item;
//! - move: the session classifies and samples; drags scroll the container;
//! - end: taps select, drags arm the click guard and may start momentum;
//! - cancel: the session is dropped with no tap and no momentum.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use inertia_animation::{MomentumAnimation, MomentumDecaySpec, MomentumEnd, MomentumPhase};
use inertia_core::{FrameCallbackRegistration, RuntimeHandle};
use inertia_foundation::{
    pulse, ClickGuard, GestureConfig, GestureSession, HapticFeedback, ItemId, NoHaptics,
    ScrollContainer, SessionEnd, TouchEvent, TouchPhase, TouchPoint, TouchRelease, TouchSession,
};

use crate::dispatcher::{HandlerRegistration, TouchDispatcher};

/// Tuning for a [`MomentumScrollController`].
#[derive(Debug, Clone, PartialEq)]
pub struct MomentumScrollConfig {
    pub gesture: GestureConfig,
    pub decay: MomentumDecaySpec,
    /// Apply finger movement to the container while dragging. Hosts whose
    /// platform already scrolls natively during a drag turn this off.
    pub drag_scroll: bool,
}

impl Default for MomentumScrollConfig {
    fn default() -> Self {
        let gesture = GestureConfig::default();
        let decay = MomentumDecaySpec::default().with_min_velocity(gesture.min_velocity);
        Self {
            gesture,
            decay,
            drag_scroll: true,
        }
    }
}

impl MomentumScrollConfig {
    /// Replaces the gesture tuning; the momentum stop threshold follows its
    /// `min_velocity`.
    pub fn with_gesture(mut self, gesture: GestureConfig) -> Self {
        self.decay = self.decay.with_min_velocity(gesture.min_velocity);
        self.gesture = gesture;
        self
    }

    pub fn with_decay(mut self, decay: MomentumDecaySpec) -> Self {
        self.decay = decay;
        self
    }

    pub fn with_drag_scroll(mut self, enabled: bool) -> Self {
        self.drag_scroll = enabled;
        self
    }
}

/// Collaborators a controller calls back into.
#[derive(Clone)]
pub struct ScrollCallbacks {
    on_select: Option<Rc<dyn Fn(ItemId)>>,
    on_long_press: Option<Rc<dyn Fn(ItemId)>>,
    haptics: Rc<dyn HapticFeedback>,
}

impl ScrollCallbacks {
    pub fn new() -> Self {
        Self {
            on_select: None,
            on_long_press: None,
            haptics: Rc::new(NoHaptics),
        }
    }

    pub fn on_select(mut self, callback: impl Fn(ItemId) + 'static) -> Self {
        self.on_select = Some(Rc::new(callback));
        self
    }

    pub fn on_long_press(mut self, callback: impl Fn(ItemId) + 'static) -> Self {
        self.on_long_press = Some(Rc::new(callback));
        self
    }

    pub fn haptics(mut self, haptics: Rc<dyn HapticFeedback>) -> Self {
        self.haptics = haptics;
        self
    }
}

impl Default for ScrollCallbacks {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScrollCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollCallbacks")
            .field("on_select", &self.on_select.is_some())
            .field("on_long_press", &self.on_long_press.is_some())
            .finish()
    }
}

struct ControllerInner {
    runtime: RuntimeHandle,
    container: Rc<dyn ScrollContainer>,
    callbacks: ScrollCallbacks,
    config: MomentumScrollConfig,
    gesture: Rc<GestureSession>,
    session: RefCell<Option<TouchSession>>,
    momentum: MomentumAnimation,
    click_guard: Cell<ClickGuard>,
    long_press_poll: RefCell<Option<FrameCallbackRegistration>>,
    attachment: RefCell<Option<HandlerRegistration>>,
    last_release: Cell<Option<TouchRelease>>,
}

impl ControllerInner {
    fn pulse(&self, duration_ms: u32) {
        if self.config.gesture.haptics_enabled {
            pulse(self.callbacks.haptics.as_ref(), duration_ms);
        }
    }

    fn cancel_long_press_poll(&self) {
        let registration = self.long_press_poll.borrow_mut().take();
        drop(registration);
    }

    fn take_session(&self) -> Option<TouchSession> {
        self.session.borrow_mut().take()
    }
}

impl Drop for ControllerInner {
    fn drop(&mut self) {
        // The queued momentum frame does not own the controller.
        self.momentum.cancel();
    }
}

/// Polls the long-press deadline once per frame while a press is pending.
fn schedule_long_press_poll(inner: &Rc<ControllerInner>) {
    let pending = inner
        .session
        .borrow()
        .as_ref()
        .and_then(|session| session.long_press_deadline())
        .is_some();
    if !pending {
        inner.cancel_long_press_poll();
        return;
    }

    let weak: Weak<ControllerInner> = Rc::downgrade(inner);
    let registration = inner
        .runtime
        .frame_clock()
        .with_frame_millis(move |now_ms| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let fired = inner
                .session
                .borrow_mut()
                .as_mut()
                .and_then(|session| session.poll_long_press(now_ms));
            match fired {
                Some(item) => {
                    inner.cancel_long_press_poll();
                    inner.pulse(inner.config.gesture.long_press_haptic_ms);
                    if let Some(on_long_press) = inner.callbacks.on_long_press.clone() {
                        on_long_press(item);
                    }
                }
                None => schedule_long_press_poll(&inner),
            }
        });
    *inner.long_press_poll.borrow_mut() = Some(registration);
}

/// Touch-driven scrolling with momentum for one container.
///
/// Clones share state. All methods must be called on the UI thread.
#[derive(Clone)]
pub struct MomentumScrollController {
    inner: Rc<ControllerInner>,
}

impl MomentumScrollController {
    pub fn new(
        runtime: RuntimeHandle,
        container: Rc<dyn ScrollContainer>,
        callbacks: ScrollCallbacks,
        config: MomentumScrollConfig,
    ) -> Self {
        let momentum = MomentumAnimation::with_spec(runtime.clone(), config.decay);
        let click_guard = ClickGuard::new(config.gesture.click_suppress_ms);
        Self {
            inner: Rc::new(ControllerInner {
                runtime,
                container,
                callbacks,
                config,
                gesture: GestureSession::new(),
                session: RefCell::new(None),
                momentum,
                click_guard: Cell::new(click_guard),
                long_press_poll: RefCell::new(None),
                attachment: RefCell::new(None),
                last_release: Cell::new(None),
            }),
        }
    }

    pub fn config(&self) -> &MomentumScrollConfig {
        &self.inner.config
    }

    /// Shared gesture flags, for handlers that need to coordinate with this list.
    pub fn gesture_session(&self) -> Rc<GestureSession> {
        Rc::clone(&self.inner.gesture)
    }

    /// Routes touch events from `dispatcher` to this controller.
    ///
    /// A controller is attached to at most one dispatcher; attaching again
    /// disposes the previous registration first.
    pub fn attach(&self, dispatcher: &TouchDispatcher) {
        self.detach();
        let weak = Rc::downgrade(&self.inner);
        let registration = dispatcher.register(move |event| {
            if let Some(inner) = weak.upgrade() {
                MomentumScrollController { inner }.handle(event);
            }
        });
        *self.inner.attachment.borrow_mut() = Some(registration);
    }

    pub fn detach(&self) {
        let previous = self.inner.attachment.borrow_mut().take();
        if let Some(registration) = previous {
            registration.dispose();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.inner
            .attachment
            .borrow()
            .as_ref()
            .is_some_and(|registration| registration.is_active())
    }

    pub fn handle(&self, event: &TouchEvent) {
        match event.phase {
            TouchPhase::Start => self.on_touch_start(event.position, event.uptime_ms, event.target),
            TouchPhase::Move => self.on_touch_move(event.position, event.uptime_ms),
            TouchPhase::End => {
                self.on_touch_end(event.uptime_ms);
            }
            TouchPhase::Cancel => self.on_touch_cancel(),
        }
    }

    pub fn on_touch_start(&self, position: TouchPoint, uptime_ms: u64, target: Option<ItemId>) {
        let inner = &self.inner;
        if inner.momentum.is_running() {
            log::debug!("touch start interrupts momentum");
        }
        inner.momentum.cancel();
        inner.cancel_long_press_poll();
        if let Some(stale) = inner.take_session() {
            stale.cancel();
        }

        let session = TouchSession::begin(
            Rc::clone(&inner.gesture),
            &inner.config.gesture,
            position,
            uptime_ms,
            target,
        );
        *inner.session.borrow_mut() = Some(session);
        schedule_long_press_poll(inner);
    }

    pub fn on_touch_move(&self, position: TouchPoint, uptime_ms: u64) {
        let inner = &self.inner;
        let outcome = match inner.session.borrow_mut().as_mut() {
            Some(session) => session.on_move(position, uptime_ms),
            None => return,
        };

        if outcome.drag_started {
            inner.cancel_long_press_poll();
            inner.pulse(inner.config.gesture.drag_haptic_ms);
        }
        if !inner.config.drag_scroll {
            return;
        }
        if let Some(delta) = outcome.drag_delta {
            if let Err(err) = inner.container.scroll_by(-delta) {
                log::warn!("drag scroll failed: {err}");
            }
        }
    }

    /// Ends the current touch and returns how it was classified.
    pub fn on_touch_end(&self, uptime_ms: u64) -> TouchRelease {
        let inner = &self.inner;
        inner.cancel_long_press_poll();
        let Some(session) = inner.take_session() else {
            return TouchRelease::Ignored;
        };
        let SessionEnd {
            release,
            seed_velocity,
        } = session.finish(uptime_ms);
        inner.last_release.set(Some(release));

        match release {
            TouchRelease::Tap(item) => {
                log::debug!("tap on item {item}");
                if let Some(on_select) = inner.callbacks.on_select.clone() {
                    on_select(item);
                }
            }
            TouchRelease::Drag => {
                let mut guard = inner.click_guard.get();
                guard.arm(uptime_ms);
                inner.click_guard.set(guard);
                if let Some(velocity) = seed_velocity {
                    self.start_momentum(velocity);
                }
            }
            TouchRelease::LongPressed | TouchRelease::Ignored => {}
        }
        release
    }

    pub fn on_touch_cancel(&self) {
        let inner = &self.inner;
        inner.cancel_long_press_poll();
        if let Some(session) = inner.take_session() {
            log::debug!("touch cancelled");
            session.cancel();
        }
    }

    /// Starts momentum at `velocity` px/frame, replacing any run in flight.
    pub fn start_momentum(&self, velocity: f32) -> bool {
        let container = Rc::clone(&self.inner.container);
        self.inner.momentum.start(
            velocity,
            move |delta| container.scroll_by(delta).map(|_| ()),
            |end| match end {
                MomentumEnd::Settled => log::trace!("momentum settled"),
                MomentumEnd::Failed => log::debug!("momentum ended early"),
            },
        )
    }

    pub fn cancel_momentum(&self) {
        self.inner.momentum.cancel();
    }

    /// True while the host's synthetic click after a drag should be ignored.
    pub fn should_suppress_click(&self, now_ms: u64) -> bool {
        self.inner.click_guard.get().should_suppress(now_ms)
    }

    pub fn is_touch_active(&self) -> bool {
        self.inner.session.borrow().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner
            .session
            .borrow()
            .as_ref()
            .is_some_and(|session| session.is_dragging())
    }

    /// Sample count of the touch in progress.
    pub fn sample_count(&self) -> usize {
        self.inner
            .session
            .borrow()
            .as_ref()
            .map(|session| session.samples().len())
            .unwrap_or(0)
    }

    pub fn last_release(&self) -> Option<TouchRelease> {
        self.inner.last_release.get()
    }

    pub fn momentum_phase(&self) -> MomentumPhase {
        self.inner.momentum.phase()
    }

    pub fn is_momentum_running(&self) -> bool {
        self.inner.momentum.is_running()
    }

    pub fn momentum_velocity(&self) -> f32 {
        self.inner.momentum.velocity()
    }

    pub fn scroll_offset(&self) -> f32 {
        self.inner.container.scroll_offset()
    }
}

impl fmt::Debug for MomentumScrollController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MomentumScrollController")
            .field("offset", &self.scroll_offset())
            .field("touch_active", &self.is_touch_active())
            .field("momentum", &self.momentum_phase())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/momentum_scroll_tests.rs"]
mod tests;
