//! Momentum animation driver for scroll containers.
//!
//! Drives the per-frame decay from [`MomentumDecaySpec`] on the runtime's
//! frame clock. Each frame hands the offset DELTA (the negated velocity) to
//! a callback owned by the caller.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use inertia_core::{FrameCallbackRegistration, FrameClock, RuntimeHandle};

use crate::decay_spec::MomentumDecaySpec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumPhase {
    Idle,
    Running,
}

/// Why a momentum run ended. Cancelled runs report nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MomentumEnd {
    /// Velocity fell below the minimum.
    Settled,
    /// Applying a frame's delta failed; the run was dropped without retry.
    Failed,
}

enum FrameOutcome {
    Continue,
    Finished(MomentumEnd),
    Abandoned,
}

/// State for an active momentum run.
struct MomentumState {
    generation: u64,
    /// Current velocity in px/frame.
    velocity: Cell<f32>,
    /// Frames applied so far in this run.
    frames: Cell<u32>,
    is_running: Cell<bool>,
    /// Pending frame callback; dropping it cancels the next frame.
    registration: Option<FrameCallbackRegistration>,
}

type SharedState = Rc<RefCell<Option<MomentumState>>>;

fn is_current(state: &SharedState, generation: u64) -> bool {
    state
        .borrow()
        .as_ref()
        .is_some_and(|anim| anim.generation == generation && anim.is_running.get())
}

/// Schedules the next momentum frame. Called again from inside the frame
/// callback until the run settles, fails, or is cancelled.
fn schedule_next_frame<F, G, E>(
    state: SharedState,
    frame_clock: FrameClock,
    spec: MomentumDecaySpec,
    generation: u64,
    on_scroll: F,
    on_end: G,
) where
    F: Fn(f32) -> Result<(), E> + 'static,
    E: fmt::Display,
    G: FnOnce(MomentumEnd) + 'static,
{
    let state_for_closure = Rc::clone(&state);
    let frame_clock_for_closure = frame_clock.clone();

    let registration = frame_clock.with_frame_nanos(move |frame_time_nanos| {
        if !is_current(&state_for_closure, generation) {
            return;
        }
        let velocity = state_for_closure
            .borrow()
            .as_ref()
            .map(|anim| anim.velocity.get())
            .unwrap_or(0.0);

        // No borrow is held while the host applies the delta, so it may
        // cancel or restart momentum from inside the callback.
        let applied = on_scroll(-velocity);

        let outcome = {
            let guard = state_for_closure.borrow();
            match guard.as_ref() {
                Some(anim) if anim.generation == generation && anim.is_running.get() => {
                    anim.frames.set(anim.frames.get() + 1);
                    match applied {
                        Err(err) => {
                            log::warn!(
                                "momentum stopped after {} frames: {err}",
                                anim.frames.get()
                            );
                            anim.is_running.set(false);
                            FrameOutcome::Finished(MomentumEnd::Failed)
                        }
                        Ok(()) => match spec.step(velocity) {
                            Some(next) => {
                                log::trace!(
                                    "momentum frame {} at {}ns: v={:.3}",
                                    anim.frames.get(),
                                    frame_time_nanos,
                                    next
                                );
                                anim.velocity.set(next);
                                FrameOutcome::Continue
                            }
                            None => {
                                log::debug!("momentum settled after {} frames", anim.frames.get());
                                anim.velocity.set(0.0);
                                anim.is_running.set(false);
                                FrameOutcome::Finished(MomentumEnd::Settled)
                            }
                        },
                    }
                }
                _ => FrameOutcome::Abandoned,
            }
        };

        match outcome {
            FrameOutcome::Continue => schedule_next_frame(
                Rc::clone(&state_for_closure),
                frame_clock_for_closure.clone(),
                spec,
                generation,
                on_scroll,
                on_end,
            ),
            FrameOutcome::Finished(end) => {
                let finished = state_for_closure.borrow_mut().take();
                drop(finished);
                on_end(end);
            }
            FrameOutcome::Abandoned => {}
        }
    });

    // Keep the registration alive with the run it belongs to.
    if let Some(anim) = state.borrow_mut().as_mut() {
        if anim.generation == generation {
            anim.registration = Some(registration);
        }
    }
}

/// Drives momentum (inertial) scrolling for one scroll container.
///
/// At most one run is active per instance: starting a run cancels the
/// previous one first. Clones share the same run.
pub struct MomentumAnimation {
    state: SharedState,
    frame_clock: FrameClock,
    spec: Rc<Cell<MomentumDecaySpec>>,
    next_generation: Rc<Cell<u64>>,
}

impl MomentumAnimation {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self::with_spec(runtime, MomentumDecaySpec::default())
    }

    pub fn with_spec(runtime: RuntimeHandle, spec: MomentumDecaySpec) -> Self {
        Self {
            state: Rc::new(RefCell::new(None)),
            frame_clock: runtime.frame_clock(),
            spec: Rc::new(Cell::new(spec)),
            next_generation: Rc::new(Cell::new(1)),
        }
    }

    pub fn spec(&self) -> MomentumDecaySpec {
        self.spec.get()
    }

    /// Takes effect from the next run.
    pub fn set_spec(&self, spec: MomentumDecaySpec) {
        self.spec.set(spec);
    }

    /// Starts momentum with `velocity` px/frame.
    ///
    /// `on_scroll` receives the offset delta for each frame. `on_end` runs
    /// once when the run settles or fails; it is dropped unused if the run is
    /// cancelled. Returns false (after calling `on_end`) when the velocity
    /// is too slow to animate or the runtime is gone.
    pub fn start<F, G, E>(&self, velocity: f32, on_scroll: F, on_end: G) -> bool
    where
        F: Fn(f32) -> Result<(), E> + 'static,
        E: fmt::Display,
        G: FnOnce(MomentumEnd) + 'static,
    {
        self.cancel();

        let spec = self.spec.get();
        if spec.is_settled(velocity) {
            log::debug!("momentum not started: |{velocity:.3}| below minimum");
            on_end(MomentumEnd::Settled);
            return false;
        }
        if !self.frame_clock.runtime_handle().is_alive() {
            log::warn!("momentum not started: runtime dropped");
            on_end(MomentumEnd::Failed);
            return false;
        }

        let generation = self.next_generation.get();
        self.next_generation.set(generation + 1);

        *self.state.borrow_mut() = Some(MomentumState {
            generation,
            velocity: Cell::new(velocity),
            frames: Cell::new(0),
            is_running: Cell::new(true),
            registration: None,
        });
        log::debug!("momentum started at {velocity:.3}px/frame");

        schedule_next_frame(
            Rc::clone(&self.state),
            self.frame_clock.clone(),
            spec,
            generation,
            on_scroll,
            on_end,
        );
        true
    }

    /// Stops the current run synchronously. The pending frame is dropped.
    pub fn cancel(&self) {
        let previous = self.state.borrow_mut().take();
        if let Some(state) = previous {
            state.is_running.set(false);
            log::trace!("momentum cancelled after {} frames", state.frames.get());
            drop(state.registration);
        }
    }

    pub fn is_running(&self) -> bool {
        self.state
            .borrow()
            .as_ref()
            .is_some_and(|s| s.is_running.get())
    }

    pub fn phase(&self) -> MomentumPhase {
        if self.is_running() {
            MomentumPhase::Running
        } else {
            MomentumPhase::Idle
        }
    }

    /// Current velocity in px/frame, zero when idle.
    pub fn velocity(&self) -> f32 {
        self.state
            .borrow()
            .as_ref()
            .map(|s| s.velocity.get())
            .unwrap_or(0.0)
    }

    /// Frames applied by the current run.
    pub fn frames(&self) -> u32 {
        self.state
            .borrow()
            .as_ref()
            .map(|s| s.frames.get())
            .unwrap_or(0)
    }
}

impl Clone for MomentumAnimation {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            frame_clock: self.frame_clock.clone(),
            spec: Rc::clone(&self.spec),
            next_generation: Rc::clone(&self.next_generation),
        }
    }
}

#[cfg(test)]
#[path = "tests/momentum_tests.rs"]
mod tests;
