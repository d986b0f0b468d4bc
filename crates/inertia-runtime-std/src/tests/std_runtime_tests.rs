use super::StdRuntime;
use inertia_core::{FrameCallbackRegistration, FrameClock};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn std_runtime_requests_frame_when_callback_registered() {
    let runtime = StdRuntime::new();
    assert!(!runtime.take_frame_request());

    let fired = Rc::new(Cell::new(0u64));
    let fired_cb = Rc::clone(&fired);
    let _registration = runtime
        .frame_clock()
        .with_frame_nanos(move |time| fired_cb.set(time));

    assert!(runtime.take_frame_request());
    assert!(!runtime.take_frame_request(), "request flag resets after take");

    runtime.drain_frame_callbacks(48_000_000);
    assert_eq!(fired.get(), 48_000_000);
}

#[test]
fn frame_waker_invoked_on_schedule() {
    let runtime = StdRuntime::new();
    let wakes = Arc::new(AtomicUsize::new(0));
    let wakes_cb = Arc::clone(&wakes);
    runtime.set_frame_waker(move || {
        wakes_cb.fetch_add(1, Ordering::SeqCst);
    });

    let _registration = runtime.frame_clock().with_frame_nanos(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);

    runtime.clear_frame_waker();
    let _another = runtime.frame_clock().with_frame_nanos(|_| {});
    assert_eq!(wakes.load(Ordering::SeqCst), 1);
}

#[test]
fn uptime_is_monotonic() {
    let runtime = StdRuntime::new();
    let first = runtime.uptime_millis();
    let second = runtime.uptime_millis();
    assert!(second >= first);
}

type KeepAlive = Rc<RefCell<Vec<FrameCallbackRegistration>>>;

fn count_down(clock: FrameClock, remaining: Rc<Cell<u32>>, keep: KeepAlive) {
    let next = clock.clone();
    let keep_next = Rc::clone(&keep);
    let registration = clock.with_frame_millis(move |_| {
        remaining.set(remaining.get() - 1);
        if remaining.get() > 0 {
            count_down(next, remaining, keep_next);
        }
    });
    keep.borrow_mut().push(registration);
}

#[test]
fn pace_runs_until_queue_is_empty() {
    let runtime = StdRuntime::new();
    let remaining = Rc::new(Cell::new(3u32));
    let keep: KeepAlive = Rc::new(RefCell::new(Vec::new()));
    count_down(runtime.frame_clock(), Rc::clone(&remaining), Rc::clone(&keep));

    let frames = runtime.pace(Duration::from_millis(1), 10);
    assert_eq!(frames, 3);
    assert_eq!(remaining.get(), 0);
    assert_eq!(runtime.pace(Duration::from_millis(1), 10), 0);
}
