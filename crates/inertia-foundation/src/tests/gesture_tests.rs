use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn classifier() -> (Rc<GestureSession>, TapDragClassifier) {
    let session = GestureSession::new();
    session.begin();
    let classifier = TapDragClassifier::new(Rc::clone(&session), &GestureConfig::default());
    (session, classifier)
}

#[test]
fn quick_stationary_touch_on_item_is_a_tap() {
    let (_session, mut classifier) = classifier();
    classifier.begin(TouchPoint::new(10.0, 10.0), 1_000, Some(7));
    assert!(!classifier.on_move(TouchPoint::new(14.0, 17.0)));
    assert_eq!(classifier.release(1_150), TouchRelease::Tap(7));
}

#[test]
fn slow_touch_is_not_a_tap() {
    let (_session, mut classifier) = classifier();
    classifier.begin(TouchPoint::new(10.0, 10.0), 1_000, Some(7));
    assert_eq!(classifier.release(1_200), TouchRelease::Ignored);
}

#[test]
fn touch_on_empty_space_is_not_a_tap() {
    let (_session, mut classifier) = classifier();
    classifier.begin(TouchPoint::new(10.0, 10.0), 1_000, None);
    assert_eq!(classifier.release(1_010), TouchRelease::Ignored);
}

#[test]
fn drag_starts_once_either_axis_crosses_threshold() {
    let (_session, mut classifier) = classifier();
    classifier.begin(TouchPoint::new(0.0, 0.0), 0, Some(1));
    assert!(!classifier.on_move(TouchPoint::new(8.0, 0.0)), "threshold is exclusive");
    assert!(classifier.on_move(TouchPoint::new(8.5, 0.0)));
    assert!(!classifier.on_move(TouchPoint::new(30.0, 0.0)), "transition reported once");
    assert!(classifier.is_dragging());
}

#[test]
fn drag_is_monotonic_even_when_finger_returns() {
    let (session, mut classifier) = classifier();
    classifier.begin(TouchPoint::new(0.0, 0.0), 0, Some(1));
    classifier.on_move(TouchPoint::new(0.0, 20.0));
    for y in [10.0, 2.0, 0.0, -1.0] {
        classifier.on_move(TouchPoint::new(0.0, y));
        assert!(session.is_dragging());
    }
    assert_eq!(classifier.release(50), TouchRelease::Drag);
}

#[test]
fn long_press_fires_once_after_delay() {
    let session = GestureSession::new();
    session.begin();
    let mut detector = LongPressDetector::new(Rc::clone(&session), &GestureConfig::default());
    detector.arm(Some(3), TouchPoint::new(5.0, 5.0), 100);

    assert_eq!(detector.deadline(), Some(1_400));
    assert_eq!(detector.poll(1_399), None);
    assert_eq!(detector.poll(1_400), Some(3));
    assert_eq!(detector.poll(2_000), None);
    assert!(session.is_long_press_active());
}

#[test]
fn movement_disarms_long_press() {
    let session = GestureSession::new();
    session.begin();
    let mut detector = LongPressDetector::new(Rc::clone(&session), &GestureConfig::default());
    detector.arm(Some(3), TouchPoint::new(5.0, 5.0), 0);
    detector.on_move(TouchPoint::new(5.0, 6.0));
    assert!(detector.is_pending());
    detector.on_move(TouchPoint::new(5.0, 20.0));
    assert!(!detector.is_pending());
    assert_eq!(detector.poll(5_000), None);
}

#[test]
fn drag_on_shared_session_blocks_long_press() {
    let session = GestureSession::new();
    session.begin();
    let mut detector = LongPressDetector::new(Rc::clone(&session), &GestureConfig::default());
    detector.arm(Some(3), TouchPoint::ZERO, 0);
    session.mark_dragging();
    assert_eq!(detector.poll(5_000), None);
    assert!(!session.is_long_press_active());
}

#[test]
fn long_pressed_touch_never_taps() {
    let (session, mut classifier) = classifier();
    classifier.begin(TouchPoint::ZERO, 0, Some(9));
    session.mark_long_press();
    assert_eq!(classifier.release(100), TouchRelease::LongPressed);
}

#[test]
fn session_begin_resets_flags() {
    let session = GestureSession::new();
    session.begin();
    assert!(session.mark_dragging());
    assert!(!session.mark_dragging());
    session.mark_long_press();
    session.end();
    assert!(!session.is_active());
    assert!(session.is_dragging(), "flags readable after end");

    session.begin();
    assert!(session.is_active());
    assert!(!session.is_dragging());
    assert!(!session.is_long_press_active());
}

#[test]
fn click_guard_window() {
    let mut guard = ClickGuard::new(300);
    assert!(!guard.should_suppress(0));
    guard.arm(1_000);
    assert!(guard.should_suppress(1_000));
    assert!(guard.should_suppress(1_299));
    assert!(!guard.should_suppress(1_300));
    // Re-arming restarts the window.
    guard.arm(1_200);
    assert!(guard.should_suppress(1_499));
    assert!(!guard.should_suppress(1_500));
}

struct FailingHaptics {
    calls: RefCell<Vec<u32>>,
}

impl HapticFeedback for FailingHaptics {
    fn vibrate(&self, duration_ms: u32) -> Result<(), HapticError> {
        self.calls.borrow_mut().push(duration_ms);
        Err(HapticError::Platform("vibrator busy".into()))
    }
}

#[test]
fn haptic_failures_are_swallowed() {
    let haptics = FailingHaptics {
        calls: RefCell::new(Vec::new()),
    };
    pulse(&haptics, 10);
    pulse(&NoHaptics, 10);
    assert_eq!(haptics.calls.borrow().as_slice(), &[10]);
}

#[test]
fn touch_event_builders() {
    let event = TouchEvent::start(1.0, 2.0, 30).on_item(4);
    assert_eq!(event.phase, TouchPhase::Start);
    assert_eq!(event.position, TouchPoint::new(1.0, 2.0));
    assert_eq!(event.target, Some(4));
    assert_eq!(TouchEvent::cancel(0.0, 0.0, 0).phase, TouchPhase::Cancel);
}

#[test]
fn config_builders_keep_bounds_sane() {
    let config = GestureConfig::default()
        .with_velocity_bounds(-2.0, 1.0)
        .with_max_samples(0);
    assert_eq!(config.min_velocity, 2.0);
    assert_eq!(config.max_velocity, 2.0);
    assert_eq!(config.max_samples, 1);
}
