use std::rc::Rc;

use inertia_testing::prelude::*;
use inertia_ui::{
    GestureConfig, MomentumDecaySpec, MomentumScrollConfig, MomentumScrollController,
    ScrollCallbacks, ScrollState, TouchRelease,
};

struct ListUnderTest {
    robot: TouchRobot,
    scroll: ScrollState,
    controller: MomentumScrollController,
    selected: RecordingSelection,
    long_pressed: RecordingSelection,
    haptics: Rc<RecordingHaptics>,
}

fn list_with(
    initial: f32,
    haptics: Rc<RecordingHaptics>,
    config: MomentumScrollConfig,
) -> ListUnderTest {
    let robot = TouchRobot::new();
    let scroll = ScrollState::new(initial, 5_000.0);
    let selected = RecordingSelection::new();
    let long_pressed = RecordingSelection::new();
    let callbacks = ScrollCallbacks::new()
        .on_select(selected.callback())
        .on_long_press(long_pressed.callback())
        .haptics(haptics.clone());
    let controller = MomentumScrollController::new(
        robot.runtime_handle(),
        Rc::new(scroll.clone()),
        callbacks,
        config,
    );
    controller.attach(robot.dispatcher());
    ListUnderTest {
        robot,
        scroll,
        controller,
        selected,
        long_pressed,
        haptics,
    }
}

fn list(initial: f32) -> ListUnderTest {
    list_with(initial, RecordingHaptics::new(), MomentumScrollConfig::default())
}

#[test]
fn fast_swipe_is_clamped_and_decays_geometrically() {
    let mut list = list(1_000.0);

    // Five 40px steps per 16ms tick: far above the velocity cap.
    list.robot.swipe(100.0, 600.0, 400.0, 5, 16);
    assert_eq!(list.controller.last_release(), Some(TouchRelease::Drag));
    assert!((list.scroll.value() - 1_200.0).abs() < 1e-3);
    assert!((list.controller.momentum_velocity() + 20.0).abs() < 1e-4);

    let trace = OffsetTrace::attach(&list.scroll);
    let frames = list.robot.settle(1_000);

    let spec = MomentumDecaySpec::default();
    assert_eq!(frames, spec.frames_to_settle(-20.0) as usize);
    let expected = 1_200.0 + spec.total_displacement(-20.0);
    assert!((list.scroll.value() - expected).abs() < 0.05);

    let deltas = trace.deltas();
    assert!(deltas.iter().all(|delta| *delta > 0.0));
    assert!(deltas.windows(2).all(|pair| pair[1] < pair[0]));
}

#[test]
fn sample_buffer_stays_bounded_during_long_drag() {
    let mut list = list(2_000.0);

    list.robot.touch_start(50.0, 900.0, None);
    let mut y = 900.0;
    for _ in 0..40 {
        list.robot.advance(16);
        y -= 12.0;
        list.robot.touch_move(50.0, y);
        assert!(list.controller.sample_count() <= 7);
    }
    assert_eq!(list.controller.sample_count(), 7);
    list.robot.touch_end();
    assert!(list.controller.is_momentum_running());
}

#[test]
fn dragging_never_reverts_to_tap() {
    let mut list = list(500.0);

    list.robot.touch_start(50.0, 300.0, Some(11));
    list.robot.advance(16);
    list.robot.touch_move(50.0, 320.0);
    list.robot.advance(16);
    // Back near the origin, within the tap window.
    list.robot.touch_move(50.0, 301.0);
    assert!(list.controller.is_dragging());
    list.robot.advance(16);
    list.robot.touch_end();

    assert_eq!(list.controller.last_release(), Some(TouchRelease::Drag));
    assert_eq!(list.selected.count(), 0);
    assert!(list.controller.should_suppress_click(list.robot.now()));
}

#[test]
fn tap_selects_exactly_once() {
    let mut list = list(500.0);

    list.robot.tap(20.0, 40.0, 5, 120);
    list.robot.settle(100);

    assert_eq!(list.selected.items(), vec![5]);
    assert_eq!(list.scroll.value(), 500.0);
    assert!(list.haptics.pulses().is_empty());
}

#[test]
fn long_hold_fires_long_press_and_no_tap() {
    let mut list = list(500.0);

    list.robot.touch_start(20.0, 40.0, Some(8));
    list.robot.advance(1_290);
    assert_eq!(list.long_pressed.count(), 0);
    list.robot.advance(200);
    list.robot.touch_end();

    assert_eq!(list.long_pressed.items(), vec![8]);
    assert_eq!(list.controller.last_release(), Some(TouchRelease::LongPressed));
    assert_eq!(list.selected.count(), 0);
    assert_eq!(list.haptics.pulses(), vec![50]);
}

#[test]
fn moving_after_long_press_neither_scrolls_nor_flings() {
    let mut list = list(1_000.0);

    list.robot.touch_start(20.0, 600.0, Some(8));
    list.robot.advance(1_400);
    assert_eq!(list.long_pressed.items(), vec![8]);

    let mut y = 600.0;
    for _ in 0..5 {
        list.robot.advance(16);
        y -= 40.0;
        list.robot.touch_move(20.0, y);
    }
    assert!(!list.controller.is_dragging());
    list.robot.touch_end();

    assert_eq!(list.controller.last_release(), Some(TouchRelease::LongPressed));
    assert_eq!(list.scroll.value(), 1_000.0);
    assert!(!list.controller.is_momentum_running());
    assert!(!list.controller.should_suppress_click(list.robot.now()));
    assert_eq!(list.selected.count(), 0);
    assert_eq!(list.haptics.pulses(), vec![50]);
}

#[test]
fn failing_haptics_do_not_change_gestures() {
    let mut list = list_with(
        500.0,
        RecordingHaptics::failing(),
        MomentumScrollConfig::default(),
    );

    list.robot.swipe(100.0, 600.0, 500.0, 4, 16);
    assert_eq!(list.haptics.pulses(), vec![10]);
    assert!(list.controller.is_momentum_running());

    list.robot.settle(1_000);
    list.robot.tap(20.0, 40.0, 2, 50);
    assert_eq!(list.selected.items(), vec![2]);
}

#[test]
fn momentum_pins_at_top_edge_until_it_settles() {
    let mut list = list(60.0);

    list.robot.swipe(100.0, 300.0, 400.0, 5, 16);
    list.robot.settle(1_000);

    assert_eq!(list.scroll.value(), 0.0);
    assert!(!list.controller.is_momentum_running());
}

#[test]
fn new_touch_catches_momentum() {
    let mut list = list(1_000.0);
    list.robot.swipe(100.0, 600.0, 400.0, 5, 16);
    list.robot.run_frames(3);
    let caught = list.scroll.value();

    list.robot.touch_start(100.0, 500.0, None);
    list.robot.run_frames(20);

    assert!(!list.controller.is_momentum_running());
    assert_eq!(list.scroll.value(), caught);
    assert!(list.robot.is_idle());
}

#[test]
fn cancelled_touch_neither_selects_nor_flings() {
    let mut list = list(1_000.0);

    list.robot.touch_start(100.0, 600.0, Some(4));
    list.robot.advance(16);
    list.robot.touch_move(100.0, 560.0);
    list.robot.advance(16);
    list.robot.touch_cancel();
    list.robot.settle(100);

    assert_eq!(list.selected.count(), 0);
    assert!(!list.controller.is_momentum_running());
    assert!((list.scroll.value() - 1_040.0).abs() < 1e-3);
}

#[test]
fn dropping_controller_stops_momentum() {
    let mut list = list(1_000.0);
    list.robot.swipe(100.0, 600.0, 400.0, 5, 16);
    list.robot.frame();
    let at_drop = list.scroll.value();

    drop(list.controller);
    list.robot.run_frames(30);

    assert_eq!(list.scroll.value(), at_drop);
    assert_eq!(list.robot.dispatcher().handler_count(), 0);
}

#[test]
fn slower_decay_travels_further() {
    let slow = MomentumScrollConfig::default()
        .with_decay(MomentumDecaySpec::default().with_deceleration(0.96));
    let mut default_list = list(1_000.0);
    let mut slow_list = list_with(1_000.0, RecordingHaptics::new(), slow);

    default_list.robot.swipe(100.0, 600.0, 500.0, 5, 16);
    slow_list.robot.swipe(100.0, 600.0, 500.0, 5, 16);
    default_list.robot.settle(2_000);
    slow_list.robot.settle(2_000);

    assert!(slow_list.scroll.value() > default_list.scroll.value());
}

#[test]
fn larger_drag_threshold_keeps_small_moves_as_taps() {
    let config = MomentumScrollConfig::default()
        .with_gesture(GestureConfig::default().with_drag_threshold(30.0));
    let mut list = list_with(500.0, RecordingHaptics::new(), config);

    list.robot.touch_start(20.0, 40.0, Some(6));
    list.robot.advance(16);
    list.robot.touch_move(20.0, 60.0);
    list.robot.advance(16);
    list.robot.touch_end();

    assert_eq!(list.selected.items(), vec![6]);
    assert_eq!(list.scroll.value(), 500.0);
}
