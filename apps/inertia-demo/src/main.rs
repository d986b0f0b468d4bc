//! Replays a flick, a tap and a long press against a virtual list and logs
//! what the momentum controller does with them.
//!
//! Run with `RUST_LOG=debug` to see classification and momentum decisions,
//! or `RUST_LOG=trace` for every frame.

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use inertia_runtime_std::StdRuntime;
use inertia_ui::{
    HapticError, HapticFeedback, ItemId, MomentumScrollConfig, MomentumScrollController,
    ScrollCallbacks, ScrollState, TouchDispatcher, TouchEvent,
};

const ROW_HEIGHT: f32 = 48.0;
const ROW_COUNT: u32 = 200;
const VIEWPORT_HEIGHT: f32 = 800.0;
const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: u32 = 2_000;

struct LoggingHaptics;

impl HapticFeedback for LoggingHaptics {
    fn vibrate(&self, duration_ms: u32) -> Result<(), HapticError> {
        log::info!("bzz ({duration_ms}ms)");
        Ok(())
    }
}

struct Demo {
    runtime: StdRuntime,
    dispatcher: TouchDispatcher,
    scroll: ScrollState,
}

impl Demo {
    fn row_at(&self, y: f32) -> Option<ItemId> {
        let row = ((y + self.scroll.value()) / ROW_HEIGHT).floor();
        (row >= 0.0 && row < ROW_COUNT as f32).then_some(row as ItemId)
    }

    fn send(&self, event: TouchEvent) {
        self.dispatcher.dispatch(&event);
    }

    fn start(&self, x: f32, y: f32) {
        let mut event = TouchEvent::start(x, y, self.runtime.uptime_millis());
        if let Some(item) = self.row_at(y) {
            event = event.on_item(item);
        }
        self.send(event);
    }

    /// Sleeps one display frame and drains it.
    fn frame(&self) {
        thread::sleep(FRAME);
        self.runtime.take_frame_request();
        self.runtime.drain_frame_now();
    }

    fn run_until_idle(&self) -> u32 {
        self.runtime.pace(FRAME, MAX_FRAMES)
    }

    fn flick(&self, x: f32, from_y: f32, to_y: f32, steps: u32) {
        self.start(x, from_y);
        let step = (to_y - from_y) / steps as f32;
        let mut y = from_y;
        for _ in 0..steps {
            self.frame();
            y += step;
            self.send(TouchEvent::moved(x, y, self.runtime.uptime_millis()));
        }
        self.send(TouchEvent::end(x, y, self.runtime.uptime_millis()));
    }

    fn press(&self, x: f32, y: f32, hold: Duration) {
        self.start(x, y);
        let deadline = self.runtime.uptime_millis() + hold.as_millis() as u64;
        while self.runtime.uptime_millis() < deadline {
            self.frame();
        }
        self.send(TouchEvent::end(x, y, self.runtime.uptime_millis()));
    }
}

fn main() {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let runtime = StdRuntime::new();
    let dispatcher = TouchDispatcher::new();
    let content_height = ROW_HEIGHT * ROW_COUNT as f32;
    let scroll = ScrollState::new(0.0, content_height - VIEWPORT_HEIGHT);

    let callbacks = ScrollCallbacks::new()
        .on_select(|item| log::info!("selected row {item}"))
        .on_long_press(|item| log::info!("long-pressed row {item}"))
        .haptics(Rc::new(LoggingHaptics));
    let controller = MomentumScrollController::new(
        runtime.runtime_handle(),
        Rc::new(scroll.clone()),
        callbacks,
        MomentumScrollConfig::default(),
    );
    controller.attach(&dispatcher);

    let demo = Demo {
        runtime,
        dispatcher,
        scroll,
    };

    log::info!("flicking up");
    demo.flick(200.0, 700.0, 400.0, 6);
    let released_at = demo.scroll.value();
    let frames = demo.run_until_idle();
    log::info!(
        "momentum: {released_at:.1} -> {:.1} over {frames} frames",
        demo.scroll.value()
    );

    log::info!("tapping");
    demo.press(120.0, 300.0, Duration::from_millis(80));
    if controller.should_suppress_click(demo.runtime.uptime_millis()) {
        log::info!("host click suppressed");
    }

    log::info!("holding");
    demo.press(120.0, 500.0, Duration::from_millis(1_400));

    log::info!("flicking down and catching it mid-flight");
    demo.flick(200.0, 300.0, 500.0, 4);
    for _ in 0..5 {
        demo.frame();
    }
    demo.press(200.0, 500.0, Duration::from_millis(50));
    log::info!(
        "caught at {:.1}, momentum running: {}",
        demo.scroll.value(),
        controller.is_momentum_running()
    );
}
