/// Identifier of a selectable list item, assigned by the host.
pub type ItemId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A single-pointer touch event as delivered by the host.
///
/// `uptime_ms` must come from the same monotonic clock as the frame times
/// handed to the runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub position: TouchPoint,
    pub uptime_ms: u64,
    /// Item under the pointer at touch-start, if any.
    pub target: Option<ItemId>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, x: f32, y: f32, uptime_ms: u64) -> Self {
        Self {
            phase,
            position: TouchPoint::new(x, y),
            uptime_ms,
            target: None,
        }
    }

    pub fn start(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(TouchPhase::Start, x, y, uptime_ms)
    }

    pub fn moved(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(TouchPhase::Move, x, y, uptime_ms)
    }

    pub fn end(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(TouchPhase::End, x, y, uptime_ms)
    }

    pub fn cancel(x: f32, y: f32, uptime_ms: u64) -> Self {
        Self::new(TouchPhase::Cancel, x, y, uptime_ms)
    }

    pub fn on_item(mut self, item: ItemId) -> Self {
        self.target = Some(item);
        self
    }
}
