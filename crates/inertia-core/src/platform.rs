//! Seams between the runtime and the host it runs in.

/// Asks the host for a frame, like `requestAnimationFrame`.
///
/// Called on the UI thread, but implementations may hand the request to a
/// different thread, hence `Send + Sync`.
pub trait RuntimeScheduler: Send + Sync {
    fn schedule_frame(&self);
}

/// Monotonic time source for event uptimes.
pub trait Clock: Send + Sync {
    type Instant: Copy + Send + Sync;

    fn now(&self) -> Self::Instant;

    /// Whole milliseconds since `since`.
    fn elapsed_millis(&self, since: Self::Instant) -> u64;
}
