/// Swallows the synthetic click a host delivers right after a drag ends.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClickGuard {
    window_ms: u64,
    suppress_until: Option<u64>,
}

impl ClickGuard {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            suppress_until: None,
        }
    }

    pub fn arm(&mut self, now_ms: u64) {
        self.suppress_until = Some(now_ms.saturating_add(self.window_ms));
    }

    pub fn should_suppress(&self, now_ms: u64) -> bool {
        self.suppress_until.is_some_and(|until| now_ms < until)
    }
}
