//! Time-gated acceptance of control presses.

/// Last-accepted-time record for a group of controls.
///
/// A press is accepted only when strictly more than `window_ms` has
/// elapsed since the previous accepted press.  Rejected presses leave
/// the record untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceGuard {
    window_ms: u64,
    last_accepted_ms: Option<u64>,
}

impl DebounceGuard {
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_accepted_ms: None,
        }
    }

    /// Try to accept a press observed at `now_ms`.
    pub fn accept(&mut self, now_ms: u64) -> bool {
        if let Some(last) = self.last_accepted_ms {
            if now_ms.saturating_sub(last) <= self.window_ms {
                return false;
            }
        }
        self.last_accepted_ms = Some(now_ms);
        true
    }

    pub fn last_accepted_ms(&self) -> Option<u64> {
        self.last_accepted_ms
    }
}

/// Rising-edge detector for a polled level.
#[derive(Clone, Copy, Debug, Default)]
pub struct EdgeDetector {
    level: bool,
}

impl EdgeDetector {
    pub const fn new() -> Self {
        Self { level: false }
    }

    /// Feed the current level; returns `true` on a low → high change.
    pub fn rising(&mut self, level: bool) -> bool {
        let rose = level && !self.level;
        self.level = level;
        rose
    }
}
