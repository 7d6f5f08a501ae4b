use std::time::Duration;

/// Countdown clock driving the lose transition. The owner feeds elapsed
/// time through `tick`; no assumption is made about tick frequency beyond
/// monotonic non-negative elapsed time.
///
/// Invariant: `running` is false whenever `remaining` has reached zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimerState {
    remaining: Duration,
    running: bool,
}

impl TimerState {
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self, max_duration: Duration) {
        self.remaining = max_duration;
        self.running = true;
    }

    /// Unconditional stop; any pending tick is discarded.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Advances the countdown. Returns true exactly on the tick that
    /// exhausts the clock; the timer stops itself at that point.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.running = false;
            return true;
        }
        false
    }
}
