//! Countdown and periodic timers on the game clock
//!
//! Timers never run on their own thread. They hold deadlines on the game's
//! monotonic millisecond clock and the game loop polls them in deadline order.

use serde::{Deserialize, Serialize};

/// Lifecycle of an expiry timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerState {
    /// Counting down toward `deadline`
    Running { deadline: u64 },
    /// Deadline reached; terminal
    Fired,
    /// Stopped before firing. `remaining` is what was left at cancel time.
    Cancelled { remaining: u64 },
}

/// Per-ghost countdown that ends the game when it fires
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiryTimer {
    duration: u64,
    state: TimerState,
}

impl ExpiryTimer {
    /// Start a timer at `now` that fires after `duration` ms
    pub fn start(now: u64, duration: u64) -> Self {
        Self {
            duration,
            state: TimerState::Running {
                deadline: now + duration,
            },
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn duration(&self) -> u64 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running { .. })
    }

    /// Deadline if running
    pub fn deadline(&self) -> Option<u64> {
        match self.state {
            TimerState::Running { deadline } => Some(deadline),
            _ => None,
        }
    }

    /// Stop the countdown. No-op unless running.
    pub fn cancel(&mut self, now: u64) {
        if let TimerState::Running { deadline } = self.state {
            self.state = TimerState::Cancelled {
                remaining: deadline.saturating_sub(now),
            };
        }
    }

    /// Restart a cancelled timer with its full duration
    pub fn restart_full(&mut self, now: u64) {
        if let TimerState::Cancelled { .. } = self.state {
            self.state = TimerState::Running {
                deadline: now + self.duration,
            };
        }
    }

    /// Restart a cancelled timer with the time it had left
    pub fn restart_remaining(&mut self, now: u64) {
        if let TimerState::Cancelled { remaining } = self.state {
            self.state = TimerState::Running {
                deadline: now + remaining,
            };
        }
    }

    /// Fire if the deadline has passed. Returns true exactly once.
    pub fn poll(&mut self, now: u64) -> bool {
        match self.state {
            TimerState::Running { deadline } if deadline <= now => {
                self.state = TimerState::Fired;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-period trigger for the spawn scheduler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnTimer {
    period: u64,
    next_due: Option<u64>,
}

impl SpawnTimer {
    /// A stopped timer with the given period
    pub fn new(period: u64) -> Self {
        debug_assert!(period > 0, "spawn period must be positive");
        Self {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> u64 {
        self.period
    }

    /// Start (or restart) with the first trigger `delay` ms after `now`
    pub fn start(&mut self, now: u64, delay: u64) {
        self.next_due = Some(now + delay);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Next trigger time if running
    pub fn next_due(&self) -> Option<u64> {
        self.next_due
    }

    /// Consume one trigger due at or before `now`, scheduling the next one.
    /// Returns the time the trigger was due.
    pub fn poll(&mut self, now: u64) -> Option<u64> {
        match self.next_due {
            Some(due) if due <= now => {
                self.next_due = Some(due + self.period);
                Some(due)
            }
            _ => None,
        }
    }
}
