//! Ghost entity: one word moving toward the target
//!
//! Each ghost owns its expiry timer, so removing the ghost always takes the
//! timer with it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::timer::ExpiryTimer;
use crate::lerp_clamped;

/// Unique ghost identity. Two ghosts may share a word, never an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GhostId(pub u32);

impl std::fmt::Display for GhostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen edge a ghost enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSide {
    Left,
    Right,
}

impl SpawnSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnSide::Left => "left",
            SpawnSide::Right => "right",
        }
    }
}

/// A spawned word-object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub id: GhostId,
    pub word: String,
    pub pos: Vec2,
    pub side: SpawnSide,
    /// Where the straight-line path starts
    pub spawn_pos: Vec2,
    /// Game-clock time of creation (ms)
    pub created_at: u64,
    /// Time spent travelling along the path (ms)
    pub travel_ms: u64,
    /// Clock time up to which motion has been integrated
    pub moved_until: u64,
    active: bool,
    timer: ExpiryTimer,
}

impl Ghost {
    pub fn new(
        id: GhostId,
        word: String,
        side: SpawnSide,
        spawn_pos: Vec2,
        now: u64,
        expiry_ms: u64,
    ) -> Self {
        Self {
            id,
            word,
            pos: spawn_pos,
            side,
            spawn_pos,
            created_at: now,
            travel_ms: 0,
            moved_until: now,
            active: true,
            timer: ExpiryTimer::start(now, expiry_ms),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn timer(&self) -> &ExpiryTimer {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut ExpiryTimer {
        &mut self.timer
    }

    /// Deactivate and cancel the timer. Returns false if already destroyed.
    pub fn destroy(&mut self, now: u64) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.timer.cancel(now);
        true
    }

    /// Integrate motion up to `now`, moving along the path to `target`.
    /// Finished paths rest exactly on the target.
    pub fn advance_to(&mut self, now: u64, target: Vec2, duration_ms: u64) {
        let dt = now.saturating_sub(self.moved_until);
        self.moved_until = now;
        self.travel_ms = (self.travel_ms + dt).min(duration_ms);
        self.pos = if self.travel_ms >= duration_ms {
            target
        } else {
            let t = self.travel_ms as f32 / duration_ms as f32;
            lerp_clamped(self.spawn_pos, target, t)
        };
    }

    /// Fraction of the path covered, 0..=1
    pub fn progress(&self, duration_ms: u64) -> f32 {
        (self.travel_ms as f32 / duration_ms.max(1) as f32).min(1.0)
    }

    /// Case-insensitive word comparison
    pub fn matches(&self, text: &str) -> bool {
        self.word.to_lowercase() == text.to_lowercase()
    }
}
