//! Spawn scheduler
//!
//! Every `word_delay_ms` a pair of ghosts enters: one from the left edge and
//! one from the right, each at a random height and with its own expiry timer.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::ghost::{Ghost, GhostId, SpawnSide};
use super::registry::GhostRegistry;
use super::timer::SpawnTimer;
use super::words::WordSource;
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct SpawnScheduler {
    timer: SpawnTimer,
    first_delay: u64,
    expiry_ms: u64,
    pane: Vec2,
    offset: f32,
}

impl SpawnScheduler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            timer: SpawnTimer::new(settings.word_delay_ms),
            first_delay: settings.first_spawn_delay_ms,
            expiry_ms: settings.game_length_ms,
            pane: Vec2::new(settings.pane_width, settings.pane_height),
            offset: settings.spawn_offset,
        }
    }

    /// Begin spawning; the first pair arrives after the initial delay
    pub fn start(&mut self, now: u64) {
        self.timer.start(now, self.first_delay);
    }

    /// Restart after a pause; the next pair arrives one full period later
    pub fn resume(&mut self, now: u64) {
        self.timer.start(now, self.timer.period());
    }

    pub fn stop(&mut self) {
        self.timer.stop();
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.timer.next_due()
    }

    /// Consume a trigger due by `now`, returning its scheduled time
    pub fn poll(&mut self, now: u64) -> Option<u64> {
        self.timer.poll(now)
    }

    /// Where a ghost from `side` starts, given a height
    pub fn spawn_point(&self, side: SpawnSide, y: f32) -> Vec2 {
        match side {
            SpawnSide::Left => Vec2::new(-self.offset, y),
            SpawnSide::Right => Vec2::new(self.pane.x + self.offset, y),
        }
    }

    /// Create the left/right pair at `now` and register both
    pub fn spawn_pair<W: WordSource + ?Sized>(
        &self,
        now: u64,
        level: u32,
        words: &mut W,
        rng: &mut Pcg32,
        registry: &mut GhostRegistry,
    ) -> [GhostId; 2] {
        [SpawnSide::Left, SpawnSide::Right].map(|side| {
            let y = rng.random_range(0.0..self.pane.y);
            let id = registry.next_ghost_id();
            let word = words.get_word(level);
            let ghost = Ghost::new(id, word, side, self.spawn_point(side, y), now, self.expiry_ms);
            log::debug!(
                "Spawned ghost {} '{}' from {} at y={:.1}",
                id,
                ghost.word,
                side.as_str(),
                y
            );
            registry.insert(ghost);
            id
        })
    }
}
