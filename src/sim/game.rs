//! The game aggregate
//!
//! `Game` owns the registry, the timers and the score. Every operation takes
//! `&mut self`, so a spawn, a tick, a match or an expiry is applied as one
//! step and nothing ever sees a half-removed ghost. Three timing sources feed
//! it: the spawn timer, one expiry timer per ghost, and the per-frame tick.
//! Inside `tick` due timers are handled in deadline order. Ghosts are moved
//! and checked for collisions up to each deadline before its timer fires, so
//! one long tick ends the same way as many short ones.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision;
use super::ghost::GhostId;
use super::matcher;
use super::motion;
use super::progression::{LevelChange, Progression};
use super::registry::GhostRegistry;
use super::spawn::SpawnScheduler;
use super::state::{GameEvent, GamePhase, GameState, GameSummary, GhostView, HudSnapshot, Outcome};
use super::words::{WordDictionary, WordSource};
use crate::consts::BANNER_TEXT;
use crate::settings::{ResumePolicy, Settings, SettingsError};

/// One run of the typing game
#[derive(Debug)]
pub struct Game<W: WordSource = WordDictionary> {
    settings: Settings,
    state: GameState,
    registry: GhostRegistry,
    spawner: SpawnScheduler,
    progression: Progression,
    words: W,
    rng: Pcg32,
    /// Game clock (ms since start)
    now: u64,
    target: Vec2,
    player: String,
    events: Vec<GameEvent>,
}

impl Game<WordDictionary> {
    /// Start a game using the built-in dictionary
    pub fn with_dictionary(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        Self::new(settings, WordDictionary::new(seed), seed)
    }
}

impl<W: WordSource> Game<W> {
    /// Start a game. The spawner is running from time zero.
    pub fn new(settings: Settings, words: W, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;

        let mut spawner = SpawnScheduler::new(&settings);
        spawner.start(0);

        let progression = Progression {
            level_score: settings.level_score,
            max_level: settings.max_level,
            score_per_word: settings.score_per_word,
        };
        let target = Vec2::new(settings.pane_width / 2.0, settings.pane_height / 2.0);

        log::info!("Game started with seed: {}", seed);

        Ok(Self {
            state: GameState::new(settings.start_lives),
            registry: GhostRegistry::new(),
            spawner,
            progression,
            words,
            rng: Pcg32::seed_from_u64(seed),
            now: 0,
            target,
            player: String::new(),
            events: Vec::new(),
            settings,
        })
    }

    /// Set the player name shown in the HUD
    pub fn with_player(mut self, name: impl Into<String>) -> Self {
        self.player = name.into();
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &GhostRegistry {
        &self.registry
    }

    pub fn words(&self) -> &W {
        &self.words
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    pub fn player(&self) -> &str {
        &self.player
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Whether the spawn timer is currently scheduled
    pub fn spawning(&self) -> bool {
        self.spawner.is_running()
    }

    /// Final summary once the run has ended
    pub fn summary(&self) -> Option<GameSummary> {
        self.state.outcome().map(|outcome| GameSummary {
            outcome,
            final_score: self.state.score,
            final_level: self.state.level,
            player: self.player.clone(),
        })
    }

    /// Drain events produced since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Per-frame tick ===

    /// Advance the game clock by `elapsed_ms`
    pub fn tick(&mut self, elapsed_ms: u64) {
        if self.state.is_over() {
            return;
        }
        let end = self.now + elapsed_ms;

        self.run_timers(end);
        if self.state.is_over() {
            return;
        }
        self.move_ghosts(end);
        if self.state.is_over() {
            return;
        }

        if cfg!(debug_assertions) {
            self.registry.check_invariants();
        }
    }

    fn motion_frozen(&self) -> bool {
        self.state.is_paused() && self.settings.freeze_motion_on_pause
    }

    /// Bring motion and collisions up to clock time `to`
    fn move_ghosts(&mut self, to: u64) {
        self.now = self.now.max(to);
        if self.motion_frozen() {
            motion::hold_all(&mut self.registry, self.now);
        } else {
            motion::advance_all(
                &mut self.registry,
                self.now,
                self.target,
                self.settings.word_duration_ms,
            );
            self.resolve_collisions();
        }
    }

    /// Fire every spawn and expiry trigger due by `end`, oldest first.
    /// Ghosts that reach the target before a deadline collide before it fires.
    fn run_timers(&mut self, end: u64) {
        loop {
            let spawn_due = self.spawner.next_due().filter(|&t| t <= end);
            let expiry_due = self
                .registry
                .iter()
                .filter_map(|g| g.timer().deadline().map(|d| (d, g.id)))
                .filter(|&(d, _)| d <= end)
                .min();

            let due = match (spawn_due, expiry_due) {
                (None, None) => break,
                (Some(s), None) => s,
                (None, Some((e, _))) => e,
                (Some(s), Some((e, _))) => s.min(e),
            };
            self.move_ghosts(due);
            if self.state.is_over() {
                break;
            }

            match (spawn_due, expiry_due) {
                (None, None) => break,
                (Some(s), Some((e, id))) if e < s => self.fire_expiry(e, id),
                (Some(s), _) => self.fire_spawn(s),
                (None, Some((e, id))) => self.fire_expiry(e, id),
            }

            if self.state.is_over() {
                break;
            }
        }
    }

    fn fire_spawn(&mut self, due: u64) {
        self.now = self.now.max(due);
        if self.spawner.poll(self.now).is_none() {
            log::warn!("Spawn trigger at {} was not due", due);
            return;
        }

        let ids = self.spawner.spawn_pair(
            self.now,
            self.state.level,
            &mut self.words,
            &mut self.rng,
            &mut self.registry,
        );
        for id in ids {
            if let Some(ghost) = self.registry.get(id) {
                self.events.push(GameEvent::Spawned {
                    id,
                    word: ghost.word.clone(),
                    side: ghost.side,
                });
            }
        }
    }

    fn fire_expiry(&mut self, due: u64, id: GhostId) {
        self.now = self.now.max(due);
        let now = self.now;
        let fired = match self.registry.get_mut(id) {
            Some(ghost) => ghost.is_active() && ghost.timer_mut().poll(now),
            None => false,
        };
        if fired {
            log::info!("Ghost {} expired before it was typed", id);
            self.terminate(Outcome::TimeExpired);
        }
    }

    fn resolve_collisions(&mut self) {
        let hits = collision::detect(&self.registry, self.target, self.settings.collision_distance);
        for id in hits {
            if self.state.is_over() {
                break;
            }
            let Some(ghost) = self.registry.remove(id, self.now) else {
                continue;
            };
            let defeated = self.progression.lose_life(&mut self.state);
            log::debug!("Ghost {} '{}' reached the target, lives {}", id, ghost.word, self.state.lives);
            self.events.push(GameEvent::Collided {
                id,
                word: ghost.word,
                lives: self.state.lives,
            });
            if let Some(outcome) = defeated {
                self.terminate(outcome);
            }
        }
    }

    // === Player commands ===

    /// Match submitted text against active ghosts. Returns the removed ghost;
    /// unmatched text is discarded.
    pub fn submit_text(&mut self, text: &str) -> Option<GhostId> {
        if self.state.is_over() || self.motion_frozen() {
            return None;
        }

        let Some(id) = matcher::find_match(&self.registry, text) else {
            log::debug!("Discarded input '{}'", matcher::normalize_input(text));
            return None;
        };
        let ghost = self.registry.remove(id, self.now)?;

        let change = self.progression.award_word(&mut self.state);
        log::debug!("Typed '{}' ({}), score {}", ghost.word, id, self.state.score);
        self.events.push(GameEvent::WordTyped {
            id,
            word: ghost.word,
            score: self.state.score,
        });

        match change {
            LevelChange::Unchanged => {}
            LevelChange::Advanced(level) => {
                log::info!("Level up: {}", level);
                self.events.push(GameEvent::LevelUp { level });
            }
            LevelChange::Completed => self.terminate(Outcome::Victory),
        }
        Some(id)
    }

    /// Pause if running, resume if paused
    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver(_) => {}
        }
    }

    /// Suspend the spawner and every expiry timer
    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.spawner.stop();
        for ghost in self.registry.iter_mut() {
            ghost.timer_mut().cancel(self.now);
        }
        self.state.phase = GamePhase::Paused;
        log::info!("Paused with {} ghosts on screen", self.registry.len());
        self.events.push(GameEvent::Paused);
    }

    /// Restart the spawner and the expiry timer of every remaining ghost
    pub fn resume(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        let now = self.now;
        self.spawner.resume(now);
        for ghost in self.registry.iter_mut() {
            match self.settings.resume_policy {
                ResumePolicy::RestartFull => ghost.timer_mut().restart_full(now),
                ResumePolicy::KeepRemaining => ghost.timer_mut().restart_remaining(now),
            }
        }
        if self.settings.freeze_motion_on_pause {
            motion::hold_all(&mut self.registry, now);
        }
        self.state.phase = GamePhase::Running;
        log::info!("Resumed");
        self.events.push(GameEvent::Resumed);
    }

    /// End the run at the player's request
    pub fn stop(&mut self) {
        self.terminate(Outcome::Stopped);
    }

    /// Single transition into the terminal state. Later calls do nothing.
    fn terminate(&mut self, outcome: Outcome) {
        if self.state.is_over() {
            return;
        }
        self.spawner.stop();
        let cleared = self.registry.clear(self.now);
        self.state.phase = GamePhase::GameOver(outcome);

        log::info!(
            "Game over ({}): score {}, level {}, {} ghosts cleared",
            outcome.as_str(),
            self.state.score,
            self.state.level,
            cleared
        );
        if let Some(summary) = self.summary() {
            self.events.push(GameEvent::GameOver(summary));
        }
    }

    // === Presentation ===

    /// Current HUD and ghost positions
    pub fn snapshot(&self) -> HudSnapshot {
        let banner = match self.state.phase {
            GamePhase::Running => BANNER_TEXT.to_string(),
            GamePhase::Paused => "Paused".to_string(),
            GamePhase::GameOver(outcome) => outcome.message().to_string(),
        };
        HudSnapshot {
            player: self.player.clone(),
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives.max(0),
            health: collision::health_fraction(self.state.lives, self.settings.start_lives),
            paused: self.state.is_paused(),
            banner,
            ghosts: self
                .registry
                .iter()
                .map(|g| GhostView {
                    id: g.id,
                    word: g.word.clone(),
                    pos: g.pos,
                    side: g.side,
                    progress: g.progress(self.settings.word_duration_ms),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::timer::TimerState;
    use crate::sim::words::WordQueue;

    /// Quick spawns, no collisions, long expiry
    fn settings() -> Settings {
        Settings {
            word_delay_ms: 1000,
            game_length_ms: 3000,
            word_duration_ms: 100_000,
            first_spawn_delay_ms: 5,
            ..Settings::default()
        }
    }

    fn game(words: &[&str]) -> Game<WordQueue> {
        Game::new(settings(), WordQueue::new(words.iter().copied()), 12345).unwrap()
    }

    fn count_game_overs(events: &[GameEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver(_)))
            .count()
    }

    #[test]
    fn test_first_spawn_after_delay() {
        let mut g = game(&["cat", "dog"]);
        g.tick(4);
        assert!(g.registry().is_empty());
        g.tick(1);
        assert_eq!(g.registry().len(), 2);

        let words: Vec<_> = g.registry().iter().map(|gh| gh.word.as_str()).collect();
        assert_eq!(words, ["cat", "dog"]);
        let spawned = g
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Spawned { .. }))
            .count();
        assert_eq!(spawned, 2);
    }

    #[test]
    fn test_submit_removes_match_and_scores() {
        let mut g = game(&["cat", "dog"]);
        g.tick(5);
        let dog = g.registry().iter().nth(1).unwrap().id;

        let removed = g.submit_text("CAT");
        assert!(removed.is_some());
        assert_eq!(g.state().score, 10);
        assert_eq!(g.state().level, 1);
        assert_eq!(g.registry().ids(), vec![dog]);
        assert!(g.registry().get(dog).unwrap().timer().is_running());
    }

    #[test]
    fn test_unmatched_input_is_discarded() {
        let mut g = game(&["cat", "dog"]);
        g.tick(5);
        assert_eq!(g.submit_text("cow"), None);
        assert_eq!(g.state().score, 0);
        assert_eq!(g.registry().len(), 2);
    }

    #[test]
    fn test_duplicate_words_removed_one_at_a_time() {
        let mut g = game(&["boo", "boo"]);
        g.tick(5);
        let ids = g.registry().ids();

        assert_eq!(g.submit_text("boo"), Some(ids[0]));
        assert_eq!(g.registry().ids(), vec![ids[1]]);
        assert_eq!(g.submit_text("boo"), Some(ids[1]));
        assert!(g.registry().is_empty());
        assert_eq!(g.state().score, 20);
    }

    #[test]
    fn test_expiry_ends_game() {
        let mut g = game(&["cat", "dog"]);
        g.tick(5);
        g.tick(2999);
        assert!(!g.is_over());
        g.tick(1);
        assert_eq!(g.state().outcome(), Some(Outcome::TimeExpired));
        assert!(g.registry().is_empty());
        assert!(!g.spawning());
        assert_eq!(count_game_overs(&g.take_events()), 1);
    }

    #[test]
    fn test_typed_word_timer_cannot_fire() {
        let mut g = Game::new(
            Settings {
                word_delay_ms: 100_000,
                ..settings()
            },
            WordQueue::new(["cat", "dog"]),
            1,
        )
        .unwrap();
        g.tick(5);
        g.submit_text("cat");
        g.submit_text("dog");
        g.tick(10_000);
        assert!(!g.is_over());
    }

    #[test]
    fn test_level_up_queries_new_level() {
        let words: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let mut g = Game::new(settings(), WordQueue::new(words), 7).unwrap();

        // 4 spawn ticks -> 8 ghosts
        g.tick(5);
        for _ in 0..3 {
            g.tick(1000);
            let typed: Vec<String> = g.registry().iter().map(|gh| gh.word.clone()).collect();
            for w in typed {
                g.submit_text(&w);
            }
        }
        g.tick(0);
        let typed: Vec<String> = g.registry().iter().map(|gh| gh.word.clone()).collect();
        for w in typed {
            g.submit_text(&w);
        }
        assert_eq!(g.state().score, 80);
        assert_eq!(g.state().level, 2);

        g.tick(1000);
        assert_eq!(g.words().queried_levels().last(), Some(&2));
    }

    #[test]
    fn test_victory_past_max_level() {
        let mut s = settings();
        s.max_level = 1;
        s.level_score = 20;
        let mut g = Game::new(s, WordQueue::new(["a", "b"]), 1).unwrap();
        g.tick(5);
        g.submit_text("a");
        assert!(!g.is_over());
        g.submit_text("b");
        assert_eq!(g.state().outcome(), Some(Outcome::Victory));
        assert_eq!(g.state().level, 1);
        assert_eq!(g.summary().unwrap().final_score, 20);
    }

    #[test]
    fn test_pause_cancels_and_resume_restarts_full() {
        let mut g = game(&["cat", "dog"]);
        g.tick(5);
        g.tick(1000);
        assert_eq!(g.registry().len(), 4);

        g.toggle_pause();
        assert!(g.state().is_paused());
        assert!(!g.spawning());
        for ghost in g.registry().iter() {
            assert!(matches!(ghost.timer().state(), TimerState::Cancelled { .. }));
        }

        // No expiry or spawn while paused
        g.tick(50_000);
        assert!(!g.is_over());
        assert_eq!(g.registry().len(), 4);

        g.toggle_pause();
        let now = g.now();
        for ghost in g.registry().iter() {
            assert_eq!(ghost.timer().deadline(), Some(now + 3000));
        }
        assert_eq!(g.spawner.next_due(), Some(now + 1000));
    }

    #[test]
    fn test_resume_keep_remaining() {
        let mut s = settings();
        s.resume_policy = ResumePolicy::KeepRemaining;
        let mut g = Game::new(s, WordQueue::new(["cat", "dog"]), 1).unwrap();
        g.tick(5);
        g.tick(1000);
        g.pause();
        g.tick(10_000);
        g.resume();
        let now = g.now();
        let first = g.registry().iter().next().unwrap();
        assert_eq!(first.timer().deadline(), Some(now + 2000));
    }

    #[test]
    fn test_motion_continues_while_paused_by_default() {
        let mut s = settings();
        s.word_duration_ms = 10_000;
        let mut g = Game::new(s, WordQueue::new(["cat", "dog"]), 1).unwrap();
        g.tick(5);
        g.pause();
        let before = g.registry().iter().next().unwrap().pos;
        g.tick(1000);
        let after = g.registry().iter().next().unwrap().pos;
        assert_ne!(before, after);
    }

    #[test]
    fn test_freeze_motion_on_pause() {
        let mut s = settings();
        s.word_duration_ms = 10_000;
        s.freeze_motion_on_pause = true;
        let mut g = Game::new(s, WordQueue::new(["cat", "dog"]), 1).unwrap();
        g.tick(5);
        g.tick(100);
        g.pause();
        let before = g.registry().iter().next().unwrap().pos;
        g.tick(1000);
        assert_eq!(g.registry().iter().next().unwrap().pos, before);
        // Typing is ignored while frozen
        assert_eq!(g.submit_text("cat"), None);

        g.resume();
        g.tick(100);
        assert_eq!(g.registry().iter().next().unwrap().travel_ms, 200);
    }

    #[test]
    fn test_collision_costs_life() {
        let mut s = settings();
        s.word_duration_ms = 500;
        let mut g = Game::new(s, WordQueue::new(["a", "b"]), 1).unwrap();
        g.tick(5);
        g.submit_text("b");
        g.tick(400);
        assert_eq!(g.state().lives, 3);
        g.tick(100);
        assert_eq!(g.state().lives, 2);
        assert!(g.registry().is_empty());
        let snap = g.snapshot();
        assert!((snap.health - 2.0 / 3.0).abs() < 0.0001);
    }

    #[test]
    fn test_collision_before_expiry_in_one_tick() {
        let mut s = settings();
        s.word_duration_ms = 500;
        s.game_length_ms = 600;
        let mut g = Game::new(s, WordQueue::new(["a", "b"]), 1).unwrap();
        g.tick(5);
        // Both ghosts arrive (~500 ms) before their timers would fire (605)
        g.tick(1000);
        assert!(!g.is_over());
        assert_eq!(g.state().lives, 1);
        assert_eq!(g.registry().len(), 2);
    }

    #[test]
    fn test_expiry_before_arrival_in_one_tick() {
        let mut s = settings();
        s.word_duration_ms = 500;
        s.game_length_ms = 400;
        let mut g = Game::new(s, WordQueue::new(["a", "b"]), 1).unwrap();
        g.tick(5);
        g.tick(1000);
        assert_eq!(g.state().outcome(), Some(Outcome::TimeExpired));
        assert_eq!(g.state().lives, 3);
        assert_eq!(g.now(), 405);
    }

    #[test]
    fn test_coarse_tick_matches_fine_ticks() {
        let mut coarse = Game::new(Settings::default(), WordQueue::new(["a", "b"]), 1).unwrap();
        coarse.tick(5);
        coarse.tick(560 * 16);

        let mut fine = Game::new(Settings::default(), WordQueue::new(["a", "b"]), 1).unwrap();
        fine.tick(5);
        for _ in 0..560 {
            fine.tick(16);
        }

        assert_eq!(coarse.state().outcome(), None);
        assert_eq!(coarse.state().outcome(), fine.state().outcome());
        assert_eq!(coarse.state().lives, 1);
        assert_eq!(coarse.state().lives, fine.state().lives);
        assert_eq!(coarse.registry().ids(), fine.registry().ids());
        assert_eq!(coarse.now(), fine.now());
        assert_eq!(coarse.snapshot(), fine.snapshot());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut g = game(&["cat", "dog"]);
        g.tick(5);
        g.stop();
        g.stop();
        assert_eq!(g.state().outcome(), Some(Outcome::Stopped));
        assert!(g.registry().is_empty());
        assert_eq!(count_game_overs(&g.take_events()), 1);
    }

    #[test]
    fn test_terminal_state_is_frozen() {
        let mut g = game(&["cat", "dog", "cow", "pig"]);
        g.tick(5);
        g.stop();
        let now = g.now();

        g.tick(10_000);
        assert_eq!(g.now(), now);
        assert!(g.registry().is_empty());
        assert_eq!(g.submit_text("cow"), None);
        g.toggle_pause();
        assert_eq!(g.state().phase, GamePhase::GameOver(Outcome::Stopped));
        assert_eq!(g.state().score, 0);
    }

    #[test]
    fn test_snapshot_banner() {
        let mut g = game(&["cat", "dog"]).with_player("ellyn");
        assert_eq!(g.snapshot().banner, BANNER_TEXT);
        assert_eq!(g.snapshot().player, "ellyn");
        g.pause();
        assert_eq!(g.snapshot().banner, "Paused");
        g.stop();
        assert_eq!(g.snapshot().banner, Outcome::Stopped.message());
        assert_eq!(g.summary().unwrap().player, "ellyn");
    }

    #[test]
    fn test_determinism() {
        // Two games with the same seed produce identical ghosts
        let mut a = Game::with_dictionary(Settings::default(), 99999).unwrap();
        let mut b = Game::with_dictionary(Settings::default(), 99999).unwrap();
        for dt in [5, 16, 17, 4000, 33, 16] {
            a.tick(dt);
            b.tick(dt);
        }
        let sa = a.snapshot();
        let sb = b.snapshot();
        assert_eq!(sa.ghosts.len(), 4);
        assert_eq!(sa, sb);
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let mut s = Settings::default();
        s.word_delay_ms = 0;
        assert!(Game::with_dictionary(s, 1).is_err());
    }
}
