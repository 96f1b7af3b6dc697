//! Key Frenzy headless demo
//!
//! Runs the game loop on simulated frames with an autoplay typist and logs
//! everything the presentation layer would receive.
//!
//! Usage: `key-frenzy [settings.json] [seed] [resume-policy]`

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use key_frenzy::sim::{Game, GameEvent, GameSummary, GhostId, HudSnapshot};
use key_frenzy::{Command, GameLoop, Presenter, ResumePolicy, Settings};

/// Simulated frame length (~60 Hz)
const FRAME_MS: f64 = 16.0;
/// Hard stop for the demo (simulated ms)
const DEMO_LIMIT_MS: f64 = 10.0 * 60.0 * 1000.0;

/// Logs what a renderer would draw
#[derive(Default)]
struct LogPresenter {
    last_hud: Option<HudSnapshot>,
}

impl Presenter for LogPresenter {
    fn present(&mut self, hud: &HudSnapshot) {
        self.last_hud = Some(hud.clone());
    }

    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Spawned { id, word, side } => {
                log::info!("{} '{}' enters from the {}", id, word, side.as_str())
            }
            GameEvent::WordTyped { word, score, .. } => {
                log::info!("Typed '{}' -> score {}", word, score)
            }
            GameEvent::Collided { word, lives, .. } => {
                log::warn!("'{}' reached the center, lives left {}", word, lives)
            }
            GameEvent::LevelUp { level } => log::info!("Level {}!", level),
            GameEvent::Paused => log::info!("Paused"),
            GameEvent::Resumed => log::info!("Resumed"),
            GameEvent::GameOver(summary) => log::info!("Game over: {}", summary.outcome.as_str()),
        }
    }

    fn game_over(&mut self, summary: &GameSummary) {
        println!(
            "{} finished: {} (score {}, level {})",
            summary.player,
            summary.outcome.message(),
            summary.final_score,
            summary.final_level
        );
    }
}

/// Types the oldest ghost's word after a reaction delay, with the odd typo
struct Autoplay {
    rng: Pcg32,
    first_seen: HashMap<GhostId, f64>,
    reaction_ms: f64,
    typo_chance: f64,
}

impl Autoplay {
    fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed ^ 0x5eed),
            first_seen: HashMap::new(),
            reaction_ms: 1200.0,
            typo_chance: 0.15,
        }
    }

    fn decide(&mut self, hud: &HudSnapshot, clock_ms: f64) -> Option<Command> {
        if hud.paused {
            return None;
        }
        self.first_seen
            .retain(|id, _| hud.ghosts.iter().any(|g| g.id == *id));
        for ghost in &hud.ghosts {
            self.first_seen.entry(ghost.id).or_insert(clock_ms);
        }

        let oldest = hud.ghosts.first()?;
        let seen = self.first_seen.get(&oldest.id).copied().unwrap_or(clock_ms);
        if clock_ms - seen < self.reaction_ms {
            return None;
        }
        // Re-arm so the next attempt waits another reaction delay
        self.first_seen.insert(oldest.id, clock_ms - self.reaction_ms * 0.5);

        let text = if self.rng.random_bool(self.typo_chance) {
            format!("{}x", oldest.word)
        } else {
            oldest.word.to_uppercase()
        };
        Some(Command::Submit(text))
    }
}

fn main() {
    env_logger::init();
    log::info!("Key Frenzy (headless) starting...");

    let args: Vec<String> = std::env::args().collect();
    let mut settings = match args.get(1) {
        Some(path) => Settings::load(path).unwrap_or_else(|e| {
            log::error!("{}; using default settings", e);
            Settings::default()
        }),
        None => Settings::default(),
    };
    let seed = args
        .get(2)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });

    if let Some(name) = args.get(3) {
        match ResumePolicy::from_str(name) {
            Some(policy) => settings.resume_policy = policy,
            None => log::warn!("Unknown resume policy '{}', keeping {}", name, settings.resume_policy.as_str()),
        }
    }
    log::info!("Seed {}, resume policy {}", seed, settings.resume_policy.as_str());

    let game = match Game::with_dictionary(settings, seed) {
        Ok(game) => game.with_player("autoplay"),
        Err(e) => {
            log::error!("Cannot start game: {}", e);
            std::process::exit(1);
        }
    };

    let (mut game_loop, commands) = GameLoop::new(game, LogPresenter::default());
    let mut bot = Autoplay::new(seed);
    let mut clock_ms = 0.0;

    while game_loop.frame(FRAME_MS) {
        clock_ms += FRAME_MS;
        if clock_ms >= DEMO_LIMIT_MS {
            log::info!("Demo time limit reached");
            // The loop owns the receiver, so sending cannot fail here
            commands.send(Command::Stop).ok();
            continue;
        }
        let command = game_loop
            .presenter()
            .last_hud
            .as_ref()
            .and_then(|hud| bot.decide(hud, clock_ms));
        if let Some(command) = command {
            commands.send(command).ok();
        }
    }
}
