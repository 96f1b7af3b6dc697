//! Deterministic game-loop core
//!
//! All gameplay logic lives here. This module must stay free of rendering:
//! - Game clock in integer milliseconds, advanced only by `Game::tick`
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod game;
pub mod ghost;
pub mod matcher;
pub mod motion;
pub mod progression;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod timer;
pub mod words;

pub use game::Game;
pub use ghost::{Ghost, GhostId, SpawnSide};
pub use progression::{LevelChange, Progression};
pub use registry::GhostRegistry;
pub use spawn::SpawnScheduler;
pub use state::{GameEvent, GamePhase, GameState, GameSummary, GhostView, HudSnapshot, Outcome};
pub use timer::{ExpiryTimer, SpawnTimer, TimerState};
pub use words::{WordDictionary, WordQueue, WordSource};
