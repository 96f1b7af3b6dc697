//! Game state and the types handed to the presentation layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ghost::{GhostId, SpawnSide};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Spawning, timers and motion all live
    Running,
    /// Spawner and expiry timers suspended
    Paused,
    /// Run ended; nothing changes anymore
    GameOver(Outcome),
}

/// Why the run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A ghost's expiry timer fired before its word was typed
    TimeExpired,
    /// Lives ran out
    Defeated,
    /// Cleared the last level
    Victory,
    /// Player stopped the game
    Stopped,
}

impl Outcome {
    /// Stable reason code
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::TimeExpired => "time-expired",
            Outcome::Defeated => "defeated",
            Outcome::Victory => "victory",
            Outcome::Stopped => "stopped",
        }
    }

    /// Banner text shown after the run
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::TimeExpired => "Time's up! A ghost got away.",
            Outcome::Defeated => "The ghosts got you!",
            Outcome::Victory => "You cleared every level!",
            Outcome::Stopped => "Game stopped.",
        }
    }
}

/// Score, level and health for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// 1-based level, never above the configured maximum
    pub level: u32,
    /// May dip below zero only within the tick that ends the game
    pub lives: i32,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(start_lives: i32) -> Self {
        Self {
            score: 0,
            level: 1,
            lives: start_lives,
            phase: GamePhase::Running,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            GamePhase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

/// Final result handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub outcome: Outcome,
    pub final_score: u32,
    pub final_level: u32,
    pub player: String,
}

/// Something that happened during a tick or command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned {
        id: GhostId,
        word: String,
        side: SpawnSide,
    },
    WordTyped {
        id: GhostId,
        word: String,
        score: u32,
    },
    Collided {
        id: GhostId,
        word: String,
        lives: i32,
    },
    LevelUp {
        level: u32,
    },
    Paused,
    Resumed,
    GameOver(GameSummary),
}

/// A ghost as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GhostView {
    pub id: GhostId,
    pub word: String,
    pub pos: Vec2,
    pub side: SpawnSide,
    /// Fraction of the path to the target covered, 0..=1
    pub progress: f32,
}

/// Everything the HUD and play field need for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub player: String,
    pub score: u32,
    pub level: u32,
    /// Clamped to zero for display
    pub lives: i32,
    /// Health bar fill, 0..=1
    pub health: f32,
    pub paused: bool,
    pub banner: String,
    pub ghosts: Vec<GhostView>,
}

impl HudSnapshot {
    pub fn score_label(&self) -> String {
        format!("Current Score: {}", self.score)
    }

    pub fn level_label(&self) -> String {
        format!("Level: {}", self.level)
    }

    pub fn player_label(&self) -> String {
        format!("Username: {}", self.player)
    }
}
