//! Key Frenzy - A real-time arcade typing game core
//!
//! Core modules:
//! - `sim`: Deterministic game loop (ghosts, timers, collisions, progression)
//! - `driver`: Event-loop driver and the presentation-layer seam
//! - `settings`: Data-driven game tuning

pub mod driver;
pub mod settings;
pub mod sim;

pub use driver::{Command, GameLoop, Presenter};
pub use settings::{ResumePolicy, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Interval between ghost spawns (ms)
    pub const WORD_DELAY_MS: u64 = 4000;
    /// Time a ghost may stay alive before the game ends (ms)
    pub const GAME_LENGTH_MS: u64 = 8000;
    /// Time for a ghost to travel from the screen edge to the target (ms)
    pub const WORD_DURATION_MS: u64 = 7000;
    /// Delay before the first pair of ghosts appears (ms)
    pub const FIRST_SPAWN_DELAY_MS: u64 = 5;

    /// Score step that triggers a level-up
    pub const LEVEL_SCORE: u32 = 80;
    /// Highest playable level; exceeding it wins the game
    pub const MAX_LEVEL: u32 = 7;
    /// Points for each typed word
    pub const SCORE_PER_WORD: u32 = 10;
    /// Lives at game start
    pub const START_LIVES: i32 = 3;

    /// Distance at which a ghost reaches the target
    pub const COLLISION_DISTANCE: f32 = 10.0;

    /// Play field dimensions
    pub const PANE_WIDTH: f32 = 750.0;
    pub const PANE_HEIGHT: f32 = 570.0;
    /// How far off-screen ghosts spawn
    pub const SPAWN_OFFSET: f32 = 50.0;

    /// Driver substep (ms) and cap per frame to prevent spiral of death
    pub const SIM_STEP_MS: u64 = 8;
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Instruction shown while the game runs
    pub const BANNER_TEXT: &str = "Type words on ghosts to destroy them!";
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Linear interpolation between two points, `t` clamped to [0, 1]
#[inline]
pub fn lerp_clamped(from: Vec2, to: Vec2, t: f32) -> Vec2 {
    from.lerp(to, t.clamp(0.0, 1.0))
}
