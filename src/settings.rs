//! Game settings and tuning
//!
//! Loaded from a JSON file at startup; any field left out keeps its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// What an expiry timer does when the game resumes from pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ResumePolicy {
    /// Restart with the full duration (elapsed progress is discarded)
    #[default]
    RestartFull,
    /// Continue with whatever time was left when paused
    KeepRemaining,
}

impl ResumePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumePolicy::RestartFull => "restart-full",
            ResumePolicy::KeepRemaining => "keep-remaining",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "restart-full" | "restart" | "full" => Some(ResumePolicy::RestartFull),
            "keep-remaining" | "keep" | "remaining" => Some(ResumePolicy::KeepRemaining),
            _ => None,
        }
    }
}

/// Errors from loading or validating settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Settings file could not be read or written
    #[error("settings i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for `Settings`
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing (milliseconds) ===
    /// Interval between spawns
    pub word_delay_ms: u64,
    /// Expiry timer duration for each ghost
    pub game_length_ms: u64,
    /// Travel time from the spawn point to the target
    pub word_duration_ms: u64,
    /// Delay before the first spawn
    pub first_spawn_delay_ms: u64,

    // === Progression ===
    pub level_score: u32,
    pub max_level: u32,
    pub score_per_word: u32,
    pub start_lives: i32,

    // === Geometry ===
    pub collision_distance: f32,
    pub pane_width: f32,
    pub pane_height: f32,
    pub spawn_offset: f32,

    // === Driver ===
    pub sim_step_ms: u64,
    pub max_substeps: u32,

    // === Pause behavior ===
    /// How expiry timers restart after pause
    pub resume_policy: ResumePolicy,
    /// Stop ghost motion (and collisions) while paused
    pub freeze_motion_on_pause: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            word_delay_ms: WORD_DELAY_MS,
            game_length_ms: GAME_LENGTH_MS,
            word_duration_ms: WORD_DURATION_MS,
            first_spawn_delay_ms: FIRST_SPAWN_DELAY_MS,

            level_score: LEVEL_SCORE,
            max_level: MAX_LEVEL,
            score_per_word: SCORE_PER_WORD,
            start_lives: START_LIVES,

            collision_distance: COLLISION_DISTANCE,
            pane_width: PANE_WIDTH,
            pane_height: PANE_HEIGHT,
            spawn_offset: SPAWN_OFFSET,

            sim_step_ms: SIM_STEP_MS,
            max_substeps: MAX_SUBSTEPS,

            resume_policy: ResumePolicy::RestartFull,
            freeze_motion_on_pause: false,
        }
    }
}

impl Settings {
    /// Check every value is usable by the game loop
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            Err(SettingsError::Invalid { field, reason })
        }

        if self.word_delay_ms == 0 {
            return invalid("word_delay_ms", "must be greater than zero");
        }
        if self.game_length_ms == 0 {
            return invalid("game_length_ms", "must be greater than zero");
        }
        if self.word_duration_ms == 0 {
            return invalid("word_duration_ms", "must be greater than zero");
        }
        if self.level_score == 0 {
            return invalid("level_score", "must be greater than zero");
        }
        if self.max_level == 0 {
            return invalid("max_level", "must be at least 1");
        }
        if self.score_per_word == 0 {
            return invalid("score_per_word", "must be greater than zero");
        }
        if self.start_lives <= 0 {
            return invalid("start_lives", "must be at least 1");
        }
        if !(self.collision_distance >= 0.0) {
            return invalid("collision_distance", "must not be negative");
        }
        if !(self.pane_width > 0.0) {
            return invalid("pane_width", "must be positive");
        }
        if !(self.pane_height > 0.0) {
            return invalid("pane_height", "must be positive");
        }
        if self.sim_step_ms == 0 {
            return invalid("sim_step_ms", "must be greater than zero");
        }
        if self.max_substeps == 0 {
            return invalid("max_substeps", "must be at least 1");
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
