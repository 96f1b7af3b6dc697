//! Score, level and lives progression
//!
//! Level-ups happen when the score lands exactly on a multiple of the level
//! step. Going past the last level ends the run as a victory.

use super::state::{GameState, Outcome};

/// Result of a level check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelChange {
    /// Score is not on a level boundary
    Unchanged,
    /// Moved up to this level
    Advanced(u32),
    /// Passed the final level
    Completed,
}

/// Progression rules for one run
#[derive(Debug, Clone, Copy)]
pub struct Progression {
    pub level_score: u32,
    pub max_level: u32,
    pub score_per_word: u32,
}

impl Progression {
    /// Add the per-word score and run the level check
    pub fn award_word(&self, state: &mut GameState) -> LevelChange {
        state.score += self.score_per_word;
        self.level_check(state)
    }

    /// Advance the level if the score sits exactly on a level boundary.
    /// The level stays at `max_level` when the run is completed.
    pub fn level_check(&self, state: &mut GameState) -> LevelChange {
        if state.score == 0 || state.score % self.level_score != 0 {
            return LevelChange::Unchanged;
        }
        let next = state.level + 1;
        if next > self.max_level {
            LevelChange::Completed
        } else {
            state.level = next;
            LevelChange::Advanced(next)
        }
    }

    /// Take one life. Returns the defeat outcome once lives run out.
    pub fn lose_life(&self, state: &mut GameState) -> Option<Outcome> {
        state.lives -= 1;
        (state.lives <= 0).then_some(Outcome::Defeated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Progression {
        Progression {
            level_score: 80,
            max_level: 7,
            score_per_word: 10,
        }
    }

    #[test]
    fn test_level_up_on_exact_multiple() {
        let rules = rules();
        let mut state = GameState::new(3);
        for _ in 0..7 {
            assert_eq!(rules.award_word(&mut state), LevelChange::Unchanged);
        }
        assert_eq!(state.score, 70);
        assert_eq!(rules.award_word(&mut state), LevelChange::Advanced(2));
        assert_eq!(state.level, 2);
        assert_eq!(rules.award_word(&mut state), LevelChange::Unchanged);
    }

    #[test]
    fn test_not_threshold_based() {
        let rules = rules();
        let mut state = GameState::new(3);
        state.score = 85;
        assert_eq!(rules.level_check(&mut state), LevelChange::Unchanged);
        state.score = 160;
        assert_eq!(rules.level_check(&mut state), LevelChange::Advanced(2));
    }

    #[test]
    fn test_completed_past_max_level() {
        let rules = rules();
        let mut state = GameState::new(3);
        state.level = 7;
        state.score = 550;
        assert_eq!(rules.award_word(&mut state), LevelChange::Completed);
        assert_eq!(state.level, 7);
        assert_eq!(state.score, 560);
    }

    #[test]
    fn test_lose_life() {
        let rules = rules();
        let mut state = GameState::new(3);
        assert_eq!(rules.lose_life(&mut state), None);
        assert_eq!(rules.lose_life(&mut state), None);
        assert_eq!(rules.lose_life(&mut state), Some(Outcome::Defeated));
        assert_eq!(state.lives, 0);
    }
}
