//! Word supply for spawned ghosts
//!
//! The game only asks for "a word at this level"; which words exist and how
//! they are picked belongs to the source.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies the word carried by each new ghost
pub trait WordSource {
    /// Return a word suitable for the given difficulty level (1-based)
    fn get_word(&mut self, level: u32) -> String;
}

impl<F> WordSource for F
where
    F: FnMut(u32) -> String,
{
    fn get_word(&mut self, level: u32) -> String {
        self(level)
    }
}

/// Built-in word buckets, one per level, getting longer as levels rise
const LEVEL_WORDS: [&[&str]; 7] = [
    &["cat", "dog", "sun", "box", "red", "cup", "map", "fox", "hat", "pen", "owl", "bat"],
    &["ghost", "spook", "night", "candy", "broom", "witch", "moon", "fog", "howl", "crypt"],
    &["shadow", "pumpkin", "lantern", "cobweb", "goblin", "potion", "castle", "raven"],
    &["phantom", "skeleton", "graveyard", "midnight", "cauldron", "werewolf", "haunted"],
    &["apparition", "poltergeist", "candlelight", "moonstruck", "nightshade", "gargoyle"],
    &["spellbinding", "otherworldly", "bewitchment", "necromancer", "hobgoblin"],
    &["phantasmagoria", "supernatural", "incantation", "transfiguration", "ectoplasmic"],
];

/// Default word source with a bucket per level
///
/// Never returns the same word twice in a row. Levels past the last bucket
/// keep drawing from the hardest one.
#[derive(Debug, Clone)]
pub struct WordDictionary {
    rng: Pcg32,
    last: Option<&'static str>,
}

impl WordDictionary {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last: None,
        }
    }

    /// The bucket used for a level
    pub fn bucket(level: u32) -> &'static [&'static str] {
        let idx = (level.max(1) as usize - 1).min(LEVEL_WORDS.len() - 1);
        LEVEL_WORDS[idx]
    }
}

impl WordSource for WordDictionary {
    fn get_word(&mut self, level: u32) -> String {
        let bucket = Self::bucket(level);
        let mut idx = self.rng.random_range(0..bucket.len());
        if bucket.len() > 1 && self.last == Some(bucket[idx]) {
            // Skip to a neighbor instead of rerolling
            idx = (idx + 1 + self.rng.random_range(0..bucket.len() - 1)) % bucket.len();
        }
        let word = bucket[idx];
        self.last = Some(word);
        word.to_string()
    }
}

/// Scripted word source for replays and demos
///
/// Hands out queued words in order, then falls back to a fixed word. Every
/// level it is asked for is recorded.
#[derive(Debug, Clone, Default)]
pub struct WordQueue {
    words: VecDeque<String>,
    fallback: String,
    levels: Vec<u32>,
}

impl WordQueue {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            fallback: "boo".to_string(),
            levels: Vec::new(),
        }
    }

    /// Word used once the queue runs dry
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }

    /// Levels requested so far, oldest first
    pub fn queried_levels(&self) -> &[u32] {
        &self.levels
    }

    pub fn remaining(&self) -> usize {
        self.words.len()
    }
}

impl WordSource for WordQueue {
    fn get_word(&mut self, level: u32) -> String {
        self.levels.push(level);
        self.words
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
