//! Run-wide tracking of emitted distractors

use std::collections::{HashMap, HashSet};

/// Tracks every distractor emitted during a run and bans words that have
/// reached the repeat cap
///
/// The counter is owned by a single driver and mutated only through
/// `&mut self`; items are processed one after another so each item sees
/// the selections of all earlier items.
#[derive(Debug, Clone, Default)]
pub struct RepeatCounter {
    max_repeat: usize,
    history: Vec<String>,
    counts: HashMap<String, usize>,
    banned: HashSet<String>,
}

impl RepeatCounter {
    /// Create a counter; `max_repeat == 0` means unlimited reuse
    pub fn new(max_repeat: usize) -> Self {
        Self {
            max_repeat,
            ..Self::default()
        }
    }

    /// Record one emission of `word`
    pub fn increment(&mut self, word: &str) {
        self.history.push(word.to_string());
        let count = self.counts.entry(word.to_string()).or_insert(0);
        *count += 1;

        if self.max_repeat > 0 && *count >= self.max_repeat && self.banned.insert(word.to_string())
        {
            log::debug!("'{word}' reached the repeat cap of {}", self.max_repeat);
        }
    }

    /// Words that may no longer be chosen
    pub fn banned(&self) -> &HashSet<String> {
        &self.banned
    }

    /// Whether `word` has reached the cap
    pub fn is_banned(&self, word: &str) -> bool {
        self.banned.contains(word)
    }

    /// How often `word` has been emitted
    pub fn count(&self, word: &str) -> usize {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Every emission, in order
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The configured cap
    pub fn max_repeat(&self) -> usize {
        self.max_repeat
    }
}
