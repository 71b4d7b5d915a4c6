//! Word-frequency dictionary used as the candidate provider

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::params::Params;
use crate::punct::normalize;
use crate::traits::{CandidateProvider, Thresholds};
use crate::{MazeError, Result};

/// How many times the frequency band is widened when too few words match
pub const MAX_WIDENINGS: usize = 10;

/// Zipf units added to each side of the frequency band per widening
pub const WIDENING_STEP: f64 = 1.0;

/// A vocabulary with Zipf frequencies, in file order
///
/// The file holds one `word<TAB>frequency` pair per line; blank lines and
/// lines starting with `#` are ignored. File order is candidate priority,
/// so lists sorted by descending frequency offer common words first.
#[derive(Debug, Clone, Default)]
pub struct WordFrequencyDictionary {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
    excluded: HashSet<String>,
}

impl WordFrequencyDictionary {
    /// Create a dictionary from `(word, frequency)` pairs
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut dict = Self::default();
        for (word, frequency) in entries {
            dict.push(word.as_ref(), frequency);
        }
        dict
    }

    fn push(&mut self, word: &str, frequency: f64) {
        let word = normalize(word);
        if word.is_empty() || self.index.contains_key(&word) {
            return;
        }
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, frequency));
    }

    /// Parse a tab-separated frequency list
    pub fn from_reader<R: BufRead>(reader: R, source_name: &str) -> Result<Self> {
        let mut dict = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let parse_error = |reason: String| MazeError::Parse {
                source_name: source_name.to_string(),
                line: index + 1,
                reason,
            };
            let mut fields = trimmed.split_whitespace();
            let word = fields
                .next()
                .ok_or_else(|| parse_error("missing word".into()))?;
            let frequency = fields
                .next()
                .ok_or_else(|| parse_error(format!("missing frequency for '{word}'")))?
                .parse::<f64>()
                .map_err(|e| parse_error(format!("bad frequency for '{word}': {e}")))?;
            dict.push(word, frequency);
        }
        log::info!("loaded {} dictionary words from {source_name}", dict.len());
        Ok(dict)
    }

    /// Load a frequency list from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            MazeError::Configuration(format!("cannot open dictionary {}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }

    /// Never offer these words as candidates
    pub fn exclude<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words.into_iter().map(|w| normalize(w.as_ref()));
        self.excluded.extend(words.filter(|w| !w.is_empty()));
    }

    /// Read an exclusion list, one word per line
    pub fn exclude_from_path(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            MazeError::Configuration(format!("cannot open exclusion list {}: {e}", path.display()))
        })?;
        let before = self.excluded.len();
        self.exclude(text.lines().filter(|l| !l.trim_start().starts_with('#')));
        log::info!(
            "excluding {} words from {}",
            self.excluded.len() - before,
            path.display()
        );
        Ok(())
    }

    /// Zipf frequency of a word; unknown words have frequency 0
    pub fn frequency(&self, word: &str) -> f64 {
        self.index
            .get(&normalize(word))
            .map_or(0.0, |&i| self.entries[i].1)
    }

    /// Whether the word is in the vocabulary
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&normalize(word))
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn scan(&self, band: &Thresholds, limit: usize) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(word, frequency)| {
                !self.excluded.contains(word) && band.admits(word.chars().count(), *frequency)
            })
            .map(|(word, _)| word.clone())
            .take(limit)
            .collect()
    }
}

impl CandidateProvider for WordFrequencyDictionary {
    fn candidates(&self, thresholds: &Thresholds, params: &Params) -> Vec<String> {
        let wanted = params.num_to_test;
        let mut band = *thresholds;
        let mut round = 0;
        loop {
            let found = self.scan(&band, wanted);
            if found.len() >= wanted || round == MAX_WIDENINGS {
                return found;
            }
            round += 1;
            band.min_frequency -= WIDENING_STEP;
            band.max_frequency += WIDENING_STEP;
            log::debug!(
                "only {} candidates, widening frequency band to {:.1}..{:.1}",
                found.len(),
                band.min_frequency,
                band.max_frequency
            );
        }
    }
}
