//! Collaborator contracts consumed by the engine
//!
//! The engine does not model language or hold a vocabulary. It asks a
//! [`ScoringOracle`] for fill-mask distributions, a [`ThresholdPolicy`] for
//! candidate bounds and a [`CandidateProvider`] for the candidates
//! themselves.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ScoringError;
use crate::params::Params;

/// Word to probability mapping returned by a scoring oracle
pub type Distribution = HashMap<String, f64>;

/// Default mask token, as used by BERT-style models
pub const DEFAULT_MASK_TOKEN: &str = "[MASK]";

/// Masked language model scoring
pub trait ScoringOracle {
    /// Score a sentence in which exactly one position has been replaced by
    /// [`mask_token`](Self::mask_token)
    ///
    /// Returns at most `top_k` entries. A word missing from the result is
    /// unknown to the oracle, not an error.
    fn score(&self, masked_text: &str, top_k: usize) -> Result<Distribution, ScoringError>;

    /// Token that marks the scored position
    fn mask_token(&self) -> &str {
        DEFAULT_MASK_TOKEN
    }
}

/// Length and frequency bounds for candidate retrieval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Shortest acceptable candidate, in characters
    pub min_length: usize,
    /// Longest acceptable candidate, in characters
    pub max_length: usize,
    /// Lowest acceptable frequency
    pub min_frequency: f64,
    /// Highest acceptable frequency
    pub max_frequency: f64,
}

impl Thresholds {
    /// Whether a word of this length and frequency falls inside the bounds
    pub fn admits(&self, length: usize, frequency: f64) -> bool {
        (self.min_length..=self.max_length).contains(&length)
            && frequency >= self.min_frequency
            && frequency <= self.max_frequency
    }
}

/// Derives candidate bounds from the true words at one label
pub trait ThresholdPolicy {
    /// Policy name as used in configuration files
    fn name(&self) -> &str;

    /// Bounds for candidates replacing `words`
    fn thresholds(&self, words: &[String]) -> Thresholds;
}

/// Supplies distractor candidates
pub trait CandidateProvider {
    /// Candidates within `thresholds`, best first
    ///
    /// The order is a priority: the first candidate that meets every
    /// surprisal target is chosen.
    fn candidates(&self, thresholds: &Thresholds, params: &Params) -> Vec<String>;
}

impl<T: CandidateProvider + ?Sized> CandidateProvider for Arc<T> {
    fn candidates(&self, thresholds: &Thresholds, params: &Params) -> Vec<String> {
        (**self).candidates(thresholds, params)
    }
}
