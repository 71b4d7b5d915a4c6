//! Threshold policies selectable by name

use std::sync::Arc;

use crate::lexicon::WordFrequencyDictionary;
use crate::punct::normalize;
use crate::traits::{ThresholdPolicy, Thresholds};
use crate::{MazeError, Result};

/// Length that short and long words are stretched to include
pub const PIVOT_LENGTH: usize = 4;

/// Names accepted by [`by_name`]
pub const POLICY_NAMES: &[&str] = &[LengthFrequency::NAME, LengthOnly::NAME];

fn length_band(words: &[String]) -> (usize, usize) {
    let lengths = words.iter().map(|w| normalize(w).chars().count());
    let (shortest, longest) = lengths.fold((usize::MAX, 0), |(lo, hi), len| {
        (lo.min(len), hi.max(len))
    });
    (shortest.min(PIVOT_LENGTH), longest.max(PIVOT_LENGTH))
}

/// Match candidates on length and on dictionary frequency
#[derive(Debug, Clone)]
pub struct LengthFrequency {
    dictionary: Arc<WordFrequencyDictionary>,
}

impl LengthFrequency {
    /// Configuration name
    pub const NAME: &'static str = "length_frequency";

    /// Create the policy over `dictionary`
    pub fn new(dictionary: Arc<WordFrequencyDictionary>) -> Self {
        Self { dictionary }
    }
}

impl ThresholdPolicy for LengthFrequency {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn thresholds(&self, words: &[String]) -> Thresholds {
        let (min_length, max_length) = length_band(words);
        let (min_frequency, max_frequency) = words
            .iter()
            .map(|w| self.dictionary.frequency(w))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
                (lo.min(f), hi.max(f))
            });
        Thresholds {
            min_length,
            max_length,
            min_frequency,
            max_frequency,
        }
    }
}

/// Match candidates on length only
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthOnly;

impl LengthOnly {
    /// Configuration name
    pub const NAME: &'static str = "length_only";
}

impl ThresholdPolicy for LengthOnly {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn thresholds(&self, words: &[String]) -> Thresholds {
        let (min_length, max_length) = length_band(words);
        Thresholds {
            min_length,
            max_length,
            min_frequency: f64::NEG_INFINITY,
            max_frequency: f64::INFINITY,
        }
    }
}

/// Look up a threshold policy by configuration name
pub fn by_name(
    name: &str,
    dictionary: Arc<WordFrequencyDictionary>,
) -> Result<Box<dyn ThresholdPolicy>> {
    match name {
        LengthFrequency::NAME => Ok(Box::new(LengthFrequency::new(dictionary))),
        LengthOnly::NAME => Ok(Box::new(LengthOnly)),
        other => Err(MazeError::Configuration(format!(
            "unknown threshold policy '{other}', expected one of {POLICY_NAMES:?}"
        ))),
    }
}
