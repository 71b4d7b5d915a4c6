//! Cross-sentence label groups and distractor selection

use std::collections::HashSet;

use crate::params::Params;
use crate::punct::normalize;
use crate::scoring::surprisal;
use crate::traits::{CandidateProvider, Distribution, ThresholdPolicy};
use crate::{Label, PLACEHOLDER};

/// Surprisal assigned to a candidate the oracle did not rank
pub const ABSENT_SURPRISAL: f64 = 1e5;

/// Every occurrence of one label across the sentences of an item
///
/// All occurrences share a single distractor.
#[derive(Debug, Clone)]
pub struct LabelGroup {
    id: String,
    label: Label,
    words: Vec<String>,
    distributions: Vec<Distribution>,
    surprisals: Vec<f64>,
    surprisal_targets: Vec<f64>,
    chosen: Option<String>,
}

impl LabelGroup {
    /// Create an empty group for `label` in item `id`
    pub fn new(id: impl Into<String>, label: impl Into<Label>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            words: Vec::new(),
            distributions: Vec::new(),
            surprisals: Vec::new(),
            surprisal_targets: Vec::new(),
            chosen: None,
        }
    }

    /// Append one occurrence
    pub fn add_occurrence(&mut self, word: &str, distribution: Distribution, surprisal: f64) {
        self.words.push(word.to_string());
        self.distributions.push(distribution);
        self.surprisals.push(surprisal);
    }

    /// The label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// True words, one per occurrence
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// True-word surprisals, one per occurrence
    pub fn surprisals(&self) -> &[f64] {
        &self.surprisals
    }

    /// Minimum distractor surprisal per occurrence, set by selection
    pub fn surprisal_targets(&self) -> &[f64] {
        &self.surprisal_targets
    }

    /// The selected distractor, once selection has run
    pub fn chosen_distractor(&self) -> Option<&str> {
        self.chosen.as_deref()
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the group has no occurrences
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Choose one distractor for every occurrence of this label
    ///
    /// The first candidate (in provider order) whose surprisal meets the
    /// target at every occurrence wins. Otherwise the candidate with the
    /// highest minimum surprisal is used, and if no candidate beats zero the
    /// placeholder is returned. Words in `banned` and the true words
    /// themselves are never chosen. This never fails; shortfalls are logged.
    pub fn select_distractor(
        &mut self,
        provider: &dyn CandidateProvider,
        policy: &dyn ThresholdPolicy,
        params: &Params,
        banned: &HashSet<String>,
    ) -> String {
        self.surprisal_targets = self
            .surprisals
            .iter()
            .map(|&s| params.surprisal_target(s))
            .collect();

        let thresholds = policy.thresholds(&self.words);
        let candidates = provider.candidates(&thresholds, params);
        log::trace!(
            "item {}, label {}: {} candidates for {:?}",
            self.id,
            self.label,
            candidates.len(),
            thresholds
        );

        let avoid: HashSet<String> = self.words.iter().map(|w| normalize(w)).collect();

        let mut best_word: &str = PLACEHOLDER;
        let mut best_min = 0.0;
        for candidate in &candidates {
            if banned.contains(candidate) || avoid.contains(candidate) {
                continue;
            }

            let mut meets_all = true;
            let mut weakest = f64::INFINITY;
            for (dist, &target) in self.distributions.iter().zip(&self.surprisal_targets) {
                let value = dist
                    .get(candidate)
                    .map_or(ABSENT_SURPRISAL, |&p| surprisal(p));
                // NaN from an invalid probability never meets a target
                if value.is_nan() || value < target {
                    meets_all = false;
                }
                weakest = if value.is_nan() {
                    f64::NEG_INFINITY
                } else {
                    weakest.min(value)
                };
            }

            if meets_all {
                log::debug!(
                    "item {}, label {}: chose '{candidate}'",
                    self.id,
                    self.label
                );
                self.chosen = Some(candidate.clone());
                return candidate.clone();
            }
            if weakest > best_min {
                best_min = weakest;
                best_word = candidate.as_str();
            }
        }

        log::warn!(
            "could not find a word to meet threshold for item {}, label {}, returning {} with {:.3} min surprisal instead",
            self.id,
            self.label,
            best_word,
            best_min
        );
        let word = best_word.to_string();
        self.chosen = Some(word.clone());
        word
    }
}
