//! A single stimulus sentence

use std::collections::{HashMap, HashSet};

use crate::punct::normalize;
use crate::scoring::surprisal;
use crate::traits::{Distribution, ScoringOracle};
use crate::{Label, MazeError, Result, PLACEHOLDER};

/// One stimulus sentence with its labels, model scores and distractors
#[derive(Debug, Clone)]
pub struct Sentence {
    words: Vec<String>,
    labels: Vec<Label>,
    id: String,
    tag: String,
    probs: HashMap<Label, Distribution>,
    surprisals: HashMap<Label, f64>,
    distractors: Vec<String>,
    distractor_sentence: String,
}

impl Sentence {
    /// Create a sentence record
    ///
    /// # Errors
    /// Fails on an empty sentence, on a word/label count mismatch and on
    /// duplicate labels.
    pub fn new(
        words: Vec<String>,
        labels: Vec<Label>,
        id: impl Into<String>,
        tag: impl Into<String>,
    ) -> Result<Self> {
        let id = id.into();
        if words.is_empty() {
            return Err(MazeError::EmptySentence { id });
        }
        if words.len() != labels.len() {
            return Err(MazeError::LabelCountMismatch {
                sentence: words.join(" "),
                words: words.len(),
                labels: labels.len(),
            });
        }
        let mut seen = HashSet::with_capacity(labels.len());
        if !labels.iter().all(|label| seen.insert(label)) {
            log::error!("duplicate labels on sentence {}", words.join(" "));
            return Err(MazeError::DuplicateLabels {
                sentence: words.join(" "),
            });
        }

        Ok(Self {
            words,
            labels,
            id,
            tag: tag.into(),
            probs: HashMap::new(),
            surprisals: HashMap::new(),
            distractors: vec![PLACEHOLDER.to_string()],
            distractor_sentence: String::new(),
        })
    }

    /// Create a sentence whose labels are its positions `0, 1, 2, ...`
    pub fn with_positional_labels(
        words: Vec<String>,
        id: impl Into<String>,
        tag: impl Into<String>,
    ) -> Result<Self> {
        let labels = (0..words.len()).map(|i| i.to_string()).collect();
        Self::new(words, labels, id, tag)
    }

    /// The sentence tokens
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// One label per token
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Item id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Opaque metadata
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The tokens joined by spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    /// Distractors so far; position 0 always holds the placeholder
    pub fn distractors(&self) -> &[String] {
        &self.distractors
    }

    /// Distractors joined by spaces, available after assignment
    pub fn distractor_sentence(&self) -> &str {
        &self.distractor_sentence
    }

    /// Label at the first position
    pub fn first_label(&self) -> &Label {
        &self.labels[0]
    }

    /// Labels from position 1 on
    pub fn later_labels(&self) -> &[Label] {
        &self.labels[1..]
    }

    /// Oracle distribution stored for `label`
    pub fn distribution(&self, label: &str) -> Option<&Distribution> {
        self.probs.get(label)
    }

    /// Surprisal of the true word at `label`; never set for the first word
    pub fn surprisal(&self, label: &str) -> Option<f64> {
        self.surprisals.get(label).copied()
    }

    /// The sentence with `position` replaced by `mask_token`
    ///
    /// Every other word is lower-cased; the mask token is kept verbatim.
    pub fn masked_text(&self, position: usize, mask_token: &str) -> String {
        self.words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i == position {
                    mask_token.to_string()
                } else {
                    word.to_lowercase()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every `(label, masked text)` pair the oracle is asked about
    pub fn masked_queries(&self, mask_token: &str) -> Vec<(Label, String)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), self.masked_text(i, mask_token)))
            .collect()
    }

    /// Ask the oracle for a distribution at every position
    ///
    /// A failed request leaves an empty distribution for that position only.
    pub fn request_scores(&mut self, oracle: &dyn ScoringOracle, top_k: usize) {
        for (label, masked) in self.masked_queries(oracle.mask_token()) {
            let distribution = oracle.score(&masked, top_k).unwrap_or_else(|e| {
                log::warn!("scoring failed for item {}, label {label}: {e}", self.id);
                Distribution::new()
            });
            self.probs.insert(label, distribution);
        }
    }

    /// Surprisal of each true word after the first
    ///
    /// A word the oracle did not rank gets surprisal 0.
    pub fn record_surprisals(&mut self) {
        for (word, label) in self.words.iter().zip(&self.labels).skip(1) {
            let probability = self
                .probs
                .get(label)
                .and_then(|dist| dist.get(&normalize(word)))
                .copied();
            let value = match probability {
                Some(p) if p > 0.0 => surprisal(p),
                _ => {
                    log::debug!("'{word}' unranked in item {}, label {label}", self.id);
                    0.0
                }
            };
            self.surprisals.insert(label.clone(), value);
        }
    }

    pub(crate) fn reset_distractors(&mut self) {
        self.distractors = vec![PLACEHOLDER.to_string()];
        self.distractor_sentence.clear();
    }

    pub(crate) fn push_distractor(&mut self, distractor: String) {
        self.distractors.push(distractor);
    }

    pub(crate) fn finish_distractors(&mut self) {
        self.distractor_sentence = self.distractors.join(" ");
    }

    /// Drop the oracle distributions
    pub fn release_scratch(&mut self) {
        self.probs = HashMap::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    fn labels(list: &[&str]) -> Vec<Label> {
        list.iter().map(|l| l.to_string()).collect()
    }

    struct FixedOracle;

    impl ScoringOracle for FixedOracle {
        fn score(
            &self,
            masked: &str,
            _top_k: usize,
        ) -> std::result::Result<Distribution, ScoringError> {
            match masked {
                "the [MASK] sat." => Ok(Distribution::from([("cat".to_string(), 0.25)])),
                "the cat [MASK]" => Ok(Distribution::from([("sat".to_string(), 0.5)])),
                other => Err(ScoringError::Backend(format!("no model output for '{other}'"))),
            }
        }
    }

    #[test]
    fn test_new_seeds_placeholder() {
        let s = Sentence::new(words("The cat sat."), labels(&["0", "1", "2"]), "1", "cond").unwrap();
        assert_eq!(s.distractors(), &[PLACEHOLDER]);
        assert_eq!(s.first_label(), "0");
        assert_eq!(s.later_labels(), &["1", "2"]);
        assert_eq!(s.tag(), "cond");
        assert_eq!(s.text(), "The cat sat.");
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let result = Sentence::new(words("The cat sat."), labels(&["0", "1", "1"]), "1", "");
        assert!(matches!(result, Err(MazeError::DuplicateLabels { .. })));
    }

    #[test]
    fn test_label_count_mismatch_rejected() {
        let result = Sentence::new(words("The cat sat."), labels(&["0", "1"]), "1", "");
        assert!(matches!(
            result,
            Err(MazeError::LabelCountMismatch { words: 3, labels: 2, .. })
        ));
    }

    #[test]
    fn test_empty_rejected() {
        let result = Sentence::new(Vec::new(), Vec::new(), "7", "");
        assert!(matches!(result, Err(MazeError::EmptySentence { id }) if id == "7"));
    }

    #[test]
    fn test_positional_labels() {
        let s = Sentence::with_positional_labels(words("a b c"), "1", "").unwrap();
        assert_eq!(s.labels(), &["0", "1", "2"]);
    }

    #[test]
    fn test_masked_text_lowercases_context_only() {
        let s = Sentence::with_positional_labels(words("The Cat sat."), "1", "").unwrap();
        assert_eq!(s.masked_text(1, "[MASK]"), "the [MASK] sat.");
        assert_eq!(s.masked_text(0, "<mask>"), "<mask> cat sat.");
    }

    #[test]
    fn test_scores_and_surprisals() {
        let mut s = Sentence::with_positional_labels(words("The cat sat."), "1", "").unwrap();
        s.request_scores(&FixedOracle, 10);

        // the first query fails and degrades to an empty distribution
        assert_eq!(s.distribution("0").map(|d| d.len()), Some(0));

        s.record_surprisals();
        assert_eq!(s.surprisal("0"), None);
        assert!((s.surprisal("1").unwrap() - 2.0).abs() < 1e-12);
        // "sat." is stripped to "sat" before lookup
        assert!((s.surprisal("2").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_release_scratch() {
        let mut s = Sentence::with_positional_labels(words("The cat sat."), "1", "").unwrap();
        s.request_scores(&FixedOracle, 10);
        s.release_scratch();
        assert!(s.distribution("1").is_none());
    }
}
