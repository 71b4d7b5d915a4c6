//! Items: sentences that share an id and are solved together

use std::collections::{HashMap, HashSet};

use crate::label::LabelGroup;
use crate::params::Params;
use crate::punct::copy_punct;
use crate::repeats::RepeatCounter;
use crate::sentence::Sentence;
use crate::traits::{CandidateProvider, ScoringOracle, ThresholdPolicy};
use crate::{Label, MazeError, Result, PLACEHOLDER};

/// A set of sentences with the same item id
///
/// Lifecycle: [`add`](Self::add) sentences, [`run_model`](Self::run_model),
/// [`compute_surprisals`](Self::compute_surprisals),
/// [`build_label_groups`](Self::build_label_groups),
/// [`assign_distractors`](Self::assign_distractors), then
/// [`release_scratch_state`](Self::release_scratch_state).
#[derive(Debug, Clone)]
pub struct SentenceSet {
    id: String,
    sentences: Vec<Sentence>,
    first_labels: HashSet<Label>,
    later_labels: Vec<Label>,
    later_seen: HashSet<Label>,
    label_groups: Vec<LabelGroup>,
    group_index: HashMap<Label, usize>,
}

impl SentenceSet {
    /// Create an empty item
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sentences: Vec::new(),
            first_labels: HashSet::new(),
            later_labels: Vec::new(),
            later_seen: HashSet::new(),
            label_groups: Vec::new(),
            group_index: HashMap::new(),
        }
    }

    /// Group sentences into items by id
    ///
    /// Items appear in the order their id is first seen; sentences keep
    /// their relative order.
    pub fn group(sentences: impl IntoIterator<Item = Sentence>) -> Result<Vec<SentenceSet>> {
        let mut items: Vec<SentenceSet> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for sentence in sentences {
            let index = *positions.entry(sentence.id().to_string()).or_insert_with(|| {
                items.push(SentenceSet::new(sentence.id()));
                items.len() - 1
            });
            items[index].add(sentence)?;
        }
        Ok(items)
    }

    /// The item id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Member sentences in insertion order
    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    /// Labels used after the first position, in discovery order
    pub fn later_labels(&self) -> &[Label] {
        &self.later_labels
    }

    /// Label groups, in discovery order; empty outside the selection phase
    pub fn label_groups(&self) -> &[LabelGroup] {
        &self.label_groups
    }

    /// The chosen distractor for `label`, while label groups exist
    pub fn distractor_for(&self, label: &str) -> Option<&str> {
        self.group_index
            .get(label)
            .and_then(|&i| self.label_groups[i].chosen_distractor())
    }

    /// Add a sentence
    ///
    /// # Errors
    /// Fails if the sentence id differs from the item id, or if a
    /// first-word label would also be used at a later position. A rejected
    /// sentence leaves the item unchanged.
    pub fn add(&mut self, sentence: Sentence) -> Result<()> {
        if sentence.id() != self.id {
            log::error!("ID '{}' doesn't match item '{}'", sentence.id(), self.id);
            return Err(MazeError::IdMismatch {
                expected: self.id.clone(),
                found: sentence.id().to_string(),
            });
        }

        let first = sentence.first_label();
        let mut collisions: Vec<Label> = Vec::new();
        if self.later_seen.contains(first) {
            collisions.push(first.clone());
        }
        for label in sentence.later_labels() {
            if self.first_labels.contains(label) {
                collisions.push(label.clone());
            }
        }
        if !collisions.is_empty() {
            log::error!(
                "labels of first words cannot match labels of later words in item {}",
                self.id
            );
            return Err(MazeError::LabelCollision {
                id: self.id.clone(),
                labels: collisions,
            });
        }

        self.first_labels.insert(first.clone());
        for label in sentence.later_labels() {
            if self.later_seen.insert(label.clone()) {
                self.later_labels.push(label.clone());
            }
        }
        self.sentences.push(sentence);
        Ok(())
    }

    /// Score every sentence
    pub fn run_model(&mut self, oracle: &dyn ScoringOracle, top_k: usize) {
        for sentence in &mut self.sentences {
            sentence.request_scores(oracle, top_k);
        }
    }

    /// Compute true-word surprisals in every sentence
    pub fn compute_surprisals(&mut self) {
        for sentence in &mut self.sentences {
            sentence.record_surprisals();
        }
    }

    /// Regroup later positions across sentences by label
    pub fn build_label_groups(&mut self) {
        self.label_groups = self
            .later_labels
            .iter()
            .map(|label| LabelGroup::new(self.id.clone(), label.clone()))
            .collect();
        self.group_index = self
            .later_labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();

        for sentence in &self.sentences {
            for (word, label) in sentence.words().iter().zip(sentence.labels()).skip(1) {
                let group = &mut self.label_groups[self.group_index[label]];
                let distribution = sentence.distribution(label).cloned().unwrap_or_default();
                let surprisal = sentence.surprisal(label).unwrap_or(0.0);
                group.add_occurrence(word, distribution, surprisal);
            }
        }
    }

    /// Choose a distractor per label and write them back into the sentences
    ///
    /// Labels are solved in discovery order. Each choice is banned for the
    /// rest of this item and reported to `repeats`. Distractors from an
    /// earlier call are replaced.
    pub fn assign_distractors(
        &mut self,
        provider: &dyn CandidateProvider,
        policy: &dyn ThresholdPolicy,
        params: &Params,
        repeats: &mut RepeatCounter,
    ) {
        let mut banned = repeats.banned().clone();
        for group in &mut self.label_groups {
            let word = group.select_distractor(provider, policy, params, &banned);
            if word != PLACEHOLDER {
                repeats.increment(&word);
            }
            banned.insert(word);
        }

        for sentence in &mut self.sentences {
            let assigned: Vec<String> = sentence
                .words()
                .iter()
                .zip(sentence.labels())
                .skip(1)
                .map(|(word, label)| {
                    let chosen = self
                        .group_index
                        .get(label)
                        .and_then(|&i| self.label_groups[i].chosen_distractor())
                        .unwrap_or(PLACEHOLDER);
                    copy_punct(word, chosen)
                })
                .collect();
            sentence.reset_distractors();
            for distractor in assigned {
                sentence.push_distractor(distractor);
            }
            sentence.finish_distractors();
        }
    }

    /// Drop label groups and oracle distributions
    pub fn release_scratch_state(&mut self) {
        self.label_groups = Vec::new();
        self.group_index = HashMap::new();
        for sentence in &mut self.sentences {
            sentence.release_scratch();
        }
    }
}
