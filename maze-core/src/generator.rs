//! Drives items through scoring and distractor selection

use std::fmt;

use crate::item::SentenceSet;
use crate::params::Params;
use crate::repeats::RepeatCounter;
use crate::traits::{CandidateProvider, ScoringOracle, ThresholdPolicy};
use crate::{MazeError, Result};

/// Runs the whole selection pipeline over a sequence of items
///
/// Items are processed strictly one at a time. The generator owns the
/// run's [`RepeatCounter`], so every item sees the choices of all earlier
/// items.
pub struct MazeGenerator {
    oracle: Box<dyn ScoringOracle>,
    candidates: Box<dyn CandidateProvider>,
    thresholds: Box<dyn ThresholdPolicy>,
    params: Params,
    repeats: RepeatCounter,
}

impl fmt::Debug for MazeGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MazeGenerator")
            .field("threshold_policy", &self.thresholds.name())
            .field("params", &self.params)
            .field("repeats", &self.repeats)
            .finish_non_exhaustive()
    }
}

impl MazeGenerator {
    /// Create a generator builder
    pub fn builder() -> MazeGeneratorBuilder {
        MazeGeneratorBuilder::default()
    }

    /// The selection parameters
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The run-wide repeat counter
    pub fn repeats(&self) -> &RepeatCounter {
        &self.repeats
    }

    /// Take one item through its full lifecycle
    pub fn process_item(&mut self, item: &mut SentenceSet) {
        log::debug!(
            "processing item {} ({} sentences)",
            item.id(),
            item.sentences().len()
        );
        item.run_model(self.oracle.as_ref(), self.params.top_k);
        item.compute_surprisals();
        item.build_label_groups();
        item.assign_distractors(
            self.candidates.as_ref(),
            self.thresholds.as_ref(),
            &self.params,
            &mut self.repeats,
        );
        item.release_scratch_state();
    }

    /// Process items in order, calling `on_item` after each one
    pub fn process_all<F>(&mut self, items: &mut [SentenceSet], mut on_item: F)
    where
        F: FnMut(&SentenceSet),
    {
        for item in items.iter_mut() {
            self.process_item(item);
            on_item(item);
        }
        log::info!(
            "processed {} items, {} distractors emitted, {} banned",
            items.len(),
            self.repeats.history().len(),
            self.repeats.banned().len()
        );
    }
}

/// Builder for [`MazeGenerator`]
#[derive(Default)]
pub struct MazeGeneratorBuilder {
    oracle: Option<Box<dyn ScoringOracle>>,
    candidates: Option<Box<dyn CandidateProvider>>,
    thresholds: Option<Box<dyn ThresholdPolicy>>,
    params: Option<Params>,
}

impl MazeGeneratorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scoring oracle
    pub fn oracle(mut self, oracle: impl ScoringOracle + 'static) -> Self {
        self.oracle = Some(Box::new(oracle));
        self
    }

    /// Set the candidate provider
    pub fn candidates(mut self, provider: impl CandidateProvider + 'static) -> Self {
        self.candidates = Some(Box::new(provider));
        self
    }

    /// Set the threshold policy
    pub fn thresholds(mut self, policy: impl ThresholdPolicy + 'static) -> Self {
        self.thresholds = Some(Box::new(policy));
        self
    }

    /// Set an already boxed threshold policy, as returned by a name lookup
    pub fn boxed_thresholds(mut self, policy: Box<dyn ThresholdPolicy>) -> Self {
        self.thresholds = Some(policy);
        self
    }

    /// Set the parameters (defaults otherwise)
    pub fn params(mut self, params: Params) -> Self {
        self.params = Some(params);
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<MazeGenerator> {
        let missing = |what: &str| MazeError::Configuration(format!("no {what} configured"));
        let params = self.params.unwrap_or_default();
        params.validate()?;

        Ok(MazeGenerator {
            oracle: self.oracle.ok_or_else(|| missing("scoring oracle"))?,
            candidates: self.candidates.ok_or_else(|| missing("candidate provider"))?,
            thresholds: self.thresholds.ok_or_else(|| missing("threshold policy"))?,
            repeats: RepeatCounter::new(params.max_repeat),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{LengthOnly, WordFrequencyDictionary};
    use crate::scoring::ScoreTable;

    #[test]
    fn test_build_requires_collaborators() {
        let result = MazeGenerator::builder()
            .oracle(ScoreTable::default())
            .thresholds(LengthOnly)
            .build();
        assert!(matches!(
            result,
            Err(MazeError::Configuration(msg)) if msg.contains("candidate provider")
        ));
    }

    #[test]
    fn test_build_validates_params() {
        let mut params = Params::default();
        params.top_k = 0;
        let result = MazeGenerator::builder()
            .oracle(ScoreTable::default())
            .candidates(WordFrequencyDictionary::default())
            .thresholds(LengthOnly)
            .params(params)
            .build();
        assert!(matches!(result, Err(MazeError::InvalidParameter { .. })));
    }

    #[test]
    fn test_repeat_cap_comes_from_params() {
        let generator = MazeGenerator::builder()
            .oracle(ScoreTable::default())
            .candidates(WordFrequencyDictionary::default())
            .thresholds(LengthOnly)
            .params(Params::builder().max_repeat(3).build().unwrap())
            .build()
            .unwrap();
        assert_eq!(generator.repeats().max_repeat(), 3);
        assert_eq!(generator.params().max_repeat, 3);
    }

    #[test]
    fn test_debug_shows_params_and_policy() {
        let generator = MazeGenerator::builder()
            .oracle(ScoreTable::default())
            .candidates(WordFrequencyDictionary::default())
            .thresholds(LengthOnly)
            .build()
            .unwrap();
        let debug = format!("{generator:?}");
        assert!(debug.contains("MazeGenerator"));
        assert!(debug.contains("length_only"));
        assert!(debug.contains("max_repeat"));
    }
}
