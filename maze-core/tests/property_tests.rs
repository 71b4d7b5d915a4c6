//! Property tests for punctuation handling, repeat limits and selection

use std::collections::HashSet;

use maze_core::label::LabelGroup;
use maze_core::lexicon::LengthOnly;
use maze_core::punct::{copy_punct, normalize, strip_punct};
use maze_core::{CandidateProvider, Distribution, Params, RepeatCounter, Thresholds, PLACEHOLDER};
use proptest::prelude::*;

struct ListProvider(Vec<String>);

impl CandidateProvider for ListProvider {
    fn candidates(&self, _thresholds: &Thresholds, _params: &Params) -> Vec<String> {
        self.0.clone()
    }
}

proptest! {
    #[test]
    fn strip_is_idempotent(word in "\\PC{0,12}") {
        let once = strip_punct(&word);
        prop_assert_eq!(strip_punct(once), once);
    }

    #[test]
    fn copied_punctuation_survives_stripping(
        lead in "[\"(\\[]{0,2}",
        core in "[a-z]{1,8}",
        trail in "[.,!?;:)\\]\"]{0,3}",
        distractor in "[a-z]{1,8}",
    ) {
        let word = format!("{lead}{core}{trail}");
        let copied = copy_punct(&word, &distractor);
        prop_assert_eq!(copied, format!("{lead}{distractor}{trail}"));
    }

    #[test]
    fn unlimited_counter_never_bans(words in prop::collection::vec("[a-c]", 0..40)) {
        let mut counter = RepeatCounter::new(0);
        for w in &words {
            counter.increment(w);
        }
        prop_assert!(counter.banned().is_empty());
        prop_assert_eq!(counter.history().len(), words.len());
    }

    #[test]
    fn capped_counter_bans_exactly_words_at_cap(
        cap in 1usize..4,
        words in prop::collection::vec("[a-d]", 0..40),
    ) {
        let mut counter = RepeatCounter::new(cap);
        for w in &words {
            counter.increment(w);
        }
        for w in ["a", "b", "c", "d"] {
            prop_assert_eq!(counter.is_banned(w), counter.count(w) >= cap);
        }
    }

    #[test]
    fn selection_respects_bans_and_true_words(
        candidates in prop::collection::vec("[a-f]{1,2}", 0..12),
        banned in prop::collection::hash_set("[a-f]{1,2}", 0..6),
        true_word in "[a-f]{1,2}",
        probs in prop::collection::vec(0.01f64..1.0, 12),
    ) {
        let distribution: Distribution = candidates
            .iter()
            .cloned()
            .zip(probs.iter().copied())
            .collect();
        let mut group = LabelGroup::new("1", "1");
        group.add_occurrence(&true_word, distribution, 0.5);

        let params = Params::builder().min_abs(2.0).min_delta(1.0).build().unwrap();
        let chosen = group.select_distractor(
            &ListProvider(candidates.clone()),
            &LengthOnly,
            &params,
            &banned,
        );

        let eligible: HashSet<&String> = candidates
            .iter()
            .filter(|c| !banned.contains(*c) && **c != true_word)
            .collect();
        // every probability is below 1, so any eligible candidate beats the placeholder
        prop_assert_eq!(chosen == PLACEHOLDER, eligible.is_empty());
        if chosen != PLACEHOLDER {
            prop_assert!(candidates.contains(&chosen));
            prop_assert!(!banned.contains(&chosen));
            prop_assert_ne!(normalize(&chosen), normalize(&true_word));
        }
    }
}
