//! Distractor selection for maze-task stimuli
//!
//! In a maze task a reader sees each word of a sentence next to a foil and
//! must pick the word that continues the sentence. This crate chooses those
//! foils ("distractors"): for every labelled position it looks for a word
//! that a masked language model finds far less predictable than the real
//! word, pooling positions that share a label across the sentences of an
//! item so they receive the same distractor.
//!
//! # Architecture
//!
//! - [`Sentence`]: one stimulus sentence, its oracle scores and surprisals
//! - [`LabelGroup`]: all occurrences of one label in an item, and the
//!   selection algorithm
//! - [`SentenceSet`]: an item; builds label groups and writes distractors
//!   back into its sentences
//! - [`RepeatCounter`]: run-wide repeat cap
//! - [`MazeGenerator`]: drives items through the lifecycle
//!
//! Scoring, candidate retrieval and threshold derivation are injected
//! through the traits in [`traits`]. File-backed implementations live in
//! [`scoring`] and [`lexicon`].
//!
//! # Example
//!
//! ```rust
//! use maze_core::lexicon::{LengthOnly, WordFrequencyDictionary};
//! use maze_core::scoring::ScoreTable;
//! use maze_core::{MazeGenerator, Params, Sentence, SentenceSet};
//!
//! let sentence = Sentence::with_positional_labels(
//!     vec!["The".into(), "cat".into(), "sat.".into()],
//!     "1",
//!     "demo",
//! )
//! .unwrap();
//! let mut items = SentenceSet::group(vec![sentence]).unwrap();
//!
//! let mut generator = MazeGenerator::builder()
//!     .oracle(ScoreTable::default())
//!     .candidates(WordFrequencyDictionary::from_entries([("lamp", 4.0), ("desk", 4.0)]))
//!     .thresholds(LengthOnly)
//!     .params(Params::builder().min_abs(2.0).min_delta(1.0).build().unwrap())
//!     .build()
//!     .unwrap();
//! generator.process_all(&mut items, |_| {});
//!
//! assert_eq!(items[0].sentences()[0].distractor_sentence(), "x-x-x lamp desk.");
//! ```

pub mod error;
pub mod generator;
pub mod item;
pub mod label;
pub mod lexicon;
pub mod params;
pub mod punct;
pub mod repeats;
pub mod scoring;
pub mod sentence;
pub mod traits;

pub use error::{MazeError, Result, ScoringError};
pub use generator::{MazeGenerator, MazeGeneratorBuilder};
pub use item::SentenceSet;
pub use label::LabelGroup;
pub use params::Params;
pub use repeats::RepeatCounter;
pub use sentence::Sentence;
pub use traits::{CandidateProvider, Distribution, ScoringOracle, ThresholdPolicy, Thresholds};

/// Label linking positions across the sentences of an item
pub type Label = String;

/// Distractor placeholder for the first word and for labels without a
/// usable candidate
pub const PLACEHOLDER: &str = "x-x-x";
