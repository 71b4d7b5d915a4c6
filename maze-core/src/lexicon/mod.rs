//! Candidate vocabulary and threshold policies

pub mod dictionary;
pub mod thresholds;

pub use dictionary::WordFrequencyDictionary;
pub use thresholds::{by_name as threshold_policy, LengthFrequency, LengthOnly, POLICY_NAMES};
