//! Error types for the distractor engine
//!
//! Only structural problems with the stimuli or the configuration are
//! errors. Failing to find a distractor that meets the surprisal thresholds
//! is a degraded outcome that is logged, never returned.

use thiserror::Error;

/// Engine-level errors
#[derive(Debug, Error)]
pub enum MazeError {
    /// A sentence uses the same label at more than one position
    #[error("duplicate labels on sentence '{sentence}'")]
    DuplicateLabels {
        /// The offending sentence text
        sentence: String,
    },

    /// Words and labels are not parallel
    #[error("sentence '{sentence}' has {words} words but {labels} labels")]
    LabelCountMismatch {
        /// The offending sentence text
        sentence: String,
        /// Number of words
        words: usize,
        /// Number of labels
        labels: usize,
    },

    /// A sentence without words
    #[error("empty sentence in item {id}")]
    EmptySentence {
        /// The item id of the sentence
        id: String,
    },

    /// A sentence was added to an item with a different id
    #[error("sentence id '{found}' does not match item id '{expected}'")]
    IdMismatch {
        /// The id of the item
        expected: String,
        /// The id of the rejected sentence
        found: String,
    },

    /// A first-word label is also used at a later position in the same item
    #[error("labels of first words cannot match labels of later words in item {id}: {labels:?}")]
    LabelCollision {
        /// The item id
        id: String,
        /// The colliding labels
        labels: Vec<String>,
    },

    /// A parameter is out of range
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// Collaborator or resource configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Malformed resource file content
    #[error("parse error in {source_name} line {line}: {reason}")]
    Parse {
        /// File or resource name
        source_name: String,
        /// 1-based line number
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure of a single scoring request
///
/// Scoring failures are recovered from: the position gets an empty
/// distribution and therefore a surprisal of 0.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The oracle has no answer for this masked text
    #[error("no scores for query '{0}'")]
    UnknownQuery(String),

    /// The masked text does not contain exactly one mask token
    #[error("query must contain exactly one mask token: '{0}'")]
    MalformedQuery(String),

    /// Failure inside an oracle that runs a model, such as a crashed
    /// inference process or a dropped connection
    #[error("scoring backend failed: {0}")]
    Backend(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, MazeError>;
