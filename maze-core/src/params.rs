//! Selection parameters

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// Default parameter values
pub mod defaults {
    /// Minimum absolute surprisal of a distractor, in bits
    pub const MIN_ABS: f64 = 21.0;

    /// Minimum surprisal margin over the true word, in bits
    pub const MIN_DELTA: f64 = 10.0;

    /// Repeat cap (0 = unlimited)
    pub const MAX_REPEAT: usize = 0;

    /// Distribution size requested from the oracle (BERT base vocabulary)
    pub const TOP_K: usize = 30522;

    /// Candidates requested per label
    pub const NUM_TO_TEST: usize = 100;

    /// Threshold policy name
    pub const THRESHOLD_NAME: &str = "length_frequency";
}

/// Parameters steering distractor selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Floor for every surprisal target
    pub min_abs: f64,
    /// Margin added to the true word's surprisal
    pub min_delta: f64,
    /// How often a word may be emitted across the run (0 = unlimited)
    pub max_repeat: usize,
    /// Distribution size requested from the oracle
    pub top_k: usize,
    /// Candidates requested from the provider per label
    pub num_to_test: usize,
    /// Name of the threshold policy
    pub threshold_name: String,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_abs: defaults::MIN_ABS,
            min_delta: defaults::MIN_DELTA,
            max_repeat: defaults::MAX_REPEAT,
            top_k: defaults::TOP_K,
            num_to_test: defaults::NUM_TO_TEST,
            threshold_name: defaults::THRESHOLD_NAME.to_string(),
        }
    }
}

impl Params {
    /// Create a parameter builder
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder::default()
    }

    /// Parse and validate parameters from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let params: Params = toml::from_str(text)
            .map_err(|e| MazeError::Configuration(format!("invalid parameters: {e}")))?;
        params.validate()?;
        Ok(params)
    }

    /// Minimum acceptable distractor surprisal for a true word
    pub fn surprisal_target(&self, true_surprisal: f64) -> f64 {
        self.min_abs.max(true_surprisal + self.min_delta)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if !self.min_abs.is_finite() || self.min_abs < 0.0 {
            return Err(MazeError::InvalidParameter {
                name: "min_abs",
                reason: format!("must be a finite number >= 0, got {}", self.min_abs),
            });
        }
        if !self.min_delta.is_finite() {
            return Err(MazeError::InvalidParameter {
                name: "min_delta",
                reason: format!("must be finite, got {}", self.min_delta),
            });
        }
        if self.top_k == 0 {
            return Err(MazeError::InvalidParameter {
                name: "top_k",
                reason: "must be greater than 0".into(),
            });
        }
        if self.num_to_test == 0 {
            return Err(MazeError::InvalidParameter {
                name: "num_to_test",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

/// Fluent builder for [`Params`]
#[derive(Debug, Default)]
pub struct ParamsBuilder {
    params: Option<Params>,
}

impl ParamsBuilder {
    fn params(&mut self) -> &mut Params {
        self.params.get_or_insert_with(Params::default)
    }

    /// Set the absolute surprisal floor
    pub fn min_abs(mut self, bits: f64) -> Self {
        self.params().min_abs = bits;
        self
    }

    /// Set the surprisal margin
    pub fn min_delta(mut self, bits: f64) -> Self {
        self.params().min_delta = bits;
        self
    }

    /// Set the repeat cap
    pub fn max_repeat(mut self, count: usize) -> Self {
        self.params().max_repeat = count;
        self
    }

    /// Set the oracle distribution size
    pub fn top_k(mut self, k: usize) -> Self {
        self.params().top_k = k;
        self
    }

    /// Set the number of candidates per label
    pub fn num_to_test(mut self, n: usize) -> Self {
        self.params().num_to_test = n;
        self
    }

    /// Set the threshold policy name
    pub fn threshold_name(mut self, name: impl Into<String>) -> Self {
        self.params().threshold_name = name.into();
        self
    }

    /// Validate and build
    pub fn build(self) -> Result<Params> {
        let params = self.params.unwrap_or_default();
        params.validate()?;
        Ok(params)
    }
}
