//! Precomputed fill-mask results
//!
//! A score table answers scoring requests from a JSON-lines file produced by
//! running a masked language model over every query ahead of time:
//!
//! ```text
//! {"masked": "the [MASK] sat down", "candidates": [{"token_str": "cat", "score": 0.31}]}
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::traits::{Distribution, ScoringOracle, DEFAULT_MASK_TOKEN};
use crate::{MazeError, Result};

/// One ranked token of a fill-mask result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredToken {
    /// The token text
    pub token_str: String,
    /// Its probability
    pub score: f64,
}

#[derive(Debug, Deserialize)]
struct TableLine {
    masked: String,
    candidates: Vec<ScoredToken>,
}

/// Scoring oracle backed by precomputed fill-mask results
#[derive(Debug, Clone)]
pub struct ScoreTable {
    mask_token: String,
    entries: HashMap<String, Vec<ScoredToken>>,
}

impl Default for ScoreTable {
    fn default() -> Self {
        Self::new(DEFAULT_MASK_TOKEN)
    }
}

impl ScoreTable {
    /// Create an empty table for queries using `mask_token`
    pub fn new(mask_token: impl Into<String>) -> Self {
        Self {
            mask_token: mask_token.into(),
            entries: HashMap::new(),
        }
    }

    /// Add or replace the result for one masked query
    pub fn insert(&mut self, masked: impl Into<String>, mut candidates: Vec<ScoredToken>) {
        for candidate in &mut candidates {
            candidate.token_str = candidate.token_str.trim().to_string();
        }
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        self.entries.insert(masked.into(), candidates);
    }

    /// Load a table from JSON lines
    ///
    /// `source_name` is used in error messages.
    pub fn from_reader<R: BufRead>(
        reader: R,
        source_name: &str,
        mask_token: impl Into<String>,
    ) -> Result<Self> {
        let mut table = Self::new(mask_token);
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let parse_error = |reason: String| MazeError::Parse {
                source_name: source_name.to_string(),
                line: index + 1,
                reason,
            };
            let parsed: TableLine =
                serde_json::from_str(&line).map_err(|e| parse_error(e.to_string()))?;
            if let Some(bad) = parsed
                .candidates
                .iter()
                .find(|c| !(0.0..=1.0).contains(&c.score))
            {
                return Err(parse_error(format!(
                    "score {} for '{}' is not a probability",
                    bad.score, bad.token_str
                )));
            }
            table.insert(parsed.masked, parsed.candidates);
        }
        log::info!("loaded {} scored queries from {source_name}", table.len());
        Ok(table)
    }

    /// Load a table from a JSON-lines file
    pub fn from_path(path: &Path, mask_token: impl Into<String>) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            MazeError::Configuration(format!("cannot open score table {}: {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(file), &path.display().to_string(), mask_token)
    }

    /// Number of stored queries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoringOracle for ScoreTable {
    fn score(
        &self,
        masked_text: &str,
        top_k: usize,
    ) -> std::result::Result<Distribution, ScoringError> {
        if masked_text.matches(self.mask_token.as_str()).count() != 1 {
            return Err(ScoringError::MalformedQuery(masked_text.to_string()));
        }
        let ranked = self
            .entries
            .get(masked_text)
            .ok_or_else(|| ScoringError::UnknownQuery(masked_text.to_string()))?;

        let mut distribution = Distribution::with_capacity(top_k.min(ranked.len()));
        for token in ranked.iter().take(top_k) {
            distribution
                .entry(token.token_str.clone())
                .or_insert(token.score);
        }
        Ok(distribution)
    }

    fn mask_token(&self) -> &str {
        &self.mask_token
    }
}
