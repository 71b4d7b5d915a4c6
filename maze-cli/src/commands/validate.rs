//! Validate command implementation

use crate::input::{read_stimuli, resolve_patterns};
use anyhow::Result;
use clap::Args;
use maze_core::SentenceSet;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Stimulus files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,
}

/// Counts reported for valid stimuli
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StimulusSummary {
    /// Number of items
    pub items: usize,
    /// Number of sentences
    pub sentences: usize,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        match self.check() {
            Ok(summary) => {
                println!("✓ Stimuli are valid!");
                println!("  Items: {}", summary.items);
                println!("  Sentences: {}", summary.sentences);
                Ok(())
            }
            Err(e) => {
                println!("✗ Stimuli are invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }

    /// Parse and group the stimuli
    pub fn check(&self) -> Result<StimulusSummary> {
        let files = resolve_patterns(&self.input)?;
        let items = SentenceSet::group(read_stimuli(&files)?)?;
        Ok(StimulusSummary {
            items: items.len(),
            sentences: items.iter().map(|item| item.sentences().len()).sum(),
        })
    }
}
