//! Masks command implementation
//!
//! Writes the masked queries the generator will look up, so a language
//! model can score them offline into a score table.

use super::init_logging;
use crate::config::MazeConfig;
use crate::input::{read_stimuli, resolve_patterns};
use anyhow::{Context, Result};
use clap::Args;
use maze_core::SentenceSet;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the masks command
#[derive(Debug, Args)]
pub struct MasksArgs {
    /// Stimulus files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file (for the mask token)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// One query line
#[derive(Debug, Serialize)]
struct MaskQuery<'a> {
    id: &'a str,
    label: &'a str,
    masked: &'a str,
}

impl MasksArgs {
    /// Execute the masks command
    pub fn execute(&self) -> Result<()> {
        init_logging(false, 0);

        let config = MazeConfig::load_or_default(self.config.as_deref())?;
        let files = resolve_patterns(&self.input)?;
        let items = SentenceSet::group(read_stimuli(&files)?)?;

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                write_masks(&items, &config.resources.mask_token, BufWriter::new(file))
            }
            None => write_masks(
                &items,
                &config.resources.mask_token,
                BufWriter::new(io::stdout().lock()),
            ),
        }
    }
}

/// Write every masked query as a JSON line
pub fn write_masks<W: Write>(items: &[SentenceSet], mask_token: &str, mut writer: W) -> Result<()> {
    let mut count = 0usize;
    for item in items {
        for sentence in item.sentences() {
            for (label, masked) in sentence.masked_queries(mask_token) {
                let query = MaskQuery {
                    id: item.id(),
                    label: &label,
                    masked: &masked,
                };
                serde_json::to_writer(&mut writer, &query)?;
                writeln!(writer)?;
                count += 1;
            }
        }
    }
    writer.flush()?;
    log::info!("Wrote {count} masked queries");
    Ok(())
}
