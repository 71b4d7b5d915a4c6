//! Generate command implementation

use super::init_logging;
use crate::config::MazeConfig;
use crate::error::CliError;
use crate::input::{read_stimuli, resolve_patterns};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use maze_core::lexicon::{threshold_policy, WordFrequencyDictionary};
use maze_core::scoring::ScoreTable;
use maze_core::{MazeGenerator, SentenceSet};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Arguments for the generate command
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Stimulus files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "delim")]
    pub format: OutputFormat,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Precomputed fill-mask scores (JSON lines)
    #[arg(long, value_name = "FILE")]
    pub scores: Option<PathBuf>,

    /// Word-frequency list
    #[arg(long, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Words never used as distractors
    #[arg(long, value_name = "FILE")]
    pub exclude: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.quiet, self.verbose);

        log::info!("Starting distractor generation");
        log::debug!("Arguments: {self:?}");

        let config = self.load_config()?;
        let mut generator = build_generator(&config)?;

        let files = resolve_patterns(&self.input)?;
        log::info!("Reading {} stimulus file(s)", files.len());
        let mut items = SentenceSet::group(read_stimuli(&files)?)?;

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_items(items.len() as u64);
        generator.process_all(&mut items, |item| progress.item_completed(item.id()));
        progress.finish();

        log::info!("Writing {} items as {}", items.len(), self.format.name());

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                write_items(&items, self.format, BufWriter::new(file))
            }
            None => write_items(&items, self.format, BufWriter::new(io::stdout().lock())),
        }
    }

    /// Configuration file values with command-line overrides applied
    fn load_config(&self) -> Result<MazeConfig> {
        let mut config = MazeConfig::load_or_default(self.config.as_deref())?;
        let resources = &mut config.resources;
        for (flag, slot) in [
            (&self.scores, &mut resources.scores),
            (&self.dictionary, &mut resources.dictionary),
            (&self.exclude, &mut resources.exclude),
        ] {
            if flag.is_some() {
                slot.clone_from(flag);
            }
        }
        Ok(config)
    }
}

fn required<'a>(path: &'a Option<PathBuf>, what: &str, flag: &str) -> Result<&'a Path> {
    path.as_deref().ok_or_else(|| {
        CliError::ConfigError(format!(
            "no {what} given; pass {flag} or set it under [resources]"
        ))
        .into()
    })
}

/// Load resources and assemble the generator
pub fn build_generator(config: &MazeConfig) -> Result<MazeGenerator> {
    let resources = &config.resources;

    let mut dictionary = WordFrequencyDictionary::from_path(required(
        &resources.dictionary,
        "dictionary",
        "--dictionary",
    )?)?;
    if let Some(exclude) = &resources.exclude {
        dictionary.exclude_from_path(exclude)?;
    }
    let dictionary = Arc::new(dictionary);

    let scores = ScoreTable::from_path(
        required(&resources.scores, "score file", "--scores")?,
        resources.mask_token.as_str(),
    )?;

    let policy = threshold_policy(&config.params.threshold_name, Arc::clone(&dictionary))?;
    let generator = MazeGenerator::builder()
        .oracle(scores)
        .candidates(dictionary)
        .boxed_thresholds(policy)
        .params(config.params.clone())
        .build()?;
    Ok(generator)
}

/// Write every sentence item by item
pub fn write_items<W: Write>(items: &[SentenceSet], format: OutputFormat, writer: W) -> Result<()> {
    let mut formatter = format.formatter(writer);
    for item in items {
        for sentence in item.sentences() {
            formatter.format_sentence(sentence)?;
        }
    }
    formatter.finish()
}
