//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use maze_core::params::defaults;
use maze_core::traits::DEFAULT_MASK_TOKEN;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Point [resources] at your dictionary and score files");
        println!("2. Write the queries to score:");
        println!(
            "   maze masks -i items.txt -c {} -o queries.jsonl",
            self.output.display()
        );
        println!("3. Generate distractors:");
        println!("   maze generate -i items.txt -c {}", self.output.display());

        Ok(())
    }

    /// Template configuration content
    fn template() -> String {
        format!(
            r#"# maze distractor generation settings

[params]
# Every distractor must have at least this surprisal, in bits
min_abs = {min_abs:.1}

# ...and at least this many bits more than the true word
min_delta = {min_delta:.1}

# How often one word may be used across the whole run (0 = unlimited)
max_repeat = {max_repeat}

# Size of the distribution requested per masked query
top_k = {top_k}

# Candidates considered per label
num_to_test = {num_to_test}

# Candidate bounds: "length_frequency" or "length_only"
threshold_name = "{threshold_name}"

[resources]
# Word-frequency list, one `word<TAB>zipf` pair per line, most frequent first
dictionary = "words.tsv"

# Words never used as distractors, one per line (optional)
# exclude = "exclude.txt"

# Fill-mask results, one JSON object per line:
# {{"masked": "the [MASK] sat", "candidates": [{{"token_str": "cat", "score": 0.3}}]}}
scores = "scores.jsonl"

# Mask token of the scoring model
mask_token = "{mask_token}"
"#,
            min_abs = defaults::MIN_ABS,
            min_delta = defaults::MIN_DELTA,
            max_repeat = defaults::MAX_REPEAT,
            top_k = defaults::TOP_K,
            num_to_test = defaults::NUM_TO_TEST,
            threshold_name = defaults::THRESHOLD_NAME,
            mask_token = DEFAULT_MASK_TOKEN,
        )
    }
}
