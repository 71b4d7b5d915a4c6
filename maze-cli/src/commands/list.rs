//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use anyhow::Result;
use maze_core::lexicon::{LengthFrequency, LengthOnly};

/// Threshold policies with a one-line description
pub const THRESHOLD_POLICIES: &[(&str, &str)] = &[
    (
        LengthFrequency::NAME,
        "length range of the true words, frequency range from the dictionary",
    ),
    (LengthOnly::NAME, "length range of the true words, any frequency"),
];

/// Print the requested listing
pub fn execute(subcommand: ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::Thresholds => {
            println!("Available threshold policies:");
            for (name, description) in THRESHOLD_POLICIES {
                println!("  {name:<18} {description}");
            }
        }
        ListCommands::Formats => {
            println!("Available output formats:");
            for (format, description) in OutputFormat::ALL {
                println!("  {:<18} {description}", format.name());
            }
        }
    }
    Ok(())
}
