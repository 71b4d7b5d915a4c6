//! Output formatting module

use anyhow::Result;
use maze_core::Sentence;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and output a single sentence with its distractors
    fn format_sentence(&mut self, sentence: &Sentence) -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

pub mod delim;
pub mod ibex;

pub use delim::DelimFormatter;
pub use ibex::IbexFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `tag;id;sentence;distractors`, one line per sentence
    Delim,
    /// Ibex/PCIbex Maze items
    Ibex,
}

impl OutputFormat {
    /// Every format with a one-line description
    pub const ALL: &'static [(OutputFormat, &'static str)] = &[
        (OutputFormat::Delim, "semicolon-delimited tag;id;sentence;distractors"),
        (OutputFormat::Ibex, "Ibex/PCIbex Maze item lines"),
    ];

    /// Name used on the command line
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Delim => "delim",
            OutputFormat::Ibex => "ibex",
        }
    }

    /// Build a formatter writing to `writer`
    pub fn formatter<'a, W: Write + 'a>(self, writer: W) -> Box<dyn OutputFormatter + 'a> {
        match self {
            OutputFormat::Delim => Box::new(DelimFormatter::new(writer)),
            OutputFormat::Ibex => Box::new(IbexFormatter::new(writer)),
        }
    }
}
