//! Semicolon-delimited output formatter

use super::OutputFormatter;
use anyhow::Result;
use maze_core::Sentence;
use std::io::Write;

/// Writes `tag;id;sentence;distractor_sentence` per sentence
pub struct DelimFormatter<W: Write> {
    writer: W,
}

impl<W: Write> DelimFormatter<W> {
    /// Create a new delimited formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for DelimFormatter<W> {
    fn format_sentence(&mut self, sentence: &Sentence) -> Result<()> {
        writeln!(
            self.writer,
            "{};{};{};{}",
            sentence.tag(),
            sentence.id(),
            sentence.text(),
            sentence.distractor_sentence()
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
