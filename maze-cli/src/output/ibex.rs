//! Ibex/PCIbex Maze output formatter

use super::OutputFormatter;
use anyhow::Result;
use maze_core::Sentence;
use std::io::Write;

/// Writes one `[["tag", id], "Maze", {s:..., a:...}],` line per sentence
pub struct IbexFormatter<W: Write> {
    writer: W,
}

impl<W: Write> IbexFormatter<W> {
    /// Create a new Ibex formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

/// Numeric ids stay bare so Ibex can treat them as item numbers
fn ibex_id(id: &str) -> Result<String> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(id.to_string())
    } else {
        Ok(serde_json::to_string(id)?)
    }
}

impl<W: Write> OutputFormatter for IbexFormatter<W> {
    fn format_sentence(&mut self, sentence: &Sentence) -> Result<()> {
        writeln!(
            self.writer,
            "[[{}, {}], \"Maze\", {{s:{}, a:{}}}],",
            serde_json::to_string(sentence.tag())?,
            ibex_id(sentence.id())?,
            serde_json::to_string(&sentence.text())?,
            serde_json::to_string(sentence.distractor_sentence())?
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
