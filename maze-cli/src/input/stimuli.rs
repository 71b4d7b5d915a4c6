//! Stimulus file parsing
//!
//! One sentence per line, `tag;id;sentence[;labels]`. Missing labels
//! default to the word positions.

use super::FileReader;
use crate::error::CliError;
use anyhow::{Context, Result};
use maze_core::Sentence;
use std::path::Path;

const FIELD_SEPARATOR: char = ';';

/// Parse stimulus text; `source_name` appears in error messages
pub fn parse_stimuli(text: &str, source_name: &str) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let malformed = |reason: &str| CliError::MalformedLine {
            file: source_name.to_string(),
            line: line_no,
            reason: reason.to_string(),
        };

        let fields: Vec<&str> = line.splitn(4, FIELD_SEPARATOR).map(str::trim).collect();
        if fields.len() < 3 {
            return Err(malformed("expected at least 3 fields (tag;id;sentence)").into());
        }
        let (tag, id, text) = (fields[0], fields[1], fields[2]);
        if id.is_empty() {
            return Err(malformed("empty item id").into());
        }

        let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        let sentence = match fields.get(3).filter(|labels| !labels.is_empty()) {
            Some(labels) => {
                let labels = labels.split_whitespace().map(str::to_string).collect();
                Sentence::new(words, labels, id, tag)
            }
            None => Sentence::with_positional_labels(words, id, tag),
        };
        let sentence = sentence.with_context(|| format!("{source_name}:{line_no}"))?;
        sentences.push(sentence);
    }

    log::debug!("Parsed {} sentences from {source_name}", sentences.len());
    Ok(sentences)
}

/// Read and parse stimulus files in order
pub fn read_stimuli<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let text = FileReader::read_text(path)?;
        sentences.extend(parse_stimuli(&text, &FileReader::display_name(path))?);
    }
    Ok(sentences)
}
