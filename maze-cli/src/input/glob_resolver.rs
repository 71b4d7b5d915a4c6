//! File pattern resolution using glob

use crate::error::CliError;
use anyhow::{Context, Result};
use glob::glob;
use std::collections::HashSet;
use std::path::PathBuf;

/// Resolve file patterns to actual file paths
///
/// Files keep the order of the patterns that named them; a file matched
/// by several patterns is only listed once.
pub fn resolve_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for pattern in patterns {
        let paths = glob(pattern)
            .map_err(|_| CliError::InvalidPattern(pattern.clone()))
            .with_context(|| format!("Invalid glob pattern: {pattern}"))?;

        for path_result in paths {
            let path = path_result.with_context(|| format!("Error resolving pattern: {pattern}"))?;

            if path.is_file() && seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    if files.is_empty() {
        return Err(CliError::NoInputFiles.into());
    }

    Ok(files)
}
