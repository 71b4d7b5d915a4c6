//! Configuration module

use anyhow::{Context, Result};
use maze_core::traits::DEFAULT_MASK_TOKEN;
use maze_core::Params;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct MazeConfig {
    /// Selection parameters
    #[serde(default)]
    pub params: Params,

    /// Resource files
    #[serde(default)]
    pub resources: ResourceConfig,
}

/// Resource file locations
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Word-frequency list (`word<TAB>zipf`)
    pub dictionary: Option<PathBuf>,

    /// Words never offered as distractors
    pub exclude: Option<PathBuf>,

    /// Precomputed fill-mask results (JSON lines)
    pub scores: Option<PathBuf>,

    /// Mask token of the scoring model
    pub mask_token: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            exclude: None,
            scores: None,
            mask_token: DEFAULT_MASK_TOKEN.to_string(),
        }
    }
}

impl MazeConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: MazeConfig = toml::from_str(text).context("Failed to parse configuration")?;
        config.params.validate()?;
        Ok(config)
    }

    /// Load a configuration file; relative resource paths are taken
    /// relative to the file's directory
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config = Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.resources.resolve_relative(base);
        }
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

impl ResourceConfig {
    fn resolve_relative(&mut self, base: &Path) {
        for path in [&mut self.dictionary, &mut self.exclude, &mut self.scores]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = MazeConfig::default();
        assert_eq!(config.params, Params::default());
        assert_eq!(config.resources.mask_token, "[MASK]");
        assert!(config.resources.dictionary.is_none());
    }

    #[test]
    fn test_parse_sections() {
        let config = MazeConfig::from_toml_str(
            r#"
[params]
min_abs = 5.0
max_repeat = 2
threshold_name = "length_only"

[resources]
dictionary = "words.tsv"
mask_token = "<mask>"
"#,
        )
        .unwrap();
        assert_eq!(config.params.min_abs, 5.0);
        assert_eq!(config.params.max_repeat, 2);
        assert_eq!(config.params.threshold_name, "length_only");
        assert_eq!(config.resources.dictionary, Some(PathBuf::from("words.tsv")));
        assert_eq!(config.resources.mask_token, "<mask>");
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = MazeConfig::from_toml_str("[params]\ntop_k = 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("maze.toml");
        fs::write(
            &path,
            "[resources]\ndictionary = \"words.tsv\"\nscores = \"/abs/scores.jsonl\"\n",
        )
        .unwrap();

        let config = MazeConfig::load(&path).unwrap();
        assert_eq!(
            config.resources.dictionary,
            Some(dir.path().join("words.tsv"))
        );
        assert_eq!(
            config.resources.scores,
            Some(PathBuf::from("/abs/scores.jsonl"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = MazeConfig::load(Path::new("/nonexistent/maze.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
