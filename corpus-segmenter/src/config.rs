//! Segmenter configuration: source locations, output layout, rule labels.

use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_OUTPUT_DIR: &str = "chapters";
const DEFAULT_SEPARATOR: &str = "\n\n";
const DEFAULT_PAD_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Structured chat export. Required to exist when set.
    #[serde(default)]
    pub export_path: Option<PathBuf>,

    /// Plain-text sources, concatenated after the export in this order.
    /// Missing files are skipped.
    #[serde(default)]
    pub text_paths: Vec<PathBuf>,

    /// Directory receiving the per-chapter files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Inserted between consecutive source fragments
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Minimum digit count of the chapter number in file names
    #[serde(default = "default_pad_width")]
    pub pad_width: usize,

    /// Labels recognised by the book-name marker rules
    #[serde(default = "default_book_names")]
    pub book_names: Vec<String>,

    /// Drop export chunks flagged as model thoughts
    #[serde(default)]
    pub skip_thoughts: bool,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_pad_width() -> usize {
    DEFAULT_PAD_WIDTH
}

fn default_book_names() -> Vec<String> {
    vec!["Book".to_string()]
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            export_path: None,
            text_paths: Vec::new(),
            output_dir: default_output_dir(),
            separator: default_separator(),
            pad_width: default_pad_width(),
            book_names: default_book_names(),
            skip_thoughts: false,
        }
    }
}

impl SegmenterConfig {
    /// Load config from a TOML file. Unlike the sources it names, the config
    /// file itself must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SegmentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: SegmenterConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Render the config as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Whether any source is configured
    pub fn has_sources(&self) -> bool {
        self.export_path.is_some() || !self.text_paths.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if self.book_names.iter().any(|name| name.trim().is_empty()) {
            return Err(SegmentError::Config(
                "book_names must not contain empty labels".to_string(),
            ));
        }
        if self.pad_width > 9 {
            return Err(SegmentError::Config(format!(
                "pad_width {} is out of range (0-9)",
                self.pad_width
            )));
        }
        Ok(())
    }
}
