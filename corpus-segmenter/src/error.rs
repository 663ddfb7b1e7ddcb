use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmentError {
    #[error("Structured export not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Structured export is not valid JSON: {}: {source}", .path.display())]
    MalformedSource {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read source {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No sources configured. Provide an export file or at least one text file.")]
    NoSources,

    #[error("Invalid marker rule '{name}': {source}")]
    InvalidRule {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SegmentError>;
