//! Source loading: chat exports and plain-text files joined into one corpus.

use crate::config::SegmenterConfig;
use crate::error::{Result, SegmentError};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One origin of corpus text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Structured chat export. Must exist.
    Export(PathBuf),
    /// Plain-text file. Skipped when missing.
    PlainText(PathBuf),
}

impl TextSource {
    pub fn path(&self) -> &Path {
        match self {
            TextSource::Export(path) | TextSource::PlainText(path) => path,
        }
    }
}

/// The concatenated text every marker offset points into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    text: String,
}

impl Corpus {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Join fragments in order with `separator` between consecutive ones.
    pub fn from_fragments<S: AsRef<str>>(fragments: &[S], separator: &str) -> Self {
        let mut text = String::new();
        for (i, fragment) in fragments.iter().enumerate() {
            if i > 0 {
                text.push_str(separator);
            }
            text.push_str(fragment.as_ref());
        }
        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text in `[start, end)`, or `None` when the range is out of bounds or
    /// splits a character.
    pub fn slice(&self, start: usize, end: usize) -> Option<&str> {
        self.text.get(start..end)
    }
}

/// Read the text chunks of a chat export in document order.
///
/// Chunks are looked up under `chunkedPrompt.chunks`, falling back to a
/// top-level `chunks` array. Chunks without a string `text` are skipped.
pub fn load_export(path: &Path, skip_thoughts: bool) -> Result<Vec<String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(SegmentError::SourceNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(SegmentError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let document: Value =
        serde_json::from_str(&raw).map_err(|source| SegmentError::MalformedSource {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(export_fragments(&document, skip_thoughts))
}

fn export_fragments(document: &Value, skip_thoughts: bool) -> Vec<String> {
    let chunks = document
        .pointer("/chunkedPrompt/chunks")
        .or_else(|| document.get("chunks"))
        .and_then(Value::as_array);

    let Some(chunks) = chunks else {
        log::warn!("Export has no chunk list; contributing no text");
        return Vec::new();
    };

    chunks
        .iter()
        .filter(|chunk| {
            !(skip_thoughts && chunk.get("isThought").and_then(Value::as_bool) == Some(true))
        })
        .filter_map(|chunk| chunk.get("text").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Read a plain-text file, returning `None` when it does not exist.
pub fn load_plain_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Skipping missing text source: {}", path.display());
            Ok(None)
        }
        Err(source) => Err(SegmentError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Sources named by the config, export first.
pub fn configured_sources(config: &SegmenterConfig) -> Vec<TextSource> {
    config
        .export_path
        .iter()
        .cloned()
        .map(TextSource::Export)
        .chain(config.text_paths.iter().cloned().map(TextSource::PlainText))
        .collect()
}

/// Load every configured source and concatenate them into one corpus.
pub fn load_corpus(config: &SegmenterConfig) -> Result<Corpus> {
    if !config.has_sources() {
        return Err(SegmentError::NoSources);
    }

    let mut fragments = Vec::new();
    for source in configured_sources(config) {
        let loaded = match &source {
            TextSource::Export(path) => load_export(path, config.skip_thoughts)?,
            TextSource::PlainText(path) => load_plain_text(path)?.into_iter().collect(),
        };
        log::debug!(
            "{}: {} fragment(s)",
            source.path().display(),
            loaded.len()
        );
        fragments.extend(loaded);
    }

    Ok(Corpus::from_fragments(&fragments, &config.separator))
}
