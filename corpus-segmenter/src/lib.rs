//! Chapter segmentation for mixed text corpora
//!
//! Joins a chat export and plain-text files into one corpus, finds chapter
//! boundaries with a set of independent heuristics, and cuts the corpus into
//! per-chapter blocks:
//! - Source loading (chat export chunks, plain text)
//! - Marker detection and offset deduplication
//! - Block partitioning with duplicate-chapter indexing
//! - Optional verse-per-line cleaning
//! - Per-chapter file output

pub mod config;
pub mod error;
pub mod markers;
pub mod partition;
pub mod pipeline;
pub mod source;
pub mod verses;
pub mod writer;

pub use config::SegmenterConfig;
pub use error::{Result, SegmentError};
pub use markers::{Marker, MarkerDetector, MarkerRule, RegexRule, dedup_markers};
pub use partition::{ChapterBlock, Partition, partition};
pub use pipeline::{ExtractMode, Pipeline, RunOutcome, RunReport, Segmentation};
pub use source::{Corpus, TextSource, load_corpus};
pub use verses::{VerseLine, clean_block};
pub use writer::{ChapterWriter, chapter_file_name};
