//! End-to-end run: load, detect, deduplicate, partition, clean, write.

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::markers::{MarkerDetector, dedup_markers};
use crate::partition::{ChapterBlock, Partition, partition};
use crate::source::{Corpus, load_corpus};
use crate::verses::clean_block;
use crate::writer::ChapterWriter;
use std::path::PathBuf;

/// What each output file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// The block text as partitioned
    Raw,
    /// The block rewritten one verse per line
    Verses,
}

impl ExtractMode {
    pub fn render(self, block: &ChapterBlock) -> String {
        match self {
            ExtractMode::Raw => block.text.clone(),
            ExtractMode::Verses => clean_block(&block.text),
        }
    }
}

/// Counts and paths of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Markers found by all rules, before deduplication
    pub markers_found: usize,
    /// Markers left after deduplication
    pub unique_markers: usize,
    /// Distinct chapter numbers
    pub chapters: usize,
    /// Blocks produced, duplicates of a chapter included
    pub blocks: usize,
    pub output_dir: PathBuf,
    /// Files written, or planned on a dry run
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// No rule matched anything; nothing was written
    NoMarkers,
    Completed(RunReport),
}

/// Corpus split into blocks, before anything is written.
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub markers_found: usize,
    pub unique_markers: usize,
    pub partition: Partition,
}

pub struct Pipeline {
    config: SegmenterConfig,
    detector: MarkerDetector,
}

impl Pipeline {
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        config.validate()?;
        let detector = MarkerDetector::with_defaults(&config)?;
        Ok(Self { config, detector })
    }

    /// Use a custom detector instead of the built-in rules
    pub fn with_detector(config: SegmenterConfig, detector: MarkerDetector) -> Self {
        Self { config, detector }
    }

    /// Detect, deduplicate and partition an already loaded corpus.
    pub fn segment(&self, corpus: &Corpus) -> Segmentation {
        let markers = self.detector.detect(corpus.as_str());
        let markers_found = markers.len();
        let markers = dedup_markers(markers);

        Segmentation {
            markers_found,
            unique_markers: markers.len(),
            partition: partition(corpus, &markers),
        }
    }

    /// Load the configured sources and write one file per block.
    pub fn run(&self, mode: ExtractMode) -> Result<RunOutcome> {
        self.execute(mode, false)
    }

    /// Same as [`run`](Self::run) but only reports the files it would write.
    pub fn run_dry(&self, mode: ExtractMode) -> Result<RunOutcome> {
        self.execute(mode, true)
    }

    fn execute(&self, mode: ExtractMode, dry_run: bool) -> Result<RunOutcome> {
        let corpus = load_corpus(&self.config)?;
        log::info!("Loaded corpus of {} bytes", corpus.len());

        let segmentation = self.segment(&corpus);
        if segmentation.partition.is_empty() {
            log::info!("No chapter markers found");
            return Ok(RunOutcome::NoMarkers);
        }

        let writer = ChapterWriter::new(&self.config.output_dir, self.config.pad_width);
        let blocks = segmentation.partition.blocks();
        let files = if dry_run {
            writer.plan(blocks)
        } else {
            writer.write_all(blocks, |block| mode.render(block))?
        };

        let report = RunReport {
            markers_found: segmentation.markers_found,
            unique_markers: segmentation.unique_markers,
            chapters: segmentation.partition.chapters().len(),
            blocks: blocks.len(),
            output_dir: self.config.output_dir.clone(),
            files,
        };
        log::info!(
            "{} block(s) across {} chapter(s)",
            report.blocks,
            report.chapters
        );

        Ok(RunOutcome::Completed(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SegmentError;
    use crate::markers::{Marker, MarkerRule};
    use std::fs;
    use std::path::Path;

    fn config_for(dir: &Path, text: &str) -> SegmenterConfig {
        let source = dir.join("corpus.txt");
        fs::write(&source, text).unwrap();
        SegmenterConfig {
            text_paths: vec![source],
            output_dir: dir.join("out"),
            ..Default::default()
        }
    }

    #[test]
    fn test_segment_end_to_end_scenario() {
        let pipeline = Pipeline::new(SegmenterConfig::default()).unwrap();
        let corpus = Corpus::new("front matter 5 1 Alpha text 6 1 Beta text");
        let segmentation = pipeline.segment(&corpus);

        let blocks = segmentation.partition.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!((blocks[0].chapter, blocks[0].text.as_str()), (5, "5 1 Alpha text"));
        assert_eq!((blocks[1].chapter, blocks[1].text.as_str()), (6, "6 1 Beta text"));
    }

    #[test]
    fn test_run_writes_raw_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), "front matter 5 1 Alpha text 6 1 Beta text");
        let pipeline = Pipeline::new(config).unwrap();

        let RunOutcome::Completed(report) = pipeline.run(ExtractMode::Raw).unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.markers_found, 2);
        assert_eq!(report.unique_markers, 2);
        assert_eq!(report.chapters, 2);

        let out = dir.path().join("out");
        assert_eq!(fs::read_to_string(out.join("chapter_05.txt")).unwrap(), "5 1 Alpha text");
        assert_eq!(fs::read_to_string(out.join("chapter_06.txt")).unwrap(), "6 1 Beta text");
    }

    #[test]
    fn test_run_duplicate_chapter_files() {
        let dir = tempfile::tempdir().unwrap();
        let text = "10 1 Start of ten.\n\n11 1 Eleven.\n\n10 1 Ten again.";
        let pipeline = Pipeline::new(config_for(dir.path(), text)).unwrap();

        let RunOutcome::Completed(report) = pipeline.run(ExtractMode::Raw).unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.chapters, 2);
        assert_eq!(report.blocks, 3);

        let out = dir.path().join("out");
        assert_eq!(fs::read_to_string(out.join("chapter_10.txt")).unwrap(), "10 1 Start of ten.");
        assert_eq!(fs::read_to_string(out.join("chapter_10_2.txt")).unwrap(), "10 1 Ten again.");
        assert_eq!(fs::read_to_string(out.join("chapter_11.txt")).unwrap(), "11 1 Eleven.");
    }

    #[test]
    fn test_run_verses_mode() {
        let dir = tempfile::tempdir().unwrap();
        let text = "3 1 First verse 2 Second verse\n\nWant more?";
        let pipeline = Pipeline::new(config_for(dir.path(), text)).unwrap();
        pipeline.run(ExtractMode::Verses).unwrap();

        let written = fs::read_to_string(dir.path().join("out").join("chapter_03.txt")).unwrap();
        assert_eq!(written, "1 First verse\n2 Second verse");
    }

    /// Marks every occurrence of `@N` as the start of chapter N.
    struct AtSignRule;

    impl MarkerRule for AtSignRule {
        fn name(&self) -> &str {
            "at-sign"
        }

        fn find(&self, corpus: &str) -> Vec<Marker> {
            corpus
                .match_indices('@')
                .filter_map(|(offset, _)| {
                    let digits: String = corpus[offset + 1..]
                        .chars()
                        .take_while(char::is_ascii_digit)
                        .collect();
                    Some(Marker::new(digits.parse().ok()?, offset))
                })
                .collect()
        }
    }

    #[test]
    fn test_run_with_custom_detector() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(dir.path(), "preface @4 four @7 seven Chapter 9 ignored");
        let detector = MarkerDetector::new(vec![Box::new(AtSignRule)]);
        let pipeline = Pipeline::with_detector(config, detector);

        let RunOutcome::Completed(report) = pipeline.run(ExtractMode::Raw).unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.markers_found, 2);
        assert_eq!(report.blocks, 2);

        let out = dir.path().join("out");
        assert_eq!(fs::read_to_string(out.join("chapter_04.txt")).unwrap(), "@4 four");
        assert_eq!(
            fs::read_to_string(out.join("chapter_07.txt")).unwrap(),
            "@7 seven Chapter 9 ignored"
        );
        assert!(!out.join("chapter_09.txt").exists());
    }

    #[test]
    fn test_run_no_markers() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(config_for(dir.path(), "nothing to see here")).unwrap();

        assert_eq!(pipeline.run(ExtractMode::Raw).unwrap(), RunOutcome::NoMarkers);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_run_dry_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(config_for(dir.path(), "Chapter 2 body")).unwrap();

        let RunOutcome::Completed(report) = pipeline.run_dry(ExtractMode::Raw).unwrap() else {
            panic!("expected a completed run");
        };
        assert_eq!(report.files, vec![dir.path().join("out").join("chapter_02.txt")]);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_run_missing_export() {
        let dir = tempfile::tempdir().unwrap();
        let config = SegmenterConfig {
            export_path: Some(dir.path().join("missing.json")),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config).unwrap();
        assert!(matches!(
            pipeline.run(ExtractMode::Raw),
            Err(SegmentError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_raw_and_verse_render() {
        let block = ChapterBlock {
            chapter: 1,
            block_index: 1,
            offset: 0,
            text: "1 1 a 2 b".to_string(),
        };
        assert_eq!(ExtractMode::Raw.render(&block), "1 1 a 2 b");
        assert_eq!(ExtractMode::Verses.render(&block), "1 a\n2 b");
    }
}
