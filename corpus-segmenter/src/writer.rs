//! Writing chapter blocks to per-chapter files.

use crate::error::{Result, SegmentError};
use crate::partition::ChapterBlock;
use std::fs;
use std::path::PathBuf;

/// File name for a block: `chapter_<NN>.txt`, with `_<index>` added for the
/// second and later blocks of a chapter.
pub fn chapter_file_name(chapter: u32, block_index: usize, pad_width: usize) -> String {
    if block_index > 1 {
        format!("chapter_{:0width$}_{}.txt", chapter, block_index, width = pad_width)
    } else {
        format!("chapter_{:0width$}.txt", chapter, width = pad_width)
    }
}

/// Writes blocks into one output directory.
#[derive(Debug, Clone)]
pub struct ChapterWriter {
    output_dir: PathBuf,
    pad_width: usize,
}

impl ChapterWriter {
    pub fn new(output_dir: impl Into<PathBuf>, pad_width: usize) -> Self {
        Self {
            output_dir: output_dir.into(),
            pad_width,
        }
    }

    /// Target path of a block
    pub fn path_for(&self, block: &ChapterBlock) -> PathBuf {
        self.output_dir
            .join(chapter_file_name(block.chapter, block.block_index, self.pad_width))
    }

    /// Paths that [`write_all`](Self::write_all) would produce, without
    /// touching the filesystem.
    pub fn plan(&self, blocks: &[ChapterBlock]) -> Vec<PathBuf> {
        blocks.iter().map(|block| self.path_for(block)).collect()
    }

    /// Write every block, rendered through `render`.
    ///
    /// Creates the output directory and overwrites existing files. Stops at
    /// the first failed write; files written before it stay on disk.
    pub fn write_all<F>(&self, blocks: &[ChapterBlock], render: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(&ChapterBlock) -> String,
    {
        fs::create_dir_all(&self.output_dir).map_err(|source| SegmentError::Write {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(blocks.len());
        for block in blocks {
            let path = self.path_for(block);
            fs::write(&path, render(block)).map_err(|source| SegmentError::Write {
                path: path.clone(),
                source,
            })?;
            log::debug!(
                "Wrote {} (chapter {} from offset {})",
                path.display(),
                block.chapter,
                block.offset
            );
            written.push(path);
        }

        Ok(written)
    }
}
