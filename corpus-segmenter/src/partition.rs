//! Splitting the corpus into chapter blocks at marker offsets.

use crate::markers::Marker;
use crate::source::Corpus;
use std::collections::{BTreeMap, HashMap};

/// A contiguous span of the corpus assigned to one chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterBlock {
    /// The chapter number claimed by the opening marker
    pub chapter: u32,
    /// 1-based position among blocks with the same chapter number
    pub block_index: usize,
    /// Corpus offset of the opening marker
    pub offset: usize,
    /// Block text, whitespace-trimmed
    pub text: String,
}

/// All blocks of a corpus, in marker order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    blocks: Vec<ChapterBlock>,
}

impl Partition {
    pub fn blocks(&self) -> &[ChapterBlock] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Blocks grouped by chapter number, each group in corpus order.
    pub fn chapters(&self) -> BTreeMap<u32, Vec<&ChapterBlock>> {
        let mut chapters: BTreeMap<u32, Vec<&ChapterBlock>> = BTreeMap::new();
        for block in &self.blocks {
            chapters.entry(block.chapter).or_default().push(block);
        }
        chapters
    }

    /// Number of blocks carrying `chapter`
    pub fn block_count(&self, chapter: u32) -> usize {
        self.blocks.iter().filter(|b| b.chapter == chapter).count()
    }
}

/// Cut the corpus at each marker.
///
/// `markers` must be deduplicated and sorted by offset. Block `i` spans from
/// marker `i` up to marker `i + 1`, the last one runs to the end of the
/// corpus. Text before the first marker is dropped. Markers past the end of
/// the corpus or inside a character are skipped.
pub fn partition(corpus: &Corpus, markers: &[Marker]) -> Partition {
    let valid: Vec<&Marker> = markers
        .iter()
        .filter(|marker| {
            let usable = corpus.slice(marker.offset, corpus.len()).is_some();
            if !usable {
                log::warn!(
                    "Ignoring chapter {} marker at invalid offset {}",
                    marker.chapter,
                    marker.offset
                );
            }
            usable
        })
        .collect();

    let mut next_index: HashMap<u32, usize> = HashMap::new();
    let blocks = valid
        .iter()
        .enumerate()
        .filter_map(|(i, marker)| {
            let end = valid.get(i + 1).map_or(corpus.len(), |next| next.offset);
            let text = corpus.slice(marker.offset, end)?;
            let index = next_index.entry(marker.chapter).or_insert(0);
            *index += 1;

            Some(ChapterBlock {
                chapter: marker.chapter,
                block_index: *index,
                offset: marker.offset,
                text: text.trim().to_string(),
            })
        })
        .collect();

    Partition { blocks }
}
