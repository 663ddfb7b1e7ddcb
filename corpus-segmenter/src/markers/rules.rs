//! Regex-backed marker rules and the built-in rule set.

use super::{Marker, MarkerRule};
use crate::config::SegmenterConfig;
use crate::error::{Result, SegmentError};
use regex::Regex;

/// Ordinal prefixes for compound book labels ("1 Book", "Second Book", "III Book").
const ORDINAL_ALTERNATION: &str = r"[0-9]+|first|second|third|fourth|1st|2nd|3rd|4th|iv|i{1,3}";

/// Decides whether a match starting at the given offset is accepted.
pub type MatchGuard = fn(corpus: &str, start: usize) -> bool;

/// A marker rule made of a pattern, the capture group holding the chapter
/// number, and an optional guard on the match position.
pub struct RegexRule {
    name: String,
    pattern: Regex,
    number_group: usize,
    guard: Option<MatchGuard>,
}

impl RegexRule {
    pub fn new(name: impl Into<String>, pattern: &str, number_group: usize) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern).map_err(|source| SegmentError::InvalidRule {
            name: name.clone(),
            source,
        })?;

        if number_group == 0 || number_group >= pattern.captures_len() {
            return Err(SegmentError::Config(format!(
                "rule '{}' has no capture group {}",
                name, number_group
            )));
        }

        Ok(Self {
            name,
            pattern,
            number_group,
            guard: None,
        })
    }

    pub fn with_guard(mut self, guard: MatchGuard) -> Self {
        self.guard = Some(guard);
        self
    }
}

impl MarkerRule for RegexRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, corpus: &str) -> Vec<Marker> {
        self.pattern
            .captures_iter(corpus)
            .filter_map(|caps| {
                let start = caps.get(0)?.start();
                if let Some(guard) = self.guard {
                    if !guard(corpus, start) {
                        return None;
                    }
                }
                // Numbers too large for u32 are not chapter numbers
                let chapter = caps.get(self.number_group)?.as_str().parse().ok()?;
                Some(Marker::new(chapter, start))
            })
            .collect()
    }
}

/// Accepts matches whose first character does not continue a digit run.
///
/// Leftmost matching already starts every match at the head of its digit
/// run, so this only spells out that constraint for the verse-start rule.
pub fn not_after_digit(corpus: &str, start: usize) -> bool {
    corpus[..start]
        .chars()
        .next_back()
        .is_none_or(|c| !c.is_ascii_digit())
}

fn book_alternation(config: &SegmenterConfig) -> String {
    config
        .book_names
        .iter()
        .map(|name| regex::escape(name.trim()))
        .collect::<Vec<_>>()
        .join("|")
}

/// The built-in rules, in evaluation order:
///
/// 1. `verse-start`: a number followed by a lone verse number `1`
/// 2. `chapter-label`: "Chapter N"
/// 3. `book-label`: "<Book> N"
/// 4. `ordinal-book-label`: "<ordinal> <Book> N"
pub fn default_rules(config: &SegmenterConfig) -> Result<Vec<Box<dyn MarkerRule>>> {
    let mut rules: Vec<Box<dyn MarkerRule>> = vec![
        Box::new(RegexRule::new("verse-start", r"([0-9]+)\s+1\b", 1)?.with_guard(not_after_digit)),
        Box::new(RegexRule::new("chapter-label", r"(?i)\bchapter\s+([0-9]+)", 1)?),
    ];

    if config.book_names.is_empty() {
        log::debug!("No book names configured; book label rules disabled");
        return Ok(rules);
    }

    let books = book_alternation(config);
    rules.push(Box::new(RegexRule::new(
        "book-label",
        &format!(r"\b(?:{books})\s+([0-9]+)"),
        1,
    )?));
    rules.push(Box::new(RegexRule::new(
        "ordinal-book-label",
        &format!(r"\b(?i:{ORDINAL_ALTERNATION})\s+(?:{books})\s+([0-9]+)"),
        1,
    )?));

    Ok(rules)
}
