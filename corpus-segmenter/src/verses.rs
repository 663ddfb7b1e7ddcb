//! Verse reconstruction: rewrite a chapter block as one verse per line.

use once_cell::sync::Lazy;
use regex::Regex;

/// A standalone number of at most three digits
static VERSE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[0-9]{1,3}\b").expect("verse number pattern should compile"));

static BLANK_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t\r]*\n").expect("blank line pattern should compile"));

/// One verse recovered from a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseLine {
    pub number: u32,
    pub text: String,
}

impl VerseLine {
    pub fn render(&self) -> String {
        format!("{} {}", self.number, self.text)
    }
}

/// Split a block into verses.
///
/// The first token of the block is the chapter number and is skipped. Each
/// verse runs from a verse number to the next verse number or the end of the
/// block. Anything after a blank line inside a verse is commentary and
/// dropped. Numbers with no text before the next number do not start a verse.
pub fn split_verses(block: &str) -> Vec<VerseLine> {
    let Some((_, remainder)) = block.trim().split_once(char::is_whitespace) else {
        return Vec::new();
    };

    let numbers: Vec<_> = VERSE_NUMBER.find_iter(remainder).collect();

    numbers
        .iter()
        .enumerate()
        .filter_map(|(i, number)| {
            let end = numbers.get(i + 1).map_or(remainder.len(), |next| next.start());
            let text = collapse_whitespace(strip_commentary(&remainder[number.end()..end]));
            if text.is_empty() {
                return None;
            }
            Some(VerseLine {
                number: number.as_str().parse().ok()?,
                text,
            })
        })
        .collect()
}

/// Rewrite a block as `"<verse> <text>"` lines.
///
/// Returns the trimmed block unchanged when no verse is found, so a block
/// the heuristic cannot read is never emptied.
pub fn clean_block(block: &str) -> String {
    let verses = split_verses(block);
    if verses.is_empty() {
        return block.trim().to_string();
    }

    verses
        .iter()
        .map(VerseLine::render)
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_commentary(text: &str) -> &str {
    let text = text.trim_start();
    BLANK_LINE.find(text).map_or(text, |m| &text[..m.start()])
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
