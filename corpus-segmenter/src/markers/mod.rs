//! Chapter boundary detection: pluggable rules, detector, deduplication.

mod dedup;
pub mod rules;

pub use dedup::dedup_markers;
pub use rules::{RegexRule, default_rules};

use crate::config::SegmenterConfig;
use crate::error::Result;

/// A chapter boundary candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    /// Chapter number claimed by the match
    pub chapter: u32,
    /// Byte offset of the match start in the corpus
    pub offset: usize,
}

impl Marker {
    pub fn new(chapter: u32, offset: usize) -> Self {
        Self { chapter, offset }
    }
}

/// A boundary heuristic. Every rule scans the whole corpus on its own and
/// reports its matches in left-to-right order.
pub trait MarkerRule: Send + Sync {
    /// Rule name, used in diagnostics
    fn name(&self) -> &str;

    /// All markers this rule finds in `corpus`
    fn find(&self, corpus: &str) -> Vec<Marker>;
}

/// Applies an ordered list of rules to a corpus.
pub struct MarkerDetector {
    rules: Vec<Box<dyn MarkerRule>>,
}

impl MarkerDetector {
    pub fn new(rules: Vec<Box<dyn MarkerRule>>) -> Self {
        Self { rules }
    }

    /// Detector with the built-in rule set for `config`
    pub fn with_defaults(config: &SegmenterConfig) -> Result<Self> {
        Ok(Self::new(default_rules(config)?))
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Run every rule over the corpus.
    ///
    /// The result holds each rule's matches in declaration order, rule after
    /// rule. Nothing is filtered here; see [`dedup_markers`].
    pub fn detect(&self, corpus: &str) -> Vec<Marker> {
        let mut markers = Vec::new();
        for rule in &self.rules {
            let found = rule.find(corpus);
            log::debug!("Rule '{}' matched {} time(s)", rule.name(), found.len());
            markers.extend(found);
        }
        markers
    }
}
