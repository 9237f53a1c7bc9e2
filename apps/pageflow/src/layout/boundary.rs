//! Content boundary scanner — finds the lines where a block may be cut across pages.
//!
//! A boundary is a line that starts a new semantic unit (a job, a timeline item, a skill
//! category, a research subsection). Lines are classified against an ordered list of
//! patterns; the first match wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::ContentBlock;

/// One "safe cut" marker.
pub struct SplitPattern {
    pub name: &'static str,
    regex: Regex,
}

impl SplitPattern {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        Ok(SplitPattern {
            name,
            regex: Regex::new(pattern)?,
        })
    }

    /// Tests an already-trimmed line.
    pub fn matches(&self, trimmed: &str) -> bool {
        self.regex.is_match(trimmed)
    }
}

/// Default split markers, matched against the trimmed line.
pub static SPLIT_PATTERNS: Lazy<Vec<SplitPattern>> = Lazy::new(|| {
    [
        ("job_separator", r"^\\JobSep\s*$"),
        ("timeline_item", r"^\\vspace\{\\GapTimelineItem"),
        ("skill_category", r"^\\vspace\{\\GapSkillCat"),
        ("subhead_gap", r"^\\vspace\{\\GapBeforeSubHead"),
        ("subhead", r"^\\SubHead\{"),
    ]
    .into_iter()
    .map(|(name, pattern)| {
        SplitPattern::new(name, pattern).expect("built-in split pattern must compile")
    })
    .collect()
});

/// The line separating two jobs; dropped from the head of a continuation block.
pub const JOB_SEPARATOR: &str = "\\JobSep";

/// Classifies lines of a block against a pattern set.
pub struct BoundaryScanner<'a> {
    patterns: &'a [SplitPattern],
}

impl Default for BoundaryScanner<'static> {
    fn default() -> Self {
        BoundaryScanner {
            patterns: &SPLIT_PATTERNS,
        }
    }
}

impl<'a> BoundaryScanner<'a> {
    #[cfg(test)]
    pub fn with_patterns(patterns: &'a [SplitPattern]) -> Self {
        BoundaryScanner { patterns }
    }

    /// Name of the first pattern matching `line`, if any.
    pub fn classify(&self, line: &str) -> Option<&'static str> {
        let trimmed = line.trim();
        self.patterns
            .iter()
            .find(|p| p.matches(trimmed))
            .map(|p| p.name)
    }

    /// 0-based offsets of every boundary line, in document order.
    /// Empty means the block cannot be split.
    pub fn scan(&self, block: &ContentBlock) -> Vec<usize> {
        block
            .lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.classify(line).is_some())
            .map(|(i, _)| i)
            .collect()
    }
}

/// Scans with the default pattern set.
pub fn find_split_boundaries(block: &ContentBlock) -> Vec<usize> {
    BoundaryScanner::default().scan(block)
}
