//! Plan data model — sections in, box placements out.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::content::ContentBlock;

/// Directory (relative to the project root) holding every content block.
pub const GENERATED_DIR: &str = "generated";

// ────────────────────────────────────────────────────────────────────────────
// Columns and sections
// ────────────────────────────────────────────────────────────────────────────

/// The three independent columns a box can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Left,
    Right,
    Full,
}

impl ColumnType {
    /// Emission and packing order.
    pub const ALL: [ColumnType; 3] = [ColumnType::Left, ColumnType::Right, ColumnType::Full];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Left => "left",
            ColumnType::Right => "right",
            ColumnType::Full => "full",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(ColumnType::Left),
            "right" => Ok(ColumnType::Right),
            "full" => Ok(ColumnType::Full),
            other => Err(other.to_string()),
        }
    }
}

/// Reference to a content block: a path relative to the project root.
///
/// The same string keys the measured-heights map and is written into the plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentRef(String);

impl ContentRef {
    pub fn new(path: impl Into<String>) -> Self {
        ContentRef(path.into())
    }

    /// Reference for a content file declared in the sections list.
    pub fn generated(file_name: &str) -> Self {
        ContentRef::new(format!("{GENERATED_DIR}/{file_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// References of the two halves produced when this block is split:
    /// `generated/<stem>-p1.tex` and `generated/<stem>-p2.tex`.
    pub fn split_parts(&self) -> (ContentRef, ContentRef) {
        let stem = Path::new(&self.0)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&self.0);
        (
            ContentRef::new(format!("{GENERATED_DIR}/{stem}-p1.tex")),
            ContentRef::new(format!("{GENERATED_DIR}/{stem}-p2.tex")),
        )
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named content assignment, in declaration order within its column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content_ref: ContentRef,
    pub column: ColumnType,
}

impl Section {
    pub fn new(title: impl Into<String>, content_ref: ContentRef, column: ColumnType) -> Self {
        Section {
            title: title.into(),
            content_ref,
            column,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placements
// ────────────────────────────────────────────────────────────────────────────

/// Vertical extent of a placed box on its page, in grid rows.
///
/// For the continuation half of a split `rows` is an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RowSpan {
    pub top: f64,
    pub rows: usize,
}

impl RowSpan {
    #[cfg(test)]
    pub fn bottom(&self) -> f64 {
        self.top + self.rows as f64
    }
}

/// One box in the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlacement {
    pub title: String,
    pub content_ref: ContentRef,
    pub column: ColumnType,
    /// 1-based page number.
    pub page: u32,
    /// `None` in the measurement plan, where nothing is positioned.
    pub span: Option<RowSpan>,
}

/// The complete placement of every section, plus the blocks produced by splitting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub placements: Vec<BoxPlacement>,
    pub total_pages: u32,
    /// Split halves referenced by `placements`; written alongside the plan.
    #[serde(skip)]
    pub split_blocks: Vec<ContentBlock>,
}

impl LayoutPlan {
    /// Boxes of one column on one page, in placement order.
    pub fn boxes_on(&self, page: u32, column: ColumnType) -> impl Iterator<Item = &BoxPlacement> {
        self.placements
            .iter()
            .filter(move |p| p.page == page && p.column == column)
    }

    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.total_pages
    }

    pub fn split_count(&self) -> usize {
        self.split_blocks.len() / 2
    }
}
