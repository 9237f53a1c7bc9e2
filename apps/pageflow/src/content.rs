//! Content blocks and where they come from.
//!
//! The packer only ever sees blocks through `BlockSource`, so it never touches the
//! filesystem itself. `FsBlockSource` reads blocks relative to the project root.

use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::LayoutError;
use crate::layout::plan::ContentRef;

/// An ordered sequence of markup lines, without line terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub reference: ContentRef,
    pub lines: Vec<String>,
}

impl ContentBlock {
    pub fn new(reference: ContentRef, lines: Vec<String>) -> Self {
        ContentBlock { reference, lines }
    }

    pub fn from_text(reference: ContentRef, text: &str) -> Self {
        ContentBlock {
            reference,
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text form: every line terminated by `\n`.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Writes the block to `<root>/<reference>`, creating parent directories.
    pub fn write_under(&self, root: &Path) -> Result<PathBuf, LayoutError> {
        let path = root.join(self.reference.as_str());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, self.to_text())?;
        Ok(path)
    }
}

/// Loads content blocks by reference.
pub trait BlockSource {
    fn load(&self, reference: &ContentRef) -> Result<ContentBlock, LayoutError>;
}

/// Reads blocks from files under a project root.
pub struct FsBlockSource {
    root: PathBuf,
}

impl FsBlockSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsBlockSource { root: root.into() }
    }
}

impl BlockSource for FsBlockSource {
    fn load(&self, reference: &ContentRef) -> Result<ContentBlock, LayoutError> {
        let path = self.root.join(reference.as_str());
        if !path.exists() {
            return Err(LayoutError::MissingFile { path });
        }
        let text = fs::read_to_string(&path)?;
        Ok(ContentBlock::from_text(reference.clone(), &text))
    }
}

/// In-memory source keyed by reference.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct MemoryBlockSource {
    blocks: std::collections::HashMap<ContentRef, ContentBlock>,
}

#[cfg(test)]
impl MemoryBlockSource {
    pub(crate) fn with(mut self, reference: &ContentRef, lines: &[&str]) -> Self {
        let block = ContentBlock::new(
            reference.clone(),
            lines.iter().map(|l| l.to_string()).collect(),
        );
        self.blocks.insert(reference.clone(), block);
        self
    }
}

#[cfg(test)]
impl BlockSource for MemoryBlockSource {
    fn load(&self, reference: &ContentRef) -> Result<ContentBlock, LayoutError> {
        self.blocks
            .get(reference)
            .cloned()
            .ok_or_else(|| LayoutError::MissingFile {
                path: PathBuf::from(reference.as_str()),
            })
    }
}
