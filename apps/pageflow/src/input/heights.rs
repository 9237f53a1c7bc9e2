//! Measured heights — the `key=value` file the renderer writes during the measurement pass.
//!
//! ```text
//! % written by \LogBoxHeight
//! generated/experience.tex=42
//! generated/skills.tex = 17
//! ```
//! Blank lines, `%`/`#` comments and lines without `=` are ignored.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::errors::LayoutError;
use crate::layout::plan::ContentRef;

/// Content reference → measured content rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasuredHeights {
    entries: BTreeMap<String, usize>,
}

impl MeasuredHeights {
    #[cfg(test)]
    pub fn from_entries(entries: impl IntoIterator<Item = (String, usize)>) -> Self {
        MeasuredHeights {
            entries: entries.into_iter().collect(),
        }
    }

    /// Parses heights text. A later entry for the same key replaces an earlier one.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('%') || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();
            let rows = value.parse::<usize>().map_err(|_| LayoutError::InvalidHeight {
                key: key.to_string(),
                value: value.to_string(),
            })?;
            entries.insert(key.to_string(), rows);
        }
        Ok(MeasuredHeights { entries })
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        if !path.exists() {
            return Err(LayoutError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn get(&self, reference: &ContentRef) -> Option<usize> {
        self.entries.get(reference.as_str()).copied()
    }

    /// Height for `reference`, or the fatal `MissingHeight` error naming it.
    pub fn require(&self, reference: &ContentRef) -> Result<usize, LayoutError> {
        self.get(reference).ok_or_else(|| LayoutError::MissingHeight {
            content_ref: reference.to_string(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
