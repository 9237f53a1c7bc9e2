//! Input loaders — thin validation wrappers around the project's configuration files.
//!
//! Every loader reports the first problem it finds with the offending field and file, and
//! nothing is written until all of them have succeeded.

pub mod contact;
pub mod heights;
pub mod preamble;
pub mod sections;

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ProjectPaths;
use crate::errors::LayoutError;
use crate::layout::grid::{compute_grid, GridParams, GridSpec};
use crate::layout::plan::Section;

pub use contact::Contact;
pub use heights::MeasuredHeights;

/// Everything a pass needs besides measured heights, assembled once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    pub contact: Contact,
    pub sections: Vec<Section>,
    pub params: GridParams,
}

impl DocumentConfig {
    pub fn load(paths: &ProjectPaths) -> Result<Self, LayoutError> {
        let contact = Contact::load(&paths.contact_yaml)?;
        let sections = sections::load_sections(&paths.layout_yaml)?;
        let params = preamble::load_preamble(&paths.preamble)?;
        debug!(sections = sections.len(), "Document configuration loaded");
        Ok(DocumentConfig {
            contact,
            sections,
            params,
        })
    }

    pub fn grid(&self) -> Result<GridSpec, LayoutError> {
        compute_grid(&self.contact.paper_size, self.contact.margin_mm, &self.params)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ────────────────────────────────────────────────────────────────────────────

pub(crate) fn read_required(path: &Path) -> Result<String, LayoutError> {
    if !path.exists() {
        return Err(LayoutError::MissingFile {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Parses YAML into `T`; an empty document is `EmptyFile`.
pub(crate) fn read_yaml<T: DeserializeOwned>(text: &str, path: &Path) -> Result<T, LayoutError> {
    let value: serde_yaml::Value = serde_yaml::from_str(text)?;
    if value.is_null() {
        return Err(LayoutError::EmptyFile {
            path: path.to_path_buf(),
        });
    }
    Ok(serde_yaml::from_value(value)?)
}

/// A present, non-blank string field.
pub(crate) fn require_str<'a>(
    value: Option<&'a str>,
    name: &str,
    source: &str,
) -> Result<&'a str, LayoutError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(LayoutError::missing(name, source)),
    }
}

/// A numeric field, given either as a YAML number or a numeric string.
pub(crate) fn yaml_number(
    value: Option<&serde_yaml::Value>,
    name: &str,
    source: &str,
) -> Result<f64, LayoutError> {
    use serde_yaml::Value;

    match value {
        None | Some(Value::Null) => Err(LayoutError::missing(name, source)),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| LayoutError::invalid(name, source, n.to_string())),
        Some(Value::String(s)) if s.trim().is_empty() => Err(LayoutError::missing(name, source)),
        Some(Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| LayoutError::invalid(name, source, s.as_str())),
        Some(other) => Err(LayoutError::invalid(
            name,
            source,
            serde_yaml::to_string(other)
                .unwrap_or_default()
                .trim()
                .to_string(),
        )),
    }
}
