//! `content/contact.yaml` — page geometry and header theme.
//!
//! Only the fields the layout needs are read; name, e-mail and the rest belong to the header
//! renderer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::LayoutError;
use crate::input::{read_yaml, require_str, yaml_number};

pub const CONTACT_SOURCE: &str = "content/contact.yaml";

/// Header style; selects the engine file the canvas loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderTheme {
    #[default]
    Classic,
    Mainframe,
    Crt,
}

impl HeaderTheme {
    pub const ALL: [HeaderTheme; 3] = [
        HeaderTheme::Classic,
        HeaderTheme::Mainframe,
        HeaderTheme::Crt,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HeaderTheme::Classic => "classic",
            HeaderTheme::Mainframe => "mainframe",
            HeaderTheme::Crt => "crt",
        }
    }

    pub fn engine_file(&self) -> &'static str {
        match self {
            HeaderTheme::Classic => "engine/header.tex",
            HeaderTheme::Mainframe => "engine/header_mainframe.tex",
            HeaderTheme::Crt => "engine/header_crt.tex",
        }
    }

    pub fn parse(value: &str) -> Result<Self, LayoutError> {
        let wanted = value.trim().to_lowercase();
        HeaderTheme::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| LayoutError::invalid("header_theme", CONTACT_SOURCE, value))
    }
}

#[derive(Debug, Deserialize)]
struct RawContact {
    paper_size: Option<String>,
    margin: Option<serde_yaml::Value>,
    header_theme: Option<String>,
}

/// The page-geometry part of the contact file.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Lower-cased; validated against the paper table when the grid is built.
    pub paper_size: String,
    pub margin_mm: f64,
    pub header_theme: HeaderTheme,
}

impl Contact {
    pub fn parse(text: &str, path: &Path) -> Result<Self, LayoutError> {
        let raw: RawContact = read_yaml(text, path)?;

        let paper_size = require_str(raw.paper_size.as_deref(), "paper_size", CONTACT_SOURCE)?;
        let margin_mm = yaml_number(raw.margin.as_ref(), "margin", CONTACT_SOURCE)?;
        let header_theme = match raw.header_theme.as_deref().map(str::trim) {
            None | Some("") => HeaderTheme::default(),
            Some(theme) => HeaderTheme::parse(theme)?,
        };

        Ok(Contact {
            paper_size: paper_size.to_lowercase(),
            margin_mm,
            header_theme,
        })
    }

    pub fn load(path: &Path) -> Result<Self, LayoutError> {
        let text = crate::input::read_required(path)?;
        Self::parse(&text, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Contact, LayoutError> {
        Contact::parse(text, Path::new("content/contact.yaml"))
    }

    #[test]
    fn test_parse_full_contact() {
        let contact = parse(
            "name: Ada Lovelace\npaper_size: A4\nmargin: 12.7\nheader_theme: crt\nemail: ada@example.com\n",
        )
        .unwrap();
        assert_eq!(contact.paper_size, "a4");
        assert!((contact.margin_mm - 12.7).abs() < 1e-9);
        assert_eq!(contact.header_theme, HeaderTheme::Crt);
        assert_eq!(contact.header_theme.engine_file(), "engine/header_crt.tex");
    }

    #[test]
    fn test_integer_and_string_margins() {
        assert_eq!(parse("paper_size: letter\nmargin: 10\n").unwrap().margin_mm, 10.0);
        assert_eq!(parse("paper_size: letter\nmargin: \"15\"\n").unwrap().margin_mm, 15.0);
    }

    #[test]
    fn test_header_theme_defaults_to_classic() {
        let contact = parse("paper_size: a4\nmargin: 12.7\n").unwrap();
        assert_eq!(contact.header_theme, HeaderTheme::Classic);
    }

    #[test]
    fn test_missing_paper_size() {
        let err = parse("margin: 12.7\n").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MissingParameter { ref name, .. } if name == "paper_size"
        ));
    }

    #[test]
    fn test_missing_margin() {
        let err = parse("paper_size: a4\n").unwrap_err();
        assert!(matches!(err, LayoutError::MissingParameter { ref name, .. } if name == "margin"));
    }

    #[test]
    fn test_non_numeric_margin() {
        let err = parse("paper_size: a4\nmargin: wide\n").unwrap_err();
        assert!(matches!(err, LayoutError::InvalidParameter { ref value, .. } if value == "wide"));
    }

    #[test]
    fn test_unknown_header_theme() {
        let err = parse("paper_size: a4\nmargin: 12.7\nheader_theme: neon\n").unwrap_err();
        assert_eq!(err.code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_empty_file() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, LayoutError::EmptyFile { .. }));
    }
}
