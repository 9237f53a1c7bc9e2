//! `content/layout.yaml` — which content goes in which column, in what order.
//!
//! ```yaml
//! sections:
//!   - title: Experience
//!     content: experience.tex
//!     column: right
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::errors::LayoutError;
use crate::input::{read_required, read_yaml, require_str};
use crate::layout::plan::{ColumnType, ContentRef, Section};

pub const LAYOUT_SOURCE: &str = "content/layout.yaml";

#[derive(Debug, Deserialize)]
struct RawLayout {
    sections: Option<Vec<RawSection>>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    title: Option<String>,
    content: Option<String>,
    column: Option<String>,
}

/// Parses and validates the section list, preserving declaration order.
pub fn parse_sections(text: &str, path: &Path) -> Result<Vec<Section>, LayoutError> {
    let raw: RawLayout = read_yaml(text, path)?;
    let raw_sections = match raw.sections {
        Some(list) if !list.is_empty() => list,
        _ => {
            return Err(LayoutError::NoSections {
                source_file: LAYOUT_SOURCE.to_string(),
            })
        }
    };

    raw_sections
        .iter()
        .enumerate()
        .map(|(i, sec)| -> Result<Section, LayoutError> {
            let title = require_str(
                sec.title.as_deref(),
                &format!("sections[{i}].title"),
                LAYOUT_SOURCE,
            )?;
            let content = require_str(
                sec.content.as_deref(),
                &format!("sections[{i}].content"),
                LAYOUT_SOURCE,
            )?;
            let column = require_str(
                sec.column.as_deref(),
                &format!("sections[{i}].column"),
                LAYOUT_SOURCE,
            )?;
            let column = column
                .parse::<ColumnType>()
                .map_err(|value| LayoutError::InvalidColumn { index: i, value })?;
            Ok(Section::new(title, ContentRef::generated(content), column))
        })
        .collect()
}

pub fn load_sections(path: &Path) -> Result<Vec<Section>, LayoutError> {
    let text = read_required(path)?;
    parse_sections(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Vec<Section>, LayoutError> {
        parse_sections(text, Path::new("content/layout.yaml"))
    }

    #[test]
    fn test_parse_preserves_order() {
        let sections = parse(
            r#"
sections:
  - title: Skills
    content: skills.tex
    column: left
  - title: Experience
    content: experience.tex
    column: right
  - title: Publications
    content: publications.tex
    column: full
"#,
        )
        .unwrap();
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].title, "Skills");
        assert_eq!(sections[0].content_ref.as_str(), "generated/skills.tex");
        assert_eq!(sections[1].column, ColumnType::Right);
        assert_eq!(sections[2].column, ColumnType::Full);
    }

    #[test]
    fn test_empty_sections_list() {
        let err = parse("sections: []\n").unwrap_err();
        assert!(matches!(err, LayoutError::NoSections { .. }));
    }

    #[test]
    fn test_missing_sections_key() {
        let err = parse("columns: 2\n").unwrap_err();
        assert!(matches!(err, LayoutError::NoSections { .. }));
    }

    #[test]
    fn test_missing_field_is_named_with_index() {
        let err = parse(
            "sections:\n  - title: A\n    content: a.tex\n    column: left\n  - title: B\n    column: left\n",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "required parameter 'sections[1].content' not found in content/layout.yaml"
        );
    }

    #[test]
    fn test_invalid_column() {
        let err =
            parse("sections:\n  - title: A\n    content: a.tex\n    column: middle\n").unwrap_err();
        match err {
            LayoutError::InvalidColumn { index, value } => {
                assert_eq!(index, 0);
                assert_eq!(value, "middle");
            }
            other => panic!("expected InvalidColumn, got {other:?}"),
        }
    }
}
