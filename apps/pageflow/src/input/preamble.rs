//! `engine/preamble.tex` — grid and box master parameters.
//!
//! Parameters are plain `\newcommand{\Name}{Value}` definitions. Every name in
//! `REQUIRED_PARAMS` must be present and numeric; nothing has a default.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::LayoutError;
use crate::input::read_required;
use crate::layout::grid::{ColumnPadding, GridParams, Padding};

pub const PREAMBLE_SOURCE: &str = "engine/preamble.tex";

static NEWCOMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\newcommand\{\\(\w+)\}\{([^}]+)\}").expect("newcommand pattern must compile")
});

/// Checked in this order; the first absent one is reported. `ContentWidthScale` is only
/// validated; the renderer consumes it directly.
pub const REQUIRED_PARAMS: &[&str] = &[
    "GridFontSize",
    "MonoWidthRatio",
    "ContentWidthScale",
    "HeaderHeight",
    "GapHeaderToContent",
    "GapBoxToBox",
    "LeftBoxWidth",
    "ColumnGap",
    "LeftBoxPadLeft",
    "LeftBoxPadRight",
    "LeftBoxPadTop",
    "LeftBoxPadBot",
    "RightBoxPadLeft",
    "RightBoxPadRight",
    "RightBoxPadTop",
    "RightBoxPadBot",
    "FullBoxPadLeft",
    "FullBoxPadRight",
    "FullBoxPadTop",
    "FullBoxPadBot",
    "MinSplitContentRows",
];

/// Every `\newcommand` definition in the text; a later definition replaces an earlier one.
pub fn scan_definitions(text: &str) -> HashMap<&str, &str> {
    NEWCOMMAND
        .captures_iter(text)
        .filter_map(|c| {
            let name = c.get(1)?.as_str();
            let value = c.get(2)?.as_str().trim();
            Some((name, value))
        })
        .collect()
}

/// Extracts the required numeric parameters.
pub fn parse_preamble(text: &str) -> Result<GridParams, LayoutError> {
    let found = scan_definitions(text);

    let mut values: HashMap<&str, f64> = HashMap::with_capacity(REQUIRED_PARAMS.len());
    for &name in REQUIRED_PARAMS {
        let raw = found
            .get(name)
            .ok_or_else(|| LayoutError::missing(format!("\\{name}"), PREAMBLE_SOURCE))?;
        let value = raw
            .parse::<f64>()
            .map_err(|_| LayoutError::invalid(format!("\\{name}"), PREAMBLE_SOURCE, *raw))?;
        values.insert(name, value);
    }

    // Every key was inserted above.
    let v = |name: &str| values[name];
    let padding = |prefix: &str| Padding {
        top: v(&format!("{prefix}BoxPadTop")),
        bottom: v(&format!("{prefix}BoxPadBot")),
        left: v(&format!("{prefix}BoxPadLeft")),
        right: v(&format!("{prefix}BoxPadRight")),
    };

    Ok(GridParams {
        font_size: v("GridFontSize"),
        mono_width_ratio: v("MonoWidthRatio"),
        header_height: v("HeaderHeight"),
        gap_header_to_content: v("GapHeaderToContent"),
        gap_box_to_box: v("GapBoxToBox"),
        left_box_width: v("LeftBoxWidth"),
        column_gap: v("ColumnGap"),
        padding: ColumnPadding {
            left: padding("Left"),
            right: padding("Right"),
            full: padding("Full"),
        },
        min_split_content_rows: v("MinSplitContentRows"),
    })
}

pub fn load_preamble(path: &Path) -> Result<GridParams, LayoutError> {
    let text = read_required(path)?;
    parse_preamble(&text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A complete preamble: 9pt grid, 10-row header, 1-row gaps, 1-cell vertical padding.
    pub(crate) fn make_preamble() -> String {
        let values = [
            ("GridFontSize", "9"),
            ("MonoWidthRatio", "0.6"),
            ("ContentWidthScale", "1.0"),
            ("HeaderHeight", "10"),
            ("GapHeaderToContent", "1"),
            ("GapBoxToBox", "1"),
            ("LeftBoxWidth", "30"),
            ("ColumnGap", "2"),
            ("LeftBoxPadLeft", "2"),
            ("LeftBoxPadRight", "2"),
            ("LeftBoxPadTop", "1"),
            ("LeftBoxPadBot", "1"),
            ("RightBoxPadLeft", "2"),
            ("RightBoxPadRight", "2"),
            ("RightBoxPadTop", "1"),
            ("RightBoxPadBot", "1"),
            ("FullBoxPadLeft", "2"),
            ("FullBoxPadRight", "2"),
            ("FullBoxPadTop", "1"),
            ("FullBoxPadBot", "1"),
            ("MinSplitContentRows", "3"),
        ];
        let mut text =
            String::from("% §2 grid master parameters\n\\newcommand{\\PageFormat}{a4}\n");
        for (name, value) in values {
            text.push_str(&format!("\\newcommand{{\\{name}}}{{{value}}}\n"));
        }
        text
    }

    #[test]
    fn test_parse_complete_preamble() {
        let params = parse_preamble(&make_preamble()).unwrap();
        assert_eq!(params.font_size, 9.0);
        assert_eq!(params.mono_width_ratio, 0.6);
        assert_eq!(params.header_height, 10.0);
        assert_eq!(params.padding.left.top, 1.0);
        assert_eq!(params.padding.right.left, 2.0);
        assert_eq!(params.padding.full.bottom, 1.0);
        assert_eq!(params.min_split_content_rows, 3.0);
    }

    #[test]
    fn test_matches_grid_test_fixture() {
        let params = parse_preamble(&make_preamble()).unwrap();
        assert_eq!(params, crate::layout::grid::tests::make_params());
    }

    #[test]
    fn test_missing_parameter_is_named() {
        let text = make_preamble().replace("\\newcommand{\\GapBoxToBox}{1}\n", "");
        let err = parse_preamble(&text).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required parameter '\\GapBoxToBox' not found in engine/preamble.tex"
        );
    }

    #[test]
    fn test_non_numeric_parameter() {
        let text = make_preamble().replace("{\\HeaderHeight}{10}", "{\\HeaderHeight}{10mm}");
        let err = parse_preamble(&text).unwrap_err();
        match err {
            LayoutError::InvalidParameter { name, value, .. } => {
                assert_eq!(name, "\\HeaderHeight");
                assert_eq!(value, "10mm");
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }

    #[test]
    fn test_values_are_trimmed() {
        let text = make_preamble().replace("{\\ColumnGap}{2}", "{\\ColumnGap}{ 4 }");
        assert_eq!(parse_preamble(&text).unwrap().column_gap, 4.0);
    }

    #[test]
    fn test_scan_ignores_other_commands() {
        let defs = scan_definitions("\\renewcommand{\\X}{1}\n\\newcommand{\\Y}{2}\n\\def\\Z{3}");
        assert_eq!(defs.len(), 1);
        assert_eq!(defs.get("Y"), Some(&"2"));
    }
}
