//! Grid model — maps physical page geometry and typography onto an integer character grid.
//!
//! One grid cell is one monospace glyph: `font_size × mono_width_ratio` points wide and
//! `font_size` points tall. Every box position and height downstream is counted in cells.
//!
//! ```text
//! cell_w = font_size × mono_ratio × PT_TO_MM
//! cell_h = font_size × PT_TO_MM
//! cols   = ⌊(page_w − 2·margin) / cell_w⌋
//! rows   = ⌊(page_h − 2·margin) / cell_h⌋
//! ```

use crate::errors::LayoutError;
use crate::layout::plan::ColumnType;

/// 1 pt = 25.4 mm / 72 (PostScript point).
pub const PT_TO_MM: f64 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Paper sizes
// ────────────────────────────────────────────────────────────────────────────

/// Supported physical paper sizes (ISO 216 A4, ANSI Letter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperSize {
    A4,
    Letter,
}

impl PaperSize {
    pub const ALL: [PaperSize; 2] = [PaperSize::A4, PaperSize::Letter];

    pub fn name(&self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::Letter => "letter",
        }
    }

    /// `(width, height)` in millimetres.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(value: &str) -> Result<Self, LayoutError> {
        let wanted = value.trim().to_lowercase();
        PaperSize::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| LayoutError::UnknownPaperSize {
                value: wanted,
                valid: PaperSize::ALL.map(|p| p.name()).join(", "),
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parameters
// ────────────────────────────────────────────────────────────────────────────

/// Padding inside a box border, in grid cells.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Padding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// Padding for each of the three column types.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnPadding {
    pub left: Padding,
    pub right: Padding,
    pub full: Padding,
}

impl ColumnPadding {
    pub fn for_column(&self, column: ColumnType) -> Padding {
        match column {
            ColumnType::Left => self.left,
            ColumnType::Right => self.right,
            ColumnType::Full => self.full,
        }
    }
}

/// Typography and box-geometry parameters, as declared in the engine preamble.
#[derive(Debug, Clone, PartialEq)]
pub struct GridParams {
    pub font_size: f64,
    pub mono_width_ratio: f64,
    pub header_height: f64,
    pub gap_header_to_content: f64,
    pub gap_box_to_box: f64,
    /// Width of the left column in grid cells.
    pub left_box_width: f64,
    /// Horizontal gap between the left and right columns, in grid cells.
    pub column_gap: f64,
    pub padding: ColumnPadding,
    /// Smallest number of content rows worth keeping on a page when splitting.
    pub min_split_content_rows: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Grid spec
// ────────────────────────────────────────────────────────────────────────────

/// The integer grid every placement is computed against. Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    pub paper: PaperSize,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
    pub columns: usize,
    pub rows: usize,
    pub header_height: usize,
    pub gap_header_to_content: f64,
    pub gap_box_to_box: f64,
    /// `header_height + gap_header_to_content`.
    pub content_start_row: f64,
    /// Last usable row on a page; a box may end exactly here.
    pub max_row: usize,
    pub padding: ColumnPadding,
    pub min_split_content_rows: usize,
    pub left_width: usize,
    pub right_col_x: usize,
    pub right_width: usize,
}

/// Builds the grid for a page.
///
/// Fails if the paper size is unknown, a parameter is not a positive finite number where
/// one is required, or the resulting grid would have no columns or rows.
pub fn compute_grid(
    paper_size: &str,
    margin_mm: f64,
    params: &GridParams,
) -> Result<GridSpec, LayoutError> {
    let paper = PaperSize::parse(paper_size)?;
    let (page_w, page_h) = paper.dimensions_mm();

    require_positive("GridFontSize", params.font_size)?;
    require_positive("MonoWidthRatio", params.mono_width_ratio)?;
    if !margin_mm.is_finite() || margin_mm < 0.0 {
        return Err(LayoutError::invalid(
            "margin",
            "content/contact.yaml",
            margin_mm.to_string(),
        ));
    }

    let cell_w = params.font_size * params.mono_width_ratio * PT_TO_MM;
    let cell_h = params.font_size * PT_TO_MM;

    let columns = ((page_w - 2.0 * margin_mm) / cell_w).floor();
    let rows = ((page_h - 2.0 * margin_mm) / cell_h).floor();
    if columns < 1.0 || rows < 1.0 {
        return Err(LayoutError::invalid(
            "margin",
            "content/contact.yaml",
            format!("{margin_mm} (leaves a {columns}x{rows} grid)"),
        ));
    }
    let columns = columns as usize;
    let rows = rows as usize;

    let header_height = params.header_height.max(0.0) as usize;
    let left_width = params.left_box_width.max(0.0) as usize;
    let right_col_x = (params.left_box_width + params.column_gap).max(0.0) as usize;

    Ok(GridSpec {
        paper,
        cell_width_mm: cell_w,
        cell_height_mm: cell_h,
        columns,
        rows,
        header_height,
        gap_header_to_content: params.gap_header_to_content,
        gap_box_to_box: params.gap_box_to_box,
        content_start_row: header_height as f64 + params.gap_header_to_content,
        max_row: rows,
        padding: params.padding,
        min_split_content_rows: params.min_split_content_rows.max(0.0) as usize,
        left_width,
        right_col_x,
        right_width: columns.saturating_sub(right_col_x),
    })
}

fn require_positive(name: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::invalid(name, "engine/preamble.tex", value.to_string()))
    }
}

/// Total box height: top border + padding + content + padding + bottom border,
/// truncated toward zero.
pub fn box_rows(content_rows: usize, pad_top: f64, pad_bot: f64) -> usize {
    (1.0 + pad_top + content_rows as f64 + pad_bot + 1.0) as usize
}

impl GridSpec {
    /// Box height for `content_rows` of content in a box of the given column type.
    pub fn box_rows_for(&self, column: ColumnType, content_rows: usize) -> usize {
        let pad = self.padding.for_column(column);
        box_rows(content_rows, pad.top, pad.bottom)
    }

    /// Rows left for content if a box of this column type started at `top`:
    /// `max_row − top − border − pad_top − pad_bot − border`, truncated.
    pub fn available_content_rows(&self, column: ColumnType, top: f64) -> i64 {
        let pad = self.padding.for_column(column);
        (self.max_row as f64 - top - 1.0 - pad.top - pad.bottom - 1.0) as i64
    }

    /// Outer width of a column in grid cells.
    pub fn column_width(&self, column: ColumnType) -> usize {
        match column {
            ColumnType::Left => self.left_width,
            ColumnType::Right => self.right_width,
            ColumnType::Full => self.columns,
        }
    }

    /// Width available to content inside a box of this column type.
    pub fn content_width(&self, column: ColumnType) -> usize {
        let pad = self.padding.for_column(column);
        (self.column_width(column) as f64 - 2.0 - pad.left - pad.right).max(0.0) as usize
    }

    /// One-line human summary, logged at start-up.
    pub fn summary(&self) -> String {
        format!(
            "Grid: {} cols × {} rows | Content starts at Y={} | Max Y={}",
            self.columns, self.rows, self.content_start_row, self.max_row
        )
    }

    /// Cell size and horizontal column geometry, logged at debug level.
    pub fn geometry(&self) -> String {
        format!(
            "Paper {}: cell {:.3}×{:.3}mm | header {} + gap {} | \
             left {} wide (content {}) | right at X={} {} wide (content {}) | \
             full {} wide (content {})",
            self.paper.name(),
            self.cell_width_mm,
            self.cell_height_mm,
            self.header_height,
            self.gap_header_to_content,
            self.column_width(ColumnType::Left),
            self.content_width(ColumnType::Left),
            self.right_col_x,
            self.column_width(ColumnType::Right),
            self.content_width(ColumnType::Right),
            self.column_width(ColumnType::Full),
            self.content_width(ColumnType::Full),
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn make_params() -> GridParams {
        let pad = Padding {
            top: 1.0,
            bottom: 1.0,
            left: 2.0,
            right: 2.0,
        };
        GridParams {
            font_size: 9.0,
            mono_width_ratio: 0.6,
            header_height: 10.0,
            gap_header_to_content: 1.0,
            gap_box_to_box: 1.0,
            left_box_width: 30.0,
            column_gap: 2.0,
            padding: ColumnPadding {
                left: pad,
                right: pad,
                full: pad,
            },
            min_split_content_rows: 3.0,
        }
    }

    #[test]
    fn test_a4_grid_dimensions() {
        let grid = compute_grid("a4", 12.7, &make_params()).unwrap();
        assert!((grid.cell_width_mm - 1.905).abs() < 1e-9);
        assert!((grid.cell_height_mm - 3.175).abs() < 1e-9);
        // ⌊184.6 / 1.905⌋ = 96, ⌊271.6 / 3.175⌋ = 85
        assert_eq!(grid.columns, 96);
        assert_eq!(grid.rows, 85);
        assert_eq!(grid.max_row, 85);
    }

    #[test]
    fn test_letter_grid_dimensions() {
        let grid = compute_grid("letter", 10.0, &make_params()).unwrap();
        // ⌊195.9 / 1.905⌋ = 102, ⌊259.4 / 3.175⌋ = 81
        assert_eq!(grid.columns, 102);
        assert_eq!(grid.rows, 81);
    }

    #[test]
    fn test_paper_size_is_case_insensitive() {
        let grid = compute_grid("A4", 12.7, &make_params()).unwrap();
        assert_eq!(grid.paper, PaperSize::A4);
    }

    #[test]
    fn test_grid_is_deterministic() {
        let params = make_params();
        let a = compute_grid("a4", 12.7, &params).unwrap();
        let b = compute_grid("a4", 12.7, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_paper_size_is_rejected() {
        let err = compute_grid("a3", 12.7, &make_params()).unwrap_err();
        match err {
            LayoutError::UnknownPaperSize { value, valid } => {
                assert_eq!(value, "a3");
                assert_eq!(valid, "a4, letter");
            }
            other => panic!("expected UnknownPaperSize, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_font_size_is_rejected() {
        let mut params = make_params();
        params.font_size = 0.0;
        let err = compute_grid("a4", 12.7, &params).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidParameter { ref name, .. } if name == "GridFontSize"
        ));
    }

    #[test]
    fn test_margin_consuming_page_is_rejected() {
        let err = compute_grid("a4", 120.0, &make_params()).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidParameter { .. }));
    }

    #[test]
    fn test_content_start_row() {
        let grid = compute_grid("a4", 12.7, &make_params()).unwrap();
        assert_eq!(grid.header_height, 10);
        assert_eq!(grid.content_start_row, 11.0);
    }

    #[test]
    fn test_box_rows_formula() {
        // border + pad + content + pad + border = 1 + 1 + 10 + 1 + 1
        assert_eq!(box_rows(10, 1.0, 1.0), 14);
        assert_eq!(box_rows(0, 0.0, 0.0), 2);
        // fractional padding truncates
        assert_eq!(box_rows(10, 0.5, 0.75), 13);
    }

    #[test]
    fn test_available_content_rows() {
        let grid = compute_grid("a4", 12.7, &make_params()).unwrap();
        // 85 − 11 − 1 − 1 − 1 − 1
        assert_eq!(grid.available_content_rows(ColumnType::Left, 11.0), 70);
        assert_eq!(grid.available_content_rows(ColumnType::Left, 84.0), -3);
    }

    #[test]
    fn test_column_widths() {
        let grid = compute_grid("a4", 12.7, &make_params()).unwrap();
        assert_eq!(grid.column_width(ColumnType::Left), 30);
        assert_eq!(grid.right_col_x, 32);
        assert_eq!(grid.column_width(ColumnType::Right), 64);
        assert_eq!(grid.column_width(ColumnType::Full), 96);
        assert_eq!(grid.content_width(ColumnType::Left), 24);
    }

    #[test]
    fn test_geometry_line() {
        let grid = compute_grid("a4", 12.7, &make_params()).unwrap();
        assert_eq!(
            grid.geometry(),
            "Paper a4: cell 1.905×3.175mm | header 10 + gap 1 | left 30 wide (content 24) | \
             right at X=32 64 wide (content 58) | full 96 wide (content 90)"
        );
    }
}
