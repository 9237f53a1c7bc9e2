//! Page/column packer — turns measured heights into a paginated plan.
//!
//! # Algorithm
//! Each column type is packed on its own (left and right share page numbers, never vertical
//! budget). Walking a column's sections in declaration order with a cursor `(page, y)`:
//! 1. A box that fits below the cursor (plus one `gap_box` unless it opens the page) is placed.
//! 2. Otherwise, if enough content rows remain on the page and the block has boundaries,
//!    the last boundary whose estimated head still fits is chosen (scan stops at the first
//!    one that overflows). Head stays on this page; tail opens the next page as "(cont.)".
//! 3. Otherwise the whole block moves to the next page.
//!
//! Heights of split halves are estimates (see `estimate`), never re-measured.

use tracing::{debug, info, warn};

use crate::content::{BlockSource, ContentBlock};
use crate::errors::LayoutError;
use crate::input::heights::MeasuredHeights;
use crate::layout::boundary::find_split_boundaries;
use crate::layout::estimate::{estimate_remainder_rows, estimate_split_rows};
use crate::layout::grid::GridSpec;
use crate::layout::plan::{BoxPlacement, ColumnType, ContentRef, LayoutPlan, RowSpan, Section};
use crate::layout::splitter::{split, SplitBlocks};

/// Suffix appended to the title of the second half of a split box.
pub const CONTINUATION_SUFFIX: &str = " (cont.)";

// ────────────────────────────────────────────────────────────────────────────
// Decision types
// ────────────────────────────────────────────────────────────────────────────

/// Outcome of the split search for a box that does not fit.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitDecision {
    /// Cut at `boundaries[boundary_index]`.
    Split {
        boundary_index: usize,
        boundary_line: usize,
        head_box_rows: usize,
        tail_box_rows: usize,
        parts: SplitBlocks,
    },
    /// No usable boundary: move the whole block to the next page.
    Defer,
}

/// Placements and split halves for one column.
#[derive(Debug, Default)]
struct PackedColumn {
    placements: Vec<BoxPlacement>,
    split_blocks: Vec<ContentBlock>,
    last_page: u32,
}

/// Write position inside one column.
struct Cursor {
    page: u32,
    y: f64,
    /// Whether a box already sits on `page` in this column.
    occupied: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Packs every section onto pages.
///
/// All heights are checked before anything is placed; a missing entry is fatal and no plan
/// is produced. Blocks are only loaded from `source` when a box overflows and a split is
/// considered.
pub fn pack(
    sections: &[Section],
    grid: &GridSpec,
    heights: &MeasuredHeights,
    source: &dyn BlockSource,
) -> Result<LayoutPlan, LayoutError> {
    for section in sections {
        heights.require(&section.content_ref)?;
    }

    let mut plan = LayoutPlan {
        total_pages: 1,
        ..LayoutPlan::default()
    };

    for column in ColumnType::ALL {
        let column_sections: Vec<&Section> =
            sections.iter().filter(|s| s.column == column).collect();
        let packed = pack_column(column, &column_sections, grid, heights, source)?;

        plan.total_pages = plan.total_pages.max(packed.last_page);
        plan.placements.extend(packed.placements);
        plan.split_blocks.extend(packed.split_blocks);
    }

    info!(
        pages = plan.total_pages,
        boxes = plan.placements.len(),
        splits = plan.split_count(),
        "Layout packed"
    );
    Ok(plan)
}

// ────────────────────────────────────────────────────────────────────────────
// Column packing
// ────────────────────────────────────────────────────────────────────────────

fn pack_column(
    column: ColumnType,
    sections: &[&Section],
    grid: &GridSpec,
    heights: &MeasuredHeights,
    source: &dyn BlockSource,
) -> Result<PackedColumn, LayoutError> {
    let start_y = grid.content_start_row;
    let max_y = grid.max_row as f64;
    let mut out = PackedColumn {
        last_page: 1,
        ..PackedColumn::default()
    };
    let mut cursor = Cursor {
        page: 1,
        y: start_y,
        occupied: false,
    };

    for section in sections {
        let content_rows = heights.require(&section.content_ref)?;
        let box_rows = grid.box_rows_for(column, content_rows);

        let gap = if cursor.occupied { grid.gap_box_to_box } else { 0.0 };
        let test_y = cursor.y + gap;

        if test_y + box_rows as f64 <= max_y {
            debug!(
                %column,
                page = cursor.page,
                top = test_y,
                rows = box_rows,
                title = %section.title,
                "Box fits"
            );
            out.placements.push(place(
                &section.title,
                section.content_ref.clone(),
                column,
                cursor.page,
                test_y,
                box_rows,
            ));
            cursor.y = test_y + box_rows as f64;
            cursor.occupied = true;
            continue;
        }

        let decision = if grid.available_content_rows(column, test_y)
            >= grid.min_split_content_rows as i64
        {
            let block = source.load(&section.content_ref)?;
            choose_split(&block, content_rows, column, test_y, grid)
        } else {
            SplitDecision::Defer
        };

        match decision {
            SplitDecision::Split {
                boundary_index,
                boundary_line,
                head_box_rows,
                tail_box_rows,
                parts,
            } => {
                info!(
                    %column,
                    page = cursor.page,
                    boundary = boundary_index,
                    line = boundary_line,
                    "Split {} -> {}, {}",
                    section.content_ref,
                    parts.head.reference,
                    parts.tail.reference
                );
                out.placements.push(place(
                    &section.title,
                    parts.head.reference.clone(),
                    column,
                    cursor.page,
                    test_y,
                    head_box_rows,
                ));

                cursor.page += 1;
                let title = format!("{}{CONTINUATION_SUFFIX}", section.title);
                out.placements.push(place(
                    &title,
                    parts.tail.reference.clone(),
                    column,
                    cursor.page,
                    start_y,
                    tail_box_rows,
                ));
                cursor.y = start_y + tail_box_rows as f64;
                cursor.occupied = true;

                out.split_blocks.push(parts.head);
                out.split_blocks.push(parts.tail);
            }
            SplitDecision::Defer => {
                cursor.page += 1;
                if start_y + box_rows as f64 > max_y {
                    warn!(
                        %column,
                        page = cursor.page,
                        rows = box_rows,
                        title = %section.title,
                        "Box is taller than an empty page and cannot be split; it will overflow"
                    );
                } else {
                    info!(
                        %column,
                        page = cursor.page,
                        title = %section.title,
                        "Deferred to next page"
                    );
                }
                out.placements.push(place(
                    &section.title,
                    section.content_ref.clone(),
                    column,
                    cursor.page,
                    start_y,
                    box_rows,
                ));
                cursor.y = start_y + box_rows as f64;
                cursor.occupied = true;
            }
        }
    }

    out.last_page = cursor.page;
    Ok(out)
}

fn place(
    title: &str,
    content_ref: ContentRef,
    column: ColumnType,
    page: u32,
    top: f64,
    rows: usize,
) -> BoxPlacement {
    BoxPlacement {
        title: title.to_string(),
        content_ref,
        column,
        page,
        span: Some(RowSpan { top, rows }),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Split search
// ────────────────────────────────────────────────────────────────────────────

/// Picks the boundary to cut an overflowing block at, for a box whose top would be `top`.
///
/// Walks boundaries in order and keeps the last one whose estimated head box still ends
/// within the page, stopping at the first that would overflow. Boundaries that would leave
/// either half without content are skipped.
pub fn choose_split(
    block: &ContentBlock,
    content_rows: usize,
    column: ColumnType,
    top: f64,
    grid: &GridSpec,
) -> SplitDecision {
    let boundaries = find_split_boundaries(block);
    let total_lines = block.line_count();
    let max_y = grid.max_row as f64;

    let mut best: Option<(usize, usize, SplitBlocks)> = None;
    for (index, &line) in boundaries.iter().enumerate() {
        let head_rows = estimate_split_rows(content_rows, line, total_lines);
        let head_box_rows = grid.box_rows_for(column, head_rows);
        if top + head_box_rows as f64 > max_y {
            break;
        }
        let parts = split(block, &boundaries, index);
        if parts.is_degenerate() {
            debug!(boundary = index, line, "Skipping boundary that leaves an empty half");
            continue;
        }
        best = Some((index, head_box_rows, parts));
    }

    match best {
        Some((boundary_index, head_box_rows, parts)) => {
            let boundary_line = boundaries[boundary_index];
            let tail_rows = estimate_remainder_rows(content_rows, boundary_line, total_lines);
            SplitDecision::Split {
                boundary_index,
                boundary_line,
                head_box_rows,
                tail_box_rows: grid.box_rows_for(column, tail_rows),
                parts,
            }
        }
        None => SplitDecision::Defer,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
