//! Measurement pass — every box on page 1, no breaks, so the renderer can log true heights.

use crate::layout::plan::{BoxPlacement, ColumnType, LayoutPlan, Section};

/// Places every section on page 1, grouped by column in declaration order.
///
/// The result may overflow the physical page; it exists only to be measured.
pub fn generate_measure_plan(sections: &[Section]) -> LayoutPlan {
    let placements = ColumnType::ALL
        .iter()
        .flat_map(|&column| sections.iter().filter(move |s| s.column == column))
        .map(|section| BoxPlacement {
            title: section.title.clone(),
            content_ref: section.content_ref.clone(),
            column: section.column,
            page: 1,
            span: None,
        })
        .collect();

    LayoutPlan {
        placements,
        total_pages: 1,
        split_blocks: Vec::new(),
    }
}
