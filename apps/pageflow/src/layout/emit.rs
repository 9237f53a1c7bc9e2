//! Canvas emitter — serializes a `LayoutPlan` into the `canvas.tex` the box engine renders.
//!
//! Layout per page: banner, header (page 1) or page break, then left / right / full column
//! blocks. On pages after the first, an empty left or right column still gets its `Init`
//! so the engine's cursor is reset.

use crate::input::contact::HeaderTheme;
use crate::layout::plan::{ColumnType, LayoutPlan};

/// Which pass produced the plan; only changes the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanMode {
    Measure,
    Layout,
}

impl PlanMode {
    pub fn label(&self) -> &'static str {
        match self {
            PlanMode::Measure => "measurement pass",
            PlanMode::Layout => "layout pass",
        }
    }
}

/// Engine macro names for one column.
struct ColumnMacros {
    comment: &'static str,
    init: &'static str,
    gap: &'static str,
    place: &'static str,
}

fn macros(column: ColumnType) -> ColumnMacros {
    match column {
        ColumnType::Left => ColumnMacros {
            comment: "% --- Left column ---",
            init: r"\LeftBoxInit{0}{\ContentStartY}",
            gap: r"\LeftBoxGap{\GapBoxToBox}",
            place: "LeftBox",
        },
        ColumnType::Right => ColumnMacros {
            comment: "% --- Right column ---",
            init: r"\RightBoxInit{\RightColX}{\ContentStartY}",
            gap: r"\RightBoxGap{\GapBoxToBox}",
            place: "RightBox",
        },
        ColumnType::Full => ColumnMacros {
            comment: "% --- Full-width ---",
            init: r"\FullBoxInit{0}{\ContentStartY}",
            gap: r"\FullBoxGap{\GapBoxToBox}",
            place: "FullBox",
        },
    }
}

fn canvas_preamble(theme: HeaderTheme, mode: PlanMode) -> String {
    format!(
        "\
% !! AUTO-GENERATED by pageflow ({mode}) — DO NOT EDIT !!
% Source: content/layout.yaml

% ===========================================================================
% CANVAS.TEX — Layout Assembly (auto-generated)
% ===========================================================================

% --- Load engine ---
\\input{{{header}}}
\\input{{engine/leftbox.tex}}
\\input{{engine/rightbox.tex}}
\\input{{engine/fullbox.tex}}
\\input{{engine/pageflow.tex}}

% --- Load contact data ---
\\input{{generated/contact.tex}}

% --- Store header for repetition ---
\\SetCVHeader
    {{\\StoredContactName}}
    {{\\StoredContactTitle}}
    {{\\StoredContactEmail}}
    {{\\StoredContactPhone}}
    {{\\StoredContactLinkedIn}}
    {{\\StoredContactLocation}}
",
        mode = mode.label(),
        header = theme.engine_file(),
    )
}

fn emit_page_header(out: &mut Vec<String>, page: u32) {
    let rule = "=".repeat(76);
    out.push(format!("% {rule}"));
    out.push(format!("% PAGE {page}"));
    out.push(format!("% {rule}"));
    out.push(String::new());
    if page == 1 {
        out.push("% --- Header ---".to_string());
        out.push(r"\CVHeader{0}{0}".to_string());
        out.push(r"    {\StoredName}{\StoredTitle}".to_string());
        out.push(r"    {\StoredEmail}{\StoredPhone}".to_string());
        out.push(r"    {\StoredLinkedin}{\StoredLocation}".to_string());
    } else {
        out.push(r"\CVPageBreak".to_string());
    }
    out.push(String::new());
}

/// Renders the whole canvas.
pub fn emit_canvas(plan: &LayoutPlan, theme: HeaderTheme, mode: PlanMode) -> String {
    let mut out: Vec<String> = vec![canvas_preamble(theme, mode)];

    for page in plan.pages() {
        emit_page_header(&mut out, page);

        for column in ColumnType::ALL {
            let m = macros(column);
            let boxes: Vec<_> = plan.boxes_on(page, column).collect();
            if boxes.is_empty() {
                continue;
            }
            out.push(m.comment.to_string());
            out.push(m.init.to_string());
            for (i, placement) in boxes.iter().enumerate() {
                if i > 0 {
                    out.push(m.gap.to_string());
                }
                out.push(format!(
                    "\\{}{{{}}}{{{}}}",
                    m.place, placement.title, placement.content_ref
                ));
            }
            out.push(String::new());
        }

        if page > 1 {
            for column in [ColumnType::Left, ColumnType::Right] {
                if plan.boxes_on(page, column).next().is_none() {
                    out.push(macros(column).init.to_string());
                }
            }
        }
        out.push(String::new());
    }

    out.push(r"\endinput".to_string());
    let mut text = out.join("\n");
    text.push('\n');
    text
}
