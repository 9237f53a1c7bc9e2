//! Measurement and layout passes: load inputs, run the engine, write outputs.
//!
//! Every input is loaded and validated, and the plan is fully computed, before the first
//! file is written. A configuration error therefore never leaves partial output behind.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::ProjectPaths;
use crate::content::FsBlockSource;
use crate::errors::LayoutError;
use crate::input::{DocumentConfig, MeasuredHeights};
use crate::layout::{emit_canvas, generate_measure_plan, pack, LayoutPlan, PlanMode};

/// What a pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub mode: PlanMode,
    pub total_pages: u32,
    pub boxes: usize,
    pub splits: usize,
    pub canvas: PathBuf,
}

/// Pass 1: every box on page 1 in declaration order, so the renderer can measure heights.
pub fn run_measure(paths: &ProjectPaths) -> Result<RunSummary, LayoutError> {
    let doc = DocumentConfig::load(paths)?;
    let grid = doc.grid()?;
    info!("{}", grid.summary());
    debug!("{}", grid.geometry());

    let plan = generate_measure_plan(&doc.sections);
    write_canvas(paths, &plan, &doc, PlanMode::Measure)?;
    Ok(summarize(paths, &plan, PlanMode::Measure))
}

/// Pass 2: pack with measured heights, write split halves, the canvas and optionally the plan
/// as JSON.
pub fn run_layout(
    paths: &ProjectPaths,
    plan_json: Option<&Path>,
) -> Result<RunSummary, LayoutError> {
    let doc = DocumentConfig::load(paths)?;
    let grid = doc.grid()?;
    info!("{}", grid.summary());
    debug!("{}", grid.geometry());

    let heights = MeasuredHeights::load(&paths.heights)?;
    if heights.is_empty() {
        warn!(path = %paths.heights.display(), "Heights file has no entries");
    }
    debug!(
        entries = heights.len(),
        "Loaded heights: {:?}",
        heights.iter().collect::<Vec<_>>()
    );

    let source = FsBlockSource::new(&paths.root);
    let plan = pack(&doc.sections, &grid, &heights, &source)?;

    for block in &plan.split_blocks {
        let written = block.write_under(&paths.root)?;
        debug!(path = %written.display(), lines = block.line_count(), "Wrote split block");
    }
    write_canvas(paths, &plan, &doc, PlanMode::Layout)?;

    if let Some(path) = plan_json {
        let json = serde_json::to_string_pretty(&plan)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, json)?;
        info!(path = %path.display(), "Plan written as JSON");
    }

    Ok(summarize(paths, &plan, PlanMode::Layout))
}

fn write_canvas(
    paths: &ProjectPaths,
    plan: &LayoutPlan,
    doc: &DocumentConfig,
    mode: PlanMode,
) -> Result<(), LayoutError> {
    fs::create_dir_all(&paths.generated_dir)?;
    let canvas = emit_canvas(plan, doc.contact.header_theme, mode);
    fs::write(&paths.canvas, canvas)?;
    info!(path = %paths.canvas.display(), "Generated canvas ({})", mode.label());
    Ok(())
}

fn summarize(paths: &ProjectPaths, plan: &LayoutPlan, mode: PlanMode) -> RunSummary {
    RunSummary {
        mode,
        total_pages: plan.total_pages,
        boxes: plan.placements.len(),
        splits: plan.split_count(),
        canvas: paths.canvas.clone(),
    }
}
