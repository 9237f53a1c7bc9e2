// Layout engine: grid model, boundary scanning, splitting and page packing.
// Pure computation; the only I/O goes through `content::BlockSource`.

pub mod boundary;
pub mod emit;
pub mod estimate;
pub mod grid;
pub mod measure;
pub mod packer;
pub mod plan;
pub mod splitter;

// Re-export the public API consumed by the pipeline.
pub use emit::{emit_canvas, PlanMode};
pub use measure::generate_measure_plan;
pub use packer::pack;
pub use plan::LayoutPlan;
