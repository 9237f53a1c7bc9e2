mod config;
mod content;
mod errors;
mod input;
mod layout;
mod pipeline;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::errors::LayoutError;

/// Two-pass layout engine for grid-aligned CV documents.
#[derive(Parser, Debug)]
#[command(name = "pageflow", version, about)]
#[command(group(ArgGroup::new("mode").required(true).args(["measure", "layout"])))]
struct Cli {
    /// Pass 1: place every box on page 1 so the renderer can measure content heights
    #[arg(long)]
    measure: bool,

    /// Pass 2: paginate with measured heights, splitting blocks that overflow
    #[arg(long)]
    layout: bool,

    /// Project root (defaults to $PAGEFLOW_ROOT, then the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Also write the computed plan as JSON (layout pass only)
    #[arg(long, value_name = "FILE", requires = "layout")]
    plan_json: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env(cli.root)?;

    // Logs go to stderr; generated files are the only output.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        "Starting pageflow v{} in {}",
        env!("CARGO_PKG_VERSION"),
        config.paths.root().display()
    );

    let result = if cli.measure {
        pipeline::run_measure(&config.paths)
    } else {
        pipeline::run_layout(&config.paths, cli.plan_json.as_deref())
    };

    match result {
        Ok(summary) => {
            info!(
                pages = summary.total_pages,
                boxes = summary.boxes,
                splits = summary.splits,
                "Done: {} ({})",
                summary.canvas.display(),
                summary.mode.label()
            );
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            report(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn report(e: &LayoutError) {
    eprintln!("ERROR [{}]: {e}", e.code());
    if e.is_configuration() {
        eprintln!("No output was written.");
    }
}
