use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::input::{contact::CONTACT_SOURCE, preamble::PREAMBLE_SOURCE, sections::LAYOUT_SOURCE};
use crate::layout::plan::GENERATED_DIR;

/// Process configuration loaded from flags, environment variables and an optional `.env`.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: ProjectPaths,
    pub rust_log: String,
}

impl Config {
    /// Project root precedence: `--root` flag, then `PAGEFLOW_ROOT`, then the working directory.
    pub fn from_env(cli_root: Option<PathBuf>) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let root = match cli_root {
            Some(root) => root,
            None => match std::env::var("PAGEFLOW_ROOT") {
                Ok(root) if !root.trim().is_empty() => PathBuf::from(root),
                _ => std::env::current_dir()
                    .context("Cannot determine the current directory for the project root")?,
            },
        };

        Ok(Config {
            paths: ProjectPaths::new(root),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Every input and output location, derived from the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub contact_yaml: PathBuf,
    pub layout_yaml: PathBuf,
    pub preamble: PathBuf,
    pub heights: PathBuf,
    pub generated_dir: PathBuf,
    pub canvas: PathBuf,
}

impl ProjectPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        ProjectPaths {
            contact_yaml: root.join(CONTACT_SOURCE),
            layout_yaml: root.join(LAYOUT_SOURCE),
            preamble: root.join(PREAMBLE_SOURCE),
            heights: root.join("build").join("boxheights.dat"),
            generated_dir: root.join(GENERATED_DIR),
            canvas: root.join(GENERATED_DIR).join("canvas.tex"),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
