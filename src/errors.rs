//! Typed error hierarchy for the scaffolding pipeline.
//!
//! One variant per failure kind from the pipeline stages, so callers and
//! tests can match on what went wrong instead of inspecting message text:
//! - configuration (missing template combination)
//! - filesystem (copy/write/remove, with the failing path)
//! - conflict resolution (undecidable or exhausted)
//! - interactive input
//! - installer

use std::path::PathBuf;
use thiserror::Error;

/// Errors from the scaffolding pipeline stages.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    #[error("No template for combination '{combination}' (expected at {path})")]
    MissingTemplate { combination: String, path: PathBuf },

    #[error("Filesystem error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Target directory {path} is not empty and no overwrite decision is available. \
         Re-run interactively, or set KILN_FORCE_OVERWRITE / KILN_RENAME_TO."
    )]
    UnresolvedConflict { path: PathBuf },

    #[error("Gave up after {attempts} rename attempts without finding a free target directory")]
    TooManyRenames { attempts: u32 },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Dependency install failed (exit code {exit_code}):\n{stderr}")]
    Install { exit_code: i32, stderr: String },
}

impl ScaffoldError {
    /// Wrap an io error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
