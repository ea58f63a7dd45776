use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    /// The input bytes do not form a readable PDF document.
    #[error("failed to parse PDF: {0}")]
    Parse(#[source] lopdf::Error),

    #[error("failed to write cleaned PDF: {0}")]
    Write(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum CompressError {
    /// No known Ghostscript binary on the search path. Every run fails
    /// this way until the deployment is fixed.
    #[error("Ghostscript not found on PATH (tried: {candidates})")]
    ToolUnavailable { candidates: String },

    /// The subprocess outlived its wall-clock budget and was killed.
    #[error("Ghostscript timed out after {seconds}s; retry with a smaller file or lower quality")]
    Timeout { seconds: u64 },

    /// Ghostscript ran to completion and reported failure.
    #[error("Ghostscript failed ({status})\nstdout: {stdout}\nstderr: {stderr}")]
    Exited {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },

    #[error("failed to run Ghostscript: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures of the combined clean-then-compress pipeline.
#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Clean(#[from] CleanError),

    #[error(transparent)]
    Compress(#[from] CompressError),

    /// Ghostscript exited cleanly but the declared output is unusable.
    #[error("compressed output {} is missing or empty", .path.display())]
    EmptyOutput { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
