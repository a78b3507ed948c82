//! Error types for wrapgen-inject.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use wrapgen_core::{ConfigError, RegistryError};
use wrapgen_renderer::RenderError;

/// Why a file's marker pair is unusable. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerProblem {
    MissingStart,
    MissingEnd,
    DuplicateStart { first: usize, second: usize },
    DuplicateEnd { first: usize, second: usize },
    /// Both sentinels appear on the same line.
    SameLine { line: usize },
    EndBeforeStart { start: usize, end: usize },
    /// Line `line` of the rendered region contains a marker sentinel, so the
    /// written file could not be segmented again.
    RenderedContainsMarker { line: usize },
}

impl fmt::Display for MarkerProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerProblem::MissingStart => write!(f, "no start marker"),
            MarkerProblem::MissingEnd => write!(f, "no end marker"),
            MarkerProblem::DuplicateStart { first, second } => {
                write!(f, "start marker on lines {first} and {second}")
            }
            MarkerProblem::DuplicateEnd { first, second } => {
                write!(f, "end marker on lines {first} and {second}")
            }
            MarkerProblem::SameLine { line } => {
                write!(f, "start and end markers share line {line}")
            }
            MarkerProblem::EndBeforeStart { start, end } => {
                write!(f, "end marker (line {end}) precedes start marker (line {start})")
            }
            MarkerProblem::RenderedContainsMarker { line } => {
                write!(f, "rendered line {line} contains an injection marker")
            }
        }
    }
}

/// All errors that can arise from injection runs.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The target file lacks a well-formed marker pair. The file is untouched.
    #[error("marker not found in {path}: {problem}")]
    MarkerNotFound { path: PathBuf, problem: MarkerProblem },

    /// An error from the rendering engine.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// An error from the type registry (e.g. unknown configured type).
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// An error loading configuration.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`InjectError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> InjectError {
    InjectError::Io {
        path: path.into(),
        source,
    }
}
