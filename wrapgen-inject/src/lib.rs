//! # wrapgen-inject
//!
//! Marker-based injection engine and run orchestration.
//!
//! Call [`inject`] to splice rendered text into one file, or
//! [`pipeline::run`] to regenerate every configured target.

pub mod diff;
pub mod error;
pub mod inject;
pub mod pipeline;
pub mod segment;
pub mod writer;

pub use diff::{diff_targets, FileDiff};
pub use error::{InjectError, MarkerProblem};
pub use inject::{inject, InjectionOutcome, Preview};
pub use pipeline::Generator;
pub use segment::SegmentedFile;
pub use writer::WriteResult;
