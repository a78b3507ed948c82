//! Marker-based injection of rendered text into a single file.
//!
//! The region between the markers is always replaced wholesale; hand edits
//! belong outside it. Files with a malformed marker pair are never written.

use std::fmt;
use std::path::{Path, PathBuf};

use wrapgen_core::Markers;

use crate::error::{io_err, InjectError};
use crate::segment::{check_rendered, SegmentedFile};
use crate::writer::{atomic_write, WriteResult};

/// Before/after view produced by a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub path: PathBuf,
    /// Region that sat between the markers before this run.
    pub previous: String,
    /// Complete file content this run would write.
    pub new_output: String,
}

/// `=` rule, `| label |`, `=` rule.
fn banner(label: &str) -> String {
    let separator = "=".repeat(label.chars().count() + 4);
    format!("{separator}\n| {label} |\n{separator}")
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        let chunks = [
            (format!("Previously Generated Code <{path}>"), &self.previous),
            (format!("New File Output <{path}>"), &self.new_output),
        ];
        for (label, body) in chunks {
            writeln!(f, "\n{}\n", banner(&label))?;
            f.write_str(body)?;
            if !body.ends_with('\n') {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Result of injecting into one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionOutcome {
    pub write: WriteResult,
    /// Present only for dry runs.
    pub preview: Option<Preview>,
}

impl InjectionOutcome {
    pub fn path(&self) -> &Path {
        self.write.path()
    }
}

/// Read, validate and segment `path` without modifying it.
pub fn read_segmented(path: &Path, markers: &Markers) -> Result<(String, SegmentedFile), InjectError> {
    let current = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let segmented = SegmentedFile::parse(&current, markers).map_err(|problem| {
        InjectError::MarkerNotFound {
            path: path.to_path_buf(),
            problem,
        }
    })?;
    Ok((current, segmented))
}

/// Replace the marked region of `path` with `rendered`.
///
/// - `dry_run = true`: nothing is written; the outcome carries a [`Preview`].
/// - `dry_run = false`: the file is rewritten atomically if its content changes.
///
/// On [`InjectError::MarkerNotFound`] the file is left untouched. That
/// includes `rendered` itself containing a sentinel line.
pub fn inject(
    path: &Path,
    rendered: &str,
    markers: &Markers,
    dry_run: bool,
) -> Result<InjectionOutcome, InjectError> {
    let (current, segmented) = read_segmented(path, markers)?;
    check_rendered(rendered, markers).map_err(|problem| InjectError::MarkerNotFound {
        path: path.to_path_buf(),
        problem,
    })?;
    let new_content = segmented.splice(rendered);

    let write = atomic_write(path, &new_content, &current, dry_run)?;
    let preview = dry_run.then(|| Preview {
        path: path.to_path_buf(),
        previous: segmented.existing(),
        new_output: new_content,
    });

    Ok(InjectionOutcome { write, preview })
}
