//! Unified diff support for `wrapgen diff`.

use std::path::{Path, PathBuf};

use similar::TextDiff;

use crate::{inject::read_segmented, pipeline::Generator, segment::check_rendered, InjectError};

/// A single target's pending change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render every target and compare the spliced result with on-disk content.
///
/// No files are written. Targets already up to date produce no entry.
/// Marker errors abort the diff just as they abort a run.
pub fn diff_targets(generator: &Generator) -> Result<Vec<FileDiff>, InjectError> {
    let markers = &generator.config().markers;
    let mut diffs = Vec::new();
    for target in &generator.config().targets {
        let path = generator.target_path(target);
        let rendered = generator.render_target(target)?;
        let (existing, segmented) = read_segmented(&path, markers)?;
        check_rendered(&rendered, markers).map_err(|problem| InjectError::MarkerNotFound {
            path: path.clone(),
            problem,
        })?;
        let updated = segmented.splice(&rendered);
        if existing == updated {
            continue;
        }

        let relative = display_path(generator.root(), &path);
        let old_header = format!("a/{relative}");
        let new_header = format!("b/{relative}");
        let unified = TextDiff::from_lines(&existing, &updated)
            .unified_diff()
            .header(&old_header, &new_header)
            .context_radius(3)
            .to_string();

        diffs.push(FileDiff {
            path,
            unified_diff: unified,
        });
    }
    Ok(diffs)
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
