//! Atomic, change-gated file writer.
//!
//! ## `atomic_write` protocol
//!
//! 1. Compare the new content with what is on disk → skip if identical.
//! 2. In dry-run mode, report `WouldWrite` and stop.
//! 3. Write to `<path>.wrapgen.tmp` in the same directory.
//! 4. Rename over the final path (atomic on POSIX); remove the tmp on failure.

use std::path::{Path, PathBuf};

use crate::error::{io_err, InjectError};

/// Outcome of an individual file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was rewritten with new content.
    Written { path: PathBuf },
    /// New content is identical to the file on disk; nothing was written.
    Unchanged { path: PathBuf },
    /// Dry-run mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }

    /// `true` for `Written` and `WouldWrite`.
    pub fn is_change(&self) -> bool {
        !matches!(self, WriteResult::Unchanged { .. })
    }
}

/// Sibling temp path used while writing `path`.
pub fn tmp_path_for(path: &Path) -> PathBuf {
    PathBuf::from(format!("{}.wrapgen.tmp", path.display()))
}

/// Replace `path` with `content` unless it already equals `current`.
///
/// `current` is the file content the caller read; the writer does not re-read.
pub fn atomic_write(
    path: &Path,
    content: &str,
    current: &str,
    dry_run: bool,
) -> Result<WriteResult, InjectError> {
    atomic_write_with_tmp(path, content, current, dry_run, &tmp_path_for(path))
}

fn atomic_write_with_tmp(
    path: &Path,
    content: &str,
    current: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, InjectError> {
    if content == current {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    // Keep the target's permission bits; a fresh tmp file gets the umask default.
    if let Ok(meta) = std::fs::metadata(path) {
        if let Err(e) = std::fs::set_permissions(tmp, meta.permissions()) {
            let _ = std::fs::remove_file(tmp);
            return Err(io_err(tmp, e));
        }
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn changed_content_is_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("api_arrays.pxd");
        fs::write(&path, "v1").unwrap();
        let result = atomic_write(&path, "v2", "v1", false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
    }

    #[test]
    fn identical_content_is_unchanged() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("same.pxd");
        fs::write(&path, "same").unwrap();
        let result = atomic_write(&path, "same", "same", false).unwrap();
        assert_eq!(result, WriteResult::Unchanged { path: path.clone() });
        assert!(!result.is_change());
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.pxd");
        fs::write(&path, "before").unwrap();
        let result = atomic_write(&path, "after", "before", true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "before");
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn tmp_file_removed_after_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clean.pxd");
        fs::write(&path, "old").unwrap();
        atomic_write(&path, "data", "old", false).unwrap();
        assert!(!tmp_path_for(&path).exists(), ".wrapgen.tmp must be cleaned up");
    }

    #[test]
    #[cfg(unix)]
    fn permissions_are_preserved() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("script.pyx");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        atomic_write(&path, "new", "old", false).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    #[cfg(unix)]
    fn rename_failure_leaves_original_and_cleans_tmp() {
        use std::os::unix::fs::PermissionsExt;

        let root = TempDir::new().unwrap();
        let readonly_dir = root.path().join("readonly");
        fs::create_dir_all(&readonly_dir).unwrap();

        let path = readonly_dir.join("file.pxd");
        fs::write(&path, "original").unwrap();

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o555);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        let tmp_dir = TempDir::new().unwrap();
        let tmp_path = tmp_dir.path().join("file.pxd.wrapgen.tmp");

        let result = atomic_write_with_tmp(&path, "new content", "original", false, &tmp_path);

        let mut perms = fs::metadata(&readonly_dir).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&readonly_dir, perms).unwrap();

        // Root ignores directory permissions; only assert when the rename failed.
        if result.is_err() {
            let current = fs::read_to_string(&path).unwrap();
            assert_eq!(current, "original", "original file should be intact");
            assert!(!tmp_path.exists(), ".wrapgen.tmp should be cleaned up");
        }
    }
}
