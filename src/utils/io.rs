//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("{} {}", operation, path.display())),
        )
    })
}

/// Write content to file with standardized error handling.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("{} {}", operation, path.display())),
        )
    })
}

/// Write content to file atomically (write to .tmp, then rename).
///
/// Readers see either the old content or the new content, never a partial write.
pub fn write_file_atomic(path: &Path, content: &str, operation: &str) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let filename = path.file_name().ok_or_else(|| {
        Error::internal_io(
            format!("Invalid path: {}", path.display()),
            Some(operation.to_string()),
        )
    })?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    fs::write(&tmp_path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (write temp)", operation))))?;

    fs::rename(&tmp_path, path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("{} (rename)", operation))))?;

    Ok(())
}

/// Delete a file or directory tree if it exists.
///
/// Returns `false` without touching disk when nothing is at `path`.
pub fn remove_path_if_exists(path: &Path) -> Result<bool> {
    let Ok(meta) = fs::symlink_metadata(path) else {
        return Ok(false);
    };

    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("remove {}", path.display())))
    })?;

    Ok(true)
}

/// Rename a file or directory if the source exists, creating the destination's
/// parent directories on demand.
///
/// Returns `false` when the source is absent or already equals the destination.
pub fn rename_path_if_exists(from: &Path, to: &Path) -> Result<bool> {
    if !from.exists() || from == to {
        return Ok(false);
    }

    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("create {}", parent.display())))
        })?;
    }

    fs::rename(from, to).map_err(|e| {
        Error::internal_io(
            e.to_string(),
            Some(format!("rename {} → {}", from.display(), to.display())),
        )
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn read_file_succeeds_for_existing_file() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test content").unwrap();

        let content = read_file(temp.path(), "test read").unwrap();
        assert!(content.contains("test content"));
    }

    #[test]
    fn read_file_returns_error_for_missing_file() {
        let result = read_file(Path::new("/nonexistent/path.txt"), "test read");
        let err = result.unwrap_err();
        assert_eq!(err.code.as_str(), "internal.io_error");
    }

    #[test]
    fn write_file_atomic_replaces_content_and_leaves_no_temp() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, "old").unwrap();

        write_file_atomic(&path, "new", "test write").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("package.json.tmp").exists());
    }

    #[test]
    fn remove_path_handles_dirs_files_and_missing() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("Runtime").join("Nested");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("a.cs"), "class A {}").unwrap();
        let file = dir.path().join("README.md");
        fs::write(&file, "readme").unwrap();

        assert!(remove_path_if_exists(&dir.path().join("Runtime")).unwrap());
        assert!(remove_path_if_exists(&file).unwrap());
        assert!(!dir.path().join("Runtime").exists());
        assert!(!file.exists());

        assert!(!remove_path_if_exists(&dir.path().join("Runtime")).unwrap());
    }

    #[test]
    fn rename_path_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("Editor").join("HTDA").join("Template");
        fs::create_dir_all(&from).unwrap();
        let to = dir
            .path()
            .join("Editor")
            .join("HTDA")
            .join("Framework")
            .join("Core");

        assert!(rename_path_if_exists(&from, &to).unwrap());
        assert!(to.is_dir());
        assert!(!from.exists());

        assert!(!rename_path_if_exists(&from, &to).unwrap());
    }
}
