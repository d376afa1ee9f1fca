//! Subtree elimination: drop the halves of the template the package type
//! does not keep.

use std::path::{Path, PathBuf};

use crate::config::PackageType;
use crate::error::Result;
use crate::template::{EDITOR_DIR, RUNTIME_DIR, TESTS_DIR};
use crate::utils::io;

/// Subtrees (relative to the package root) that `package_type` discards.
pub fn doomed_subtrees(package_type: PackageType) -> Vec<PathBuf> {
    match package_type {
        PackageType::EditorOnly => vec![
            PathBuf::from(RUNTIME_DIR),
            Path::new(TESTS_DIR).join(RUNTIME_DIR),
        ],
        PackageType::RuntimeOnly => vec![
            PathBuf::from(EDITOR_DIR),
            Path::new(TESTS_DIR).join(EDITOR_DIR),
        ],
        PackageType::RuntimeAndEditor => Vec::new(),
    }
}

/// Delete the subtrees `package_type` discards.
///
/// Missing subtrees are skipped, so running this twice is harmless. Returns the
/// relative paths that were actually removed.
pub fn eliminate_subtrees(root: &Path, package_type: PackageType) -> Result<Vec<String>> {
    let mut removed = Vec::new();

    for relative in doomed_subtrees(package_type) {
        if io::remove_path_if_exists(&root.join(&relative))? {
            log_status!("eliminate", "Removed {}", relative.display());
            removed.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn scaffold(root: &Path) {
        for dir in ["Runtime", "Editor", "Tests/Runtime", "Tests/Editor"] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("Placeholder.cs"), "// placeholder").unwrap();
        }
    }

    #[test]
    fn editor_only_drops_runtime_and_runtime_tests() {
        let dir = tempdir().unwrap();
        scaffold(dir.path());

        let removed = eliminate_subtrees(dir.path(), PackageType::EditorOnly).unwrap();

        assert_eq!(removed, vec!["Runtime", "Tests/Runtime"]);
        assert!(!dir.path().join("Runtime").exists());
        assert!(!dir.path().join("Tests/Runtime").exists());
        assert!(dir.path().join("Editor").is_dir());
        assert!(dir.path().join("Tests/Editor").is_dir());
    }

    #[test]
    fn runtime_only_drops_editor_and_editor_tests() {
        let dir = tempdir().unwrap();
        scaffold(dir.path());

        let removed = eliminate_subtrees(dir.path(), PackageType::RuntimeOnly).unwrap();

        assert_eq!(removed, vec!["Editor", "Tests/Editor"]);
        assert!(dir.path().join("Runtime").is_dir());
        assert!(dir.path().join("Tests/Runtime").is_dir());
    }

    #[test]
    fn runtime_and_editor_keeps_everything() {
        let dir = tempdir().unwrap();
        scaffold(dir.path());

        let removed = eliminate_subtrees(dir.path(), PackageType::RuntimeAndEditor).unwrap();

        assert!(removed.is_empty());
        for sub in ["Runtime", "Editor", "Tests/Runtime", "Tests/Editor"] {
            assert!(dir.path().join(sub).is_dir(), "{sub} should survive");
        }
    }

    #[test]
    fn repeated_elimination_is_a_no_op() {
        let dir = tempdir().unwrap();
        scaffold(dir.path());

        eliminate_subtrees(dir.path(), PackageType::EditorOnly).unwrap();
        let second = eliminate_subtrees(dir.path(), PackageType::EditorOnly).unwrap();

        assert!(second.is_empty());
    }
}
