//! Best-effort renaming of template-named module folders.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assembly::PathRename;
use crate::error::Result;
use crate::template::{
    EDITOR_DIR, LEGACY_EDITOR_MODULE_PATH, MODULE_PARENT_PATH, MODULE_PATH, RUNTIME_DIR,
};
use crate::utils::io;

#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderRenameResult {
    pub renames: Vec<PathRename>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

fn join_segments(base: &str, segments: &[&str]) -> PathBuf {
    segments
        .iter()
        .fold(PathBuf::from(base), |path, segment| path.join(segment))
}

/// Folder moves for `module_name`, relative to the package root, in the order
/// they are attempted. The legacy editor layout comes last.
pub fn planned_moves(module_name: &str) -> Vec<(PathBuf, PathBuf)> {
    let target = |base: &str| join_segments(base, MODULE_PARENT_PATH).join(module_name);

    vec![
        (join_segments(RUNTIME_DIR, MODULE_PATH), target(RUNTIME_DIR)),
        (join_segments(EDITOR_DIR, MODULE_PATH), target(EDITOR_DIR)),
        (
            join_segments(EDITOR_DIR, LEGACY_EDITOR_MODULE_PATH),
            target(EDITOR_DIR),
        ),
    ]
}

/// Move template-named folders to the module name.
///
/// Each move is independent: a missing source is skipped silently, and a
/// destination that already exists is skipped with a warning rather than
/// merged.
pub fn rename_module_folders(root: &Path, module_name: &str) -> Result<FolderRenameResult> {
    let mut result = FolderRenameResult::default();

    for (from_rel, to_rel) in planned_moves(module_name) {
        let from = root.join(&from_rel);
        let to = root.join(&to_rel);

        if !from.exists() || from == to {
            continue;
        }

        let rename = PathRename {
            from: from_rel.to_string_lossy().replace('\\', "/"),
            to: to_rel.to_string_lossy().replace('\\', "/"),
        };

        if to.exists() {
            result.warnings.push(format!(
                "Skipped folder rename {} → {}: destination already exists",
                rename.from, rename.to
            ));
            continue;
        }

        if io::rename_path_if_exists(&from, &to)? {
            log_status!("folders", "Renamed {} → {}", rename.from, rename.to);
            result.renames.push(rename);
        }
    }

    Ok(result)
}
