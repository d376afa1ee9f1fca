//! Token replacement: swap the template's literal names for the configured
//! ones across every text file in the package.
//!
//! 1. Builds the ordered (old → new) replacement list from the configuration
//! 2. Walks the package collecting text files (`.cs`, `.asmdef`, `.md`, `.json`)
//! 3. Generates per-file edits by applying the replacements in order
//! 4. Writes back only the files whose content actually changed

use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::template::{ENTRY_POINT_FILES, TEMPLATE, TEXT_EXTENSIONS};
use crate::utils::io;

// ============================================================================
// Types
// ============================================================================

/// One literal substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Replacement {
    pub from: String,
    pub to: String,
    pub label: String,
}

impl Replacement {
    pub fn new(from: &str, to: impl Into<String>, label: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.into(),
            label: label.to_string(),
        }
    }
}

/// An edit to apply to a file's content.
#[derive(Debug, Clone, Serialize)]
pub struct FileEdit {
    /// File path relative to root.
    pub file: String,
    /// Number of substitutions made in this file.
    pub replacements: usize,
    /// New content after all replacements.
    #[serde(skip)]
    pub new_content: String,
}

/// The full result of a token replacement pass.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResult {
    /// Replacements that were applied, in order.
    pub replacements: Vec<Replacement>,
    /// Files whose content changes.
    pub edits: Vec<FileEdit>,
    /// Text files examined.
    pub files_scanned: usize,
    /// Substitutions across all files.
    pub total_replacements: usize,
    /// Whether edits were written to disk.
    pub applied: bool,
}

impl TokenResult {
    pub fn files_changed(&self) -> usize {
        self.edits.len()
    }
}

// ============================================================================
// Replacement list
// ============================================================================

/// Ordered replacements for `cfg`.
///
/// Order matters: the namespace root is a prefix of the editor assembly name,
/// so the editor name is already rewritten by the time its own pair runs.
pub fn replacements_for(cfg: &Configuration) -> Vec<Replacement> {
    vec![
        Replacement::new(TEMPLATE.package_id, cfg.package_id(), "package id"),
        Replacement::new(TEMPLATE.display, cfg.display_title(), "display name"),
        Replacement::new(TEMPLATE.namespace_root, cfg.namespace_root(), "namespace root"),
        Replacement::new(TEMPLATE.runtime_assembly, cfg.runtime_assembly(), "runtime assembly"),
        Replacement::new(TEMPLATE.editor_assembly, cfg.editor_assembly(), "editor assembly"),
        Replacement::new(TEMPLATE.repo_default, cfg.repo_name(), "repo name"),
        Replacement::new(TEMPLATE.org_placeholder, cfg.repo_owner(), "repo owner"),
    ]
}

/// Apply `replacements` one after another (not simultaneously).
///
/// Returns the new content and the number of substitutions made.
pub fn apply_replacements(content: &str, replacements: &[Replacement]) -> (String, usize) {
    let mut current = content.to_string();
    let mut count = 0;

    for replacement in replacements {
        if replacement.from.is_empty() {
            continue;
        }
        let hits = current.matches(replacement.from.as_str()).count();
        if hits > 0 {
            current = current.replace(replacement.from.as_str(), &replacement.to);
            count += hits;
        }
    }

    (current, count)
}

// ============================================================================
// File walking
// ============================================================================

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            TEXT_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// Files the setup tooling owns and must never rewrite.
struct Exclusions {
    explicit: Vec<PathBuf>,
}

impl Exclusions {
    fn new(explicit: &[PathBuf]) -> Self {
        Self {
            explicit: explicit
                .iter()
                .map(|p| p.canonicalize().unwrap_or_else(|_| p.clone()))
                .collect(),
        }
    }

    fn contains(&self, path: &Path) -> bool {
        let name = path.file_name().and_then(OsStr::to_str).unwrap_or("");
        if ENTRY_POINT_FILES.contains(&name) {
            return true;
        }

        if !self.explicit.iter().any(|p| p.file_name() == path.file_name()) {
            return false;
        }

        let resolved = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.explicit.iter().any(|p| *p == resolved)
    }
}

/// Collect every text file under `root`, minus the excluded ones.
pub fn walk_text_files(root: &Path, excluded: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let exclusions = Exclusions::new(excluded);
    let mut files = Vec::new();
    walk_recursive(root, &exclusions, &mut files)?;
    Ok(files)
}

fn walk_recursive(dir: &Path, exclusions: &Exclusions, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", dir.display())))
    })?;

    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        let is_real_dir = std::fs::symlink_metadata(&path)
            .map(|meta| meta.is_dir())
            .unwrap_or(false);

        if is_real_dir {
            walk_recursive(&path, exclusions, files)?;
        } else if path.is_file() && is_text_file(&path) && !exclusions.contains(&path) {
            files.push(path);
        }
    }

    Ok(())
}

// ============================================================================
// Edit generation
// ============================================================================

/// Compute the edits `replacements` would make under `root`, without writing.
pub fn generate_edits(
    root: &Path,
    replacements: &[Replacement],
    excluded: &[PathBuf],
) -> Result<TokenResult> {
    let files = walk_text_files(root, excluded)?;
    let mut edits = Vec::new();
    let mut total_replacements = 0;

    for file_path in &files {
        let content = io::read_file(file_path, "read")?;
        let (new_content, count) = apply_replacements(&content, replacements);

        if new_content != content {
            let relative = file_path
                .strip_prefix(root)
                .unwrap_or(file_path)
                .to_string_lossy()
                .replace('\\', "/");

            total_replacements += count;
            edits.push(FileEdit {
                file: relative,
                replacements: count,
                new_content,
            });
        }
    }

    Ok(TokenResult {
        replacements: replacements.to_vec(),
        edits,
        files_scanned: files.len(),
        total_replacements,
        applied: false,
    })
}

// ============================================================================
// Apply
// ============================================================================

/// Write generated edits to disk.
pub fn apply_edits(result: &mut TokenResult, root: &Path) -> Result<()> {
    for edit in &result.edits {
        io::write_file(&root.join(&edit.file), &edit.new_content, "write")?;
    }

    result.applied = true;
    Ok(())
}

/// Generate and apply in one pass.
pub fn replace_tokens(
    root: &Path,
    replacements: &[Replacement],
    excluded: &[PathBuf],
) -> Result<TokenResult> {
    let mut result = generate_edits(root, replacements, excluded)?;
    apply_edits(&mut result, root)?;
    log_status!(
        "tokens",
        "Updated {} of {} text file(s)",
        result.files_changed(),
        result.files_scanned
    );
    Ok(result)
}

// ============================================================================
// Tests
// ============================================================================
