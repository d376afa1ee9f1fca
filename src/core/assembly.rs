//! Module descriptor (`.asmdef`) renaming and reference repair.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::config::{Configuration, PackageType};
use crate::error::Result;
use crate::json;
use crate::template::{DESCRIPTOR_EXTENSION, EDITOR_DIR, RUNTIME_DIR, TEMPLATE};
use crate::utils::io;

/// A file or directory rename, relative to the package root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRename {
    pub from: String,
    pub to: String,
}

fn descriptor_path(root: &Path, subtree: &str, assembly: &str) -> PathBuf {
    root.join(subtree)
        .join(format!("{}.{}", assembly, DESCRIPTOR_EXTENSION))
}

fn relative(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Path of the editor descriptor once setup has named it.
pub fn editor_descriptor(root: &Path, cfg: &Configuration) -> PathBuf {
    descriptor_path(root, EDITOR_DIR, &cfg.editor_assembly())
}

/// Path of the runtime descriptor once setup has named it.
pub fn runtime_descriptor(root: &Path, cfg: &Configuration) -> PathBuf {
    descriptor_path(root, RUNTIME_DIR, &cfg.runtime_assembly())
}

/// Rename the template's runtime and editor descriptors to the configured
/// assembly names. Each rename is skipped when its source is absent.
pub fn rename_descriptors(root: &Path, cfg: &Configuration) -> Result<Vec<PathRename>> {
    let pairs = [
        (
            descriptor_path(root, RUNTIME_DIR, TEMPLATE.runtime_assembly),
            runtime_descriptor(root, cfg),
        ),
        (
            descriptor_path(root, EDITOR_DIR, TEMPLATE.editor_assembly),
            editor_descriptor(root, cfg),
        ),
    ];

    let mut renames = Vec::new();
    for (from, to) in pairs {
        if io::rename_path_if_exists(&from, &to)? {
            let rename = PathRename {
                from: relative(root, &from),
                to: relative(root, &to),
            };
            log_status!("assembly", "Renamed {} → {}", rename.from, rename.to);
            renames.push(rename);
        }
    }

    Ok(renames)
}

/// Editor-only packages have no runtime assembly left to depend on, so the
/// editor descriptor's `references` list is emptied. Other package types are
/// left alone.
///
/// Returns the repaired descriptor's relative path, if one was rewritten.
pub fn repair_references(root: &Path, cfg: &Configuration) -> Result<Option<String>> {
    if cfg.package_type() != PackageType::EditorOnly {
        return Ok(None);
    }

    let path = editor_descriptor(root, cfg);
    if !path.is_file() {
        return Ok(None);
    }

    let mut descriptor = json::read_object(&path)?;
    descriptor.insert("references".to_string(), Value::Array(Vec::new()));
    json::write_object(&path, &descriptor)?;

    let rel = relative(root, &path);
    log_status!("assembly", "Cleared references in {}", rel);
    Ok(Some(rel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigInput;
    use std::fs;
    use tempfile::tempdir;

    fn config(package_type: &str) -> Configuration {
        Configuration::from_input(&ConfigInput {
            suffix: Some("core".to_string()),
            package_type: Some(package_type.to_string()),
            ..ConfigInput::default()
        })
        .unwrap()
    }

    fn write_descriptors(root: &Path) {
        fs::create_dir_all(root.join("Runtime")).unwrap();
        fs::create_dir_all(root.join("Editor")).unwrap();
        fs::write(
            root.join("Runtime/HTDA.Framework.Template.asmdef"),
            r#"{"name": "HTDA.Framework.Template", "references": []}"#,
        )
        .unwrap();
        fs::write(
            root.join("Editor/HTDA.Framework.Template.Editor.asmdef"),
            r#"{"name": "HTDA.Framework.Template.Editor", "references": ["HTDA.Framework.Template"], "includePlatforms": ["Editor"]}"#,
        )
        .unwrap();
    }

    #[test]
    fn renames_both_descriptors() {
        let dir = tempdir().unwrap();
        write_descriptors(dir.path());

        let renames = rename_descriptors(dir.path(), &config("runtime+editor")).unwrap();

        assert_eq!(
            renames,
            vec![
                PathRename {
                    from: "Runtime/HTDA.Framework.Template.asmdef".to_string(),
                    to: "Runtime/HTDA.Framework.Core.asmdef".to_string(),
                },
                PathRename {
                    from: "Editor/HTDA.Framework.Template.Editor.asmdef".to_string(),
                    to: "Editor/HTDA.Framework.Core.Editor.asmdef".to_string(),
                },
            ]
        );
        assert!(dir.path().join("Runtime/HTDA.Framework.Core.asmdef").is_file());
        assert!(dir.path().join("Editor/HTDA.Framework.Core.Editor.asmdef").is_file());
    }

    #[test]
    fn missing_descriptors_are_skipped() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Editor")).unwrap();

        let renames = rename_descriptors(dir.path(), &config("runtime+editor")).unwrap();
        assert!(renames.is_empty());
    }

    #[test]
    fn editor_only_clears_references() {
        let dir = tempdir().unwrap();
        write_descriptors(dir.path());
        fs::remove_dir_all(dir.path().join("Runtime")).unwrap();
        let cfg = config("editor-only");

        rename_descriptors(dir.path(), &cfg).unwrap();
        let repaired = repair_references(dir.path(), &cfg).unwrap();

        assert_eq!(
            repaired.as_deref(),
            Some("Editor/HTDA.Framework.Core.Editor.asmdef")
        );
        let doc = json::read_object(&editor_descriptor(dir.path(), &cfg)).unwrap();
        assert_eq!(doc["references"], serde_json::json!([]));
        assert_eq!(doc["includePlatforms"], serde_json::json!(["Editor"]));
    }

    #[test]
    fn editor_only_adds_empty_references_when_absent() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Editor")).unwrap();
        let cfg = config("editor-only");
        fs::write(editor_descriptor(dir.path(), &cfg), r#"{"name": "x"}"#).unwrap();

        repair_references(dir.path(), &cfg).unwrap();

        let doc = json::read_object(&editor_descriptor(dir.path(), &cfg)).unwrap();
        assert_eq!(doc["references"], serde_json::json!([]));
    }

    #[test]
    fn other_package_types_keep_references() {
        let dir = tempdir().unwrap();
        write_descriptors(dir.path());
        let cfg = config("runtime+editor");

        rename_descriptors(dir.path(), &cfg).unwrap();
        let repaired = repair_references(dir.path(), &cfg).unwrap();

        assert!(repaired.is_none());
        let doc = json::read_object(&editor_descriptor(dir.path(), &cfg)).unwrap();
        assert_eq!(doc["references"], serde_json::json!(["HTDA.Framework.Template"]));
    }
}
