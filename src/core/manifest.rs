//! Package manifest (`package.json`) rewriting.
//!
//! Only the identity, version and link fields are owned by setup; every other
//! key passes through untouched and keeps its position.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::Configuration;
use crate::error::{Error, Result};
use crate::json;
use crate::template::MANIFEST_FILE;

/// Manifest keys overwritten by setup, in write order.
pub const OWNED_FIELDS: [&str; 8] = [
    "name",
    "version",
    "displayName",
    "description",
    "unity",
    "documentationUrl",
    "changelogUrl",
    "licensesUrl",
];

#[derive(Debug, Clone, Serialize)]
pub struct ManifestUpdate {
    pub path: String,
    pub name: String,
    pub version: String,
    pub display_name: String,
}

pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}

/// The one guard in front of the pipeline: the manifest must exist.
pub fn require_manifest(root: &Path) -> Result<PathBuf> {
    let path = manifest_path(root);
    if path.is_file() {
        Ok(path)
    } else {
        Err(Error::manifest_not_found(path.display().to_string()))
    }
}

/// Overwrite the owned fields of an in-memory manifest.
pub fn apply_to_document(document: &mut Map<String, Value>, cfg: &Configuration) {
    let values = [
        cfg.package_id(),
        cfg.package_version().to_string(),
        cfg.display_title(),
        cfg.description().to_string(),
        cfg.min_engine_version().to_string(),
        cfg.repo_url(),
        cfg.changelog_url(),
        cfg.license_url(),
    ];

    for (key, value) in OWNED_FIELDS.iter().zip(values) {
        document.insert((*key).to_string(), Value::String(value));
    }
}

/// Rewrite `<root>/package.json` for `cfg`.
///
/// The file is replaced only once the complete document has been built.
pub fn rewrite(root: &Path, cfg: &Configuration) -> Result<ManifestUpdate> {
    let path = require_manifest(root)?;

    let mut document = json::read_object(&path).map_err(|e| {
        let problem = e.details["error"]
            .as_str()
            .map(str::to_string)
            .unwrap_or(e.message);
        Error::manifest_invalid(path.display().to_string(), problem)
    })?;

    apply_to_document(&mut document, cfg);
    json::write_object(&path, &document)?;

    Ok(ManifestUpdate {
        path: path.display().to_string(),
        name: cfg.package_id(),
        version: cfg.package_version().to_string(),
        display_name: cfg.display_title(),
    })
}
