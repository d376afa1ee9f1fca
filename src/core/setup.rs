//! The setup run: manifest → eliminate → rename descriptors → repair
//! references → replace tokens → rename folders, strictly in that order
//! against one package tree.
//!
//! The run is not transactional. Once the manifest has been rewritten every
//! later step executes, and a failure part-way leaves the tree partially
//! transformed. Each finished step is logged and recorded so such a failure
//! can be diagnosed; the returned error names the steps that completed.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::assembly::{self, PathRename};
use crate::config::{ConfigSummary, Configuration};
use crate::eliminate;
use crate::error::Result;
use crate::folders;
use crate::manifest::{self, ManifestUpdate};
use crate::tokens::{self, FileEdit};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    Manifest,
    Eliminate,
    RenameDescriptors,
    RepairReferences,
    ReplaceTokens,
    RenameFolders,
}

impl SetupStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupStep::Manifest => "manifest",
            SetupStep::Eliminate => "eliminate",
            SetupStep::RenameDescriptors => "rename_descriptors",
            SetupStep::RepairReferences => "repair_references",
            SetupStep::ReplaceTokens => "replace_tokens",
            SetupStep::RenameFolders => "rename_folders",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub step: SetupStep,
    pub detail: String,
}

#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Extra files never touched by token replacement (e.g. the answers file).
    pub excluded: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    pub summary: ConfigSummary,
    pub manifest: ManifestUpdate,
    pub removed: Vec<String>,
    pub descriptor_renames: Vec<PathRename>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub references_cleared: Option<String>,
    pub edits: Vec<FileEdit>,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub folder_renames: Vec<PathRename>,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Completed-step bookkeeping shared by every stage of a run.
#[derive(Default)]
struct StepLog {
    completed: Vec<StepRecord>,
}

impl StepLog {
    fn run<T>(
        &mut self,
        step: SetupStep,
        action: impl FnOnce() -> Result<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Result<T> {
        match action() {
            Ok(value) => {
                let detail = describe(&value);
                log_status!("setup", "{}: {}", step.as_str(), detail);
                self.completed.push(StepRecord { step, detail });
                Ok(value)
            }
            Err(err) => Err(err.with_hint(self.failure_hint(step))),
        }
    }

    fn failure_hint(&self, failed: SetupStep) -> String {
        if self.completed.is_empty() {
            return format!("Setup stopped at '{}' before changing anything", failed.as_str());
        }

        let done: Vec<&str> = self.completed.iter().map(|r| r.step.as_str()).collect();
        format!(
            "Setup stopped at '{}' after completing: {}. The package may be partially transformed.",
            failed.as_str(),
            done.join(", ")
        )
    }
}

/// Apply `cfg` to the template package at `root`.
///
/// Fails before touching disk when the manifest is missing or unreadable.
pub fn apply_setup(root: &Path, cfg: &Configuration, options: &SetupOptions) -> Result<SetupReport> {
    manifest::require_manifest(root)?;

    let mut log = StepLog::default();
    let mut warnings: Vec<String> = cfg.version_warning().into_iter().collect();

    let manifest = log.run(
        SetupStep::Manifest,
        || manifest::rewrite(root, cfg),
        |update| format!("{} {}", update.name, update.version),
    )?;

    let removed = log.run(
        SetupStep::Eliminate,
        || eliminate::eliminate_subtrees(root, cfg.package_type()),
        |removed| match removed.len() {
            0 => "nothing removed".to_string(),
            _ => format!("removed {}", removed.join(", ")),
        },
    )?;

    let descriptor_renames = log.run(
        SetupStep::RenameDescriptors,
        || assembly::rename_descriptors(root, cfg),
        |renames| format!("{} descriptor(s) renamed", renames.len()),
    )?;

    let references_cleared = log.run(
        SetupStep::RepairReferences,
        || assembly::repair_references(root, cfg),
        |cleared| match cleared {
            Some(path) => format!("cleared references in {}", path),
            None => "no repair needed".to_string(),
        },
    )?;

    let replacements = tokens::replacements_for(cfg);
    let token_result = log.run(
        SetupStep::ReplaceTokens,
        || tokens::replace_tokens(root, &replacements, &options.excluded),
        |result| format!("{} file(s) updated", result.files_changed()),
    )?;

    let folder_result = log.run(
        SetupStep::RenameFolders,
        || folders::rename_module_folders(root, cfg.module_name()),
        |result| format!("{} folder(s) renamed", result.renames.len()),
    )?;
    warnings.extend(folder_result.warnings);

    Ok(SetupReport {
        summary: cfg.summary(),
        manifest,
        removed,
        descriptor_renames,
        references_cleared,
        files_scanned: token_result.files_scanned,
        files_changed: token_result.files_changed(),
        edits: token_result.edits,
        folder_renames: folder_result.renames,
        steps: log.completed,
        warnings,
    })
}
