//! Setup configuration: the validated answers that drive a run.
//!
//! `ConfigInput` is the loose, optional form (answers file, CLI flags).
//! `Configuration` is the validated form. Derived identifiers (package id,
//! namespace, assemblies, repo name) are computed from it on demand and never
//! stored.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::template::{DISPLAY_PREFIX, NAMESPACE_PREFIX, PACKAGE_ID_PREFIX, REPO_HOST};
use crate::utils::{io, validation};

static SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(\.[a-z0-9]+)*$").expect("valid suffix regex"));

static MODULE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("valid module name regex"));

// ============================================================================
// Package type
// ============================================================================

/// Which halves of the template survive setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageType {
    #[serde(rename = "runtime-only")]
    RuntimeOnly,
    #[serde(rename = "editor-only")]
    EditorOnly,
    #[serde(rename = "runtime+editor")]
    RuntimeAndEditor,
}

impl PackageType {
    pub const LITERALS: [&'static str; 3] = ["runtime-only", "editor-only", "runtime+editor"];

    pub fn as_str(&self) -> &'static str {
        match self {
            PackageType::RuntimeOnly => "runtime-only",
            PackageType::EditorOnly => "editor-only",
            PackageType::RuntimeAndEditor => "runtime+editor",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match validation::require_one_of(value.trim(), &Self::LITERALS, "package_type")? {
            "runtime-only" => Ok(PackageType::RuntimeOnly),
            "editor-only" => Ok(PackageType::EditorOnly),
            _ => Ok(PackageType::RuntimeAndEditor),
        }
    }

    pub fn has_runtime(&self) -> bool {
        !matches!(self, PackageType::EditorOnly)
    }

    pub fn has_editor(&self) -> bool {
        !matches!(self, PackageType::RuntimeOnly)
    }
}

impl std::fmt::Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Fields
// ============================================================================

/// The editable configuration fields, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Suffix,
    ModuleName,
    DisplayName,
    Description,
    MinEngineVersion,
    PackageVersion,
    PackageType,
    RepoOwner,
    RepoPrefix,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Suffix,
        Field::ModuleName,
        Field::DisplayName,
        Field::Description,
        Field::MinEngineVersion,
        Field::PackageVersion,
        Field::PackageType,
        Field::RepoOwner,
        Field::RepoPrefix,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Suffix => "suffix",
            Field::ModuleName => "module_name",
            Field::DisplayName => "display_name",
            Field::Description => "description",
            Field::MinEngineVersion => "unity",
            Field::PackageVersion => "version",
            Field::PackageType => "package_type",
            Field::RepoOwner => "repo_owner",
            Field::RepoPrefix => "repo_prefix",
        }
    }

    /// 1-based position in the edit menu.
    pub fn menu_index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|field| field == self)
            .map(|idx| idx + 1)
            .unwrap_or(0)
    }

    pub fn from_menu_choice(choice: &str) -> Option<Field> {
        let idx: usize = choice.trim().parse().ok()?;
        idx.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Normalize raw input the way the field stores it.
    fn normalize(&self, value: &str) -> String {
        match self {
            Field::Suffix => value.trim().to_lowercase(),
            _ => value.trim().to_string(),
        }
    }

    /// Normalize and validate a raw answer for this field.
    pub fn check(&self, value: &str) -> Result<String> {
        let value = self.normalize(value);
        match self {
            Field::Suffix => validate_suffix(&value)?,
            Field::ModuleName => validate_module_name(&value)?,
            Field::PackageType => {
                PackageType::parse(&value)?;
            }
            _ => {}
        }
        Ok(value)
    }
}

// ============================================================================
// Input
// ============================================================================

/// Loose answers from an answers file and/or command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "unity", skip_serializing_if = "Option::is_none")]
    pub min_engine_version: Option<String>,
    #[serde(default, alias = "version", skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_prefix: Option<String>,
}

impl ConfigInput {
    /// Load an answers file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = io::read_file(path, "read answers file")?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))
    }

    /// Layer `other` on top of `self`; values present in `other` win.
    pub fn overlay(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            suffix: other.suffix.or(self.suffix),
            module_name: other.module_name.or(self.module_name),
            display_name: other.display_name.or(self.display_name),
            description: other.description.or(self.description),
            min_engine_version: other.min_engine_version.or(self.min_engine_version),
            package_version: other.package_version.or(self.package_version),
            package_type: other.package_type.or(self.package_type),
            repo_owner: other.repo_owner.or(self.repo_owner),
            repo_prefix: other.repo_prefix.or(self.repo_prefix),
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Suffix => &self.suffix,
            Field::ModuleName => &self.module_name,
            Field::DisplayName => &self.display_name,
            Field::Description => &self.description,
            Field::MinEngineVersion => &self.min_engine_version,
            Field::PackageVersion => &self.package_version,
            Field::PackageType => &self.package_type,
            Field::RepoOwner => &self.repo_owner,
            Field::RepoPrefix => &self.repo_prefix,
        };
        value.as_deref()
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Validated setup configuration.
///
/// Fields are private: a `Configuration` only exists in a valid state and is
/// changed by producing a new value through [`Configuration::with_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    suffix: String,
    module_name: String,
    display_name: String,
    description: String,
    min_engine_version: String,
    package_version: String,
    package_type: PackageType,
    repo_owner: String,
    repo_prefix: String,
}

impl Configuration {
    /// Apply defaults to missing answers, then validate.
    ///
    /// Defaults chain: module name from suffix, display name from module name,
    /// description from display name.
    pub fn from_input(input: &ConfigInput) -> Result<Self> {
        let answer = |field: Field| input.get(field).map(|v| field.normalize(v));

        let suffix = answer(Field::Suffix).unwrap_or_else(defaults::default_suffix);
        validate_suffix(&suffix)?;

        let module_name = answer(Field::ModuleName)
            .unwrap_or_else(|| defaults::default_module_name(&suffix));
        validate_module_name(&module_name)?;

        let display_name = answer(Field::DisplayName)
            .unwrap_or_else(|| defaults::default_display_name(&module_name));
        let description = answer(Field::Description)
            .unwrap_or_else(|| defaults::default_description(&display_name));

        let package_type = match answer(Field::PackageType) {
            Some(raw) => PackageType::parse(&raw)?,
            None => defaults::default_package_type(),
        };

        Ok(Self {
            suffix,
            module_name,
            display_name,
            description,
            min_engine_version: answer(Field::MinEngineVersion)
                .unwrap_or_else(defaults::default_min_engine_version),
            package_version: answer(Field::PackageVersion)
                .unwrap_or_else(defaults::default_package_version),
            package_type,
            repo_owner: answer(Field::RepoOwner).unwrap_or_else(defaults::default_repo_owner),
            repo_prefix: answer(Field::RepoPrefix).unwrap_or_else(defaults::default_repo_prefix),
        })
    }

    /// Return a copy with one field replaced, validated.
    ///
    /// Changing the suffix does not re-derive the module name.
    pub fn with_field(&self, field: Field, value: &str) -> Result<Self> {
        let value = field.check(value)?;
        let mut next = self.clone();

        match field {
            Field::Suffix => next.suffix = value,
            Field::ModuleName => next.module_name = value,
            Field::DisplayName => next.display_name = value,
            Field::Description => next.description = value,
            Field::MinEngineVersion => next.min_engine_version = value,
            Field::PackageVersion => next.package_version = value,
            Field::PackageType => next.package_type = PackageType::parse(&value)?,
            Field::RepoOwner => next.repo_owner = value,
            Field::RepoPrefix => next.repo_prefix = value,
        }

        Ok(next)
    }

    /// Current raw value of a field, as shown in prompts.
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Suffix => self.suffix.clone(),
            Field::ModuleName => self.module_name.clone(),
            Field::DisplayName => self.display_name.clone(),
            Field::Description => self.description.clone(),
            Field::MinEngineVersion => self.min_engine_version.clone(),
            Field::PackageVersion => self.package_version.clone(),
            Field::PackageType => self.package_type.as_str().to_string(),
            Field::RepoOwner => self.repo_owner.clone(),
            Field::RepoPrefix => self.repo_prefix.clone(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn min_engine_version(&self) -> &str {
        &self.min_engine_version
    }

    pub fn package_version(&self) -> &str {
        &self.package_version
    }

    pub fn package_type(&self) -> PackageType {
        self.package_type
    }

    pub fn repo_owner(&self) -> &str {
        &self.repo_owner
    }

    pub fn repo_prefix(&self) -> &str {
        &self.repo_prefix
    }

    // ------------------------------------------------------------------------
    // Derived identifiers
    // ------------------------------------------------------------------------

    pub fn package_id(&self) -> String {
        format!("{}.{}", PACKAGE_ID_PREFIX, self.suffix)
    }

    pub fn display_title(&self) -> String {
        format!("{}{}", DISPLAY_PREFIX, self.display_name)
    }

    pub fn namespace_root(&self) -> String {
        format!("{}.{}", NAMESPACE_PREFIX, self.module_name)
    }

    pub fn runtime_assembly(&self) -> String {
        self.namespace_root()
    }

    pub fn editor_assembly(&self) -> String {
        format!("{}.Editor", self.namespace_root())
    }

    /// Assemblies that exist after setup for this package type.
    pub fn assemblies(&self) -> Vec<String> {
        let mut assemblies = Vec::new();
        if self.package_type.has_runtime() {
            assemblies.push(self.runtime_assembly());
        }
        if self.package_type.has_editor() {
            assemblies.push(self.editor_assembly());
        }
        assemblies
    }

    pub fn repo_name(&self) -> String {
        format!("{}{}", self.repo_prefix, self.module_name)
    }

    pub fn repo_url(&self) -> String {
        format!("https://{}/{}/{}", REPO_HOST, self.repo_owner, self.repo_name())
    }

    pub fn changelog_url(&self) -> String {
        format!("{}/blob/main/CHANGELOG.md", self.repo_url())
    }

    pub fn license_url(&self) -> String {
        format!("{}/blob/main/LICENSE.md", self.repo_url())
    }

    /// Soft check: package managers expect a semantic version.
    pub fn version_warning(&self) -> Option<String> {
        semver::Version::parse(&self.package_version)
            .err()
            .map(|e| format!("Package version '{}' is not valid semver: {}", self.package_version, e))
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            package_id: self.package_id(),
            display_name: self.display_title(),
            description: self.description.clone(),
            unity: self.min_engine_version.clone(),
            version: self.package_version.clone(),
            package_type: self.package_type,
            namespace_root: self.namespace_root(),
            assemblies: self.assemblies(),
            repo_name: self.repo_name(),
            documentation_url: self.repo_url(),
            changelog_url: self.changelog_url(),
            licenses_url: self.license_url(),
        }
    }
}

fn validate_suffix(suffix: &str) -> Result<()> {
    validation::require_match(
        suffix,
        &SUFFIX_PATTERN,
        "suffix",
        "suffix must match ^[a-z0-9]+(\\.[a-z0-9]+)*$ (example: editor.tools)",
    )
}

fn validate_module_name(module_name: &str) -> Result<()> {
    validation::require_match(
        module_name,
        &MODULE_NAME_PATTERN,
        "module_name",
        "ModuleName must be PascalCase alphanumeric (e.g. EditorTools)",
    )
}

// ============================================================================
// Summary
// ============================================================================

/// Derived identifiers shown before confirmation and returned by `summary`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub package_id: String,
    pub display_name: String,
    pub description: String,
    pub unity: String,
    pub version: String,
    pub package_type: PackageType,
    pub namespace_root: String,
    pub assemblies: Vec<String>,
    pub repo_name: String,
    pub documentation_url: String,
    pub changelog_url: String,
    pub licenses_url: String,
}

impl ConfigSummary {
    pub fn lines(&self) -> Vec<String> {
        let assemblies = match self.package_type {
            PackageType::EditorOnly => format!("{} (Editor-only)", self.assemblies.join(", ")),
            _ => self.assemblies.join(", "),
        };

        vec![
            "==================== SETUP SUMMARY ====================".to_string(),
            format!("Package ID      : {}", self.package_id),
            format!("Display Name    : {}", self.display_name),
            format!("Description     : {}", self.description),
            format!("Unity Min       : {}", self.unity),
            format!("Version         : {}", self.version),
            format!("Package Type    : {}", self.package_type),
            format!("Namespace Root  : {}", self.namespace_root),
            format!("Assemblies      : {}", assemblies),
            format!("Repo (suggested): {}", self.repo_name),
            "=======================================================".to_string(),
        ]
    }
}
