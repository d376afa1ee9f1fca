//! Fixed description of the template package before setup.
//!
//! Everything here is read-only lookup data: the literal tokens the template
//! ships with and the paths the setup steps act on.

/// Literal naming tokens carried by the unconfigured template.
#[derive(Debug)]
pub struct TemplateTokens {
    pub package_id: &'static str,
    pub display: &'static str,
    pub namespace_root: &'static str,
    pub runtime_assembly: &'static str,
    pub editor_assembly: &'static str,
    pub repo_default: &'static str,
    pub org_placeholder: &'static str,
}

pub static TEMPLATE: TemplateTokens = TemplateTokens {
    package_id: "com.htda.framework.template",
    display: "HTDA Framework – Template",
    namespace_root: "HTDA.Framework.Template",
    runtime_assembly: "HTDA.Framework.Template",
    editor_assembly: "HTDA.Framework.Template.Editor",
    repo_default: "HTDA-Framework-Template",
    org_placeholder: "<YOUR_ORG>",
};

/// Prefix of every framework package id (`com.htda.framework.<suffix>`).
pub const PACKAGE_ID_PREFIX: &str = "com.htda.framework";

/// Prefix of every framework namespace (`HTDA.Framework.<ModuleName>`).
pub const NAMESPACE_PREFIX: &str = "HTDA.Framework";

/// Prefix of every display title shown in the package manager.
pub const DISPLAY_PREFIX: &str = "HTDA Framework – ";

pub const REPO_HOST: &str = "github.com";

pub const MANIFEST_FILE: &str = "package.json";

pub const RUNTIME_DIR: &str = "Runtime";
pub const EDITOR_DIR: &str = "Editor";
pub const TESTS_DIR: &str = "Tests";

/// Module descriptor extension (without the dot).
pub const DESCRIPTOR_EXTENSION: &str = "asmdef";

/// Extensions eligible for token replacement, compared case-insensitively.
pub const TEXT_EXTENSIONS: &[&str] = &["cs", "asmdef", "md", "json"];

/// File names belonging to the setup tooling itself; never rewritten.
pub const ENTRY_POINT_FILES: &[&str] = &["setup_wizard.py", "htda-setup.json"];

/// Default answers file looked up at the package root.
pub const ANSWERS_FILE: &str = "htda-setup.json";

/// Templated folder segments under `Runtime/` and `Editor/`.
pub const MODULE_PATH: &[&str] = &["HTDA", "Framework", "Template"];

/// Older template layout that kept editor code directly under `HTDA/`.
pub const LEGACY_EDITOR_MODULE_PATH: &[&str] = &["HTDA", "Template"];

/// Parent of the renamed module folder (`HTDA/Framework/<ModuleName>`).
pub const MODULE_PARENT_PATH: &[&str] = &["HTDA", "Framework"];
