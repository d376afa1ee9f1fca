//! Values offered when a setup answer is not supplied.

use heck::ToUpperCamelCase;

use crate::config::PackageType;

pub fn default_suffix() -> String {
    "core".to_string()
}

/// PascalCase of the suffix segments: `editor.tools` → `EditorTools`.
pub fn default_module_name(suffix: &str) -> String {
    suffix
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_upper_camel_case())
        .collect()
}

pub fn default_display_name(module_name: &str) -> String {
    module_name.to_string()
}

pub fn default_description(display_name: &str) -> String {
    format!("HTDA Framework module: {}", display_name)
}

pub fn default_package_type() -> PackageType {
    PackageType::RuntimeAndEditor
}

pub fn default_min_engine_version() -> String {
    "2022.3".to_string()
}

pub fn default_package_version() -> String {
    "0.1.0".to_string()
}

pub fn default_repo_owner() -> String {
    crate::template::TEMPLATE.org_placeholder.to_string()
}

pub fn default_repo_prefix() -> String {
    "HTDA-Framework-".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_name_joins_segments_in_pascal_case() {
        assert_eq!(default_module_name("core"), "Core");
        assert_eq!(default_module_name("editor.tools"), "EditorTools");
        assert_eq!(default_module_name("patterns.pooling"), "PatternsPooling");
    }

    #[test]
    fn description_mentions_display_name() {
        assert_eq!(
            default_description("Editor Tools"),
            "HTDA Framework module: Editor Tools"
        );
    }
}
