use clap::Args;
use std::path::{Path, PathBuf};

use htda_setup::config::ConfigInput;
use htda_setup::log_status;
use htda_setup::template::ANSWERS_FILE;
use htda_setup::validation;

pub type CmdResult<T> = htda_setup::Result<(T, i32)>;

pub(crate) struct GlobalArgs {
    /// Package root every command operates on.
    pub root: PathBuf,
}

/// Answers shared by every command that builds a configuration.
///
/// Flags override values read from the answers file.
#[derive(Args, Default, Debug)]
pub struct ConfigArgs {
    /// Package suffix (e.g. core, editor.tools)
    #[arg(long)]
    pub suffix: Option<String>,

    /// PascalCase module name used in namespaces and assemblies
    #[arg(long)]
    pub module_name: Option<String>,

    /// Display name shown in the package manager
    #[arg(long)]
    pub display_name: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Minimum Unity version
    #[arg(long, value_name = "VERSION")]
    pub unity: Option<String>,

    /// Package version
    #[arg(long = "version", value_name = "VERSION")]
    pub package_version: Option<String>,

    /// runtime-only, editor-only or runtime+editor
    #[arg(long)]
    pub package_type: Option<String>,

    /// GitHub org/user owning the repository
    #[arg(long)]
    pub repo_owner: Option<String>,

    #[arg(long)]
    pub repo_prefix: Option<String>,

    /// Answers file (defaults to htda-setup.json in the package root)
    #[arg(long, value_name = "FILE")]
    pub config: Option<String>,
}

impl ConfigArgs {
    fn flags(&self) -> ConfigInput {
        ConfigInput {
            suffix: self.suffix.clone(),
            module_name: self.module_name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            min_engine_version: self.unity.clone(),
            package_version: self.package_version.clone(),
            package_type: self.package_type.clone(),
            repo_owner: self.repo_owner.clone(),
            repo_prefix: self.repo_prefix.clone(),
        }
    }

    /// Answers file to read, if any: the explicit `--config` path, or the
    /// default answers file when it exists.
    pub fn answers_path(&self, root: &Path) -> htda_setup::Result<Option<PathBuf>> {
        match &self.config {
            Some(raw) => {
                let raw = validation::require_non_empty(
                    raw,
                    "config",
                    "Answers file path cannot be empty",
                )?;
                Ok(Some(expand_path(raw)))
            }
            None => {
                let default = root.join(ANSWERS_FILE);
                Ok(default.is_file().then_some(default))
            }
        }
    }

    /// Merge the answers file (if any) with command-line flags.
    pub fn resolve(&self, root: &Path) -> htda_setup::Result<(ConfigInput, Option<PathBuf>)> {
        let answers_path = self.answers_path(root)?;
        let base = match &answers_path {
            Some(path) => {
                log_status!("config", "Reading answers from {}", path.display());
                ConfigInput::load(path)?
            }
            None => ConfigInput::default(),
        };

        Ok((base.overlay(self.flags()), answers_path))
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).to_string())
}

pub mod setup;
pub mod summary;

/// Dispatch a command to its handler and map result to JSON.
macro_rules! dispatch {
    ($args:expr, $global:expr, $module:ident) => {
        crate::output::map_cmd_result_to_json($module::run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (htda_setup::Result<serde_json::Value>, i32) {
    match command {
        crate::Commands::Setup(args) => dispatch!(args, global, setup),
        crate::Commands::Summary(args) => dispatch!(args, global, summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn flags_override_answers_file() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(ANSWERS_FILE),
            r#"{"suffix": "editor.tools", "packageType": "editor-only", "repoOwner": "acme"}"#,
        )
        .unwrap();

        let args = ConfigArgs {
            package_type: Some("runtime+editor".to_string()),
            ..ConfigArgs::default()
        };
        let (input, path) = args.resolve(dir.path()).unwrap();

        assert_eq!(path, Some(dir.path().join(ANSWERS_FILE)));
        assert_eq!(input.suffix.as_deref(), Some("editor.tools"));
        assert_eq!(input.package_type.as_deref(), Some("runtime+editor"));
        assert_eq!(input.repo_owner.as_deref(), Some("acme"));
    }

    #[test]
    fn no_answers_file_means_flags_only() {
        let dir = tempdir().unwrap();
        let args = ConfigArgs {
            unity: Some("2023.1".to_string()),
            ..ConfigArgs::default()
        };
        let (input, path) = args.resolve(dir.path()).unwrap();

        assert!(path.is_none());
        assert_eq!(input.min_engine_version.as_deref(), Some("2023.1"));
        assert!(input.suffix.is_none());
    }

    #[test]
    fn malformed_answers_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("answers.json");
        fs::write(&file, "{ not json").unwrap();

        let args = ConfigArgs {
            config: Some(file.to_string_lossy().to_string()),
            ..ConfigArgs::default()
        };
        let err = args.resolve(dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "config.invalid_json");
    }

    #[test]
    fn empty_config_path_is_rejected() {
        let dir = tempdir().unwrap();
        let args = ConfigArgs {
            config: Some("  ".to_string()),
            ..ConfigArgs::default()
        };
        let err = args.resolve(dir.path()).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn expand_path_keeps_plain_paths() {
        assert_eq!(expand_path("/tmp/answers.json"), PathBuf::from("/tmp/answers.json"));
    }
}
