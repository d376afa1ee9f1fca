//! Interactive collection and review of a setup configuration.
//!
//! Review is an explicit state machine; nothing on disk changes until it
//! returns an accepted [`Configuration`].

use crate::config::{ConfigInput, Configuration, Field};
use crate::defaults;
use crate::error::{Error, Result};
use crate::prompt::{Prompter, TextPrompt};

const PROCEED_QUESTION: &str =
    "Proceed with these settings? (Y to continue / E to edit / N to cancel)";

fn collect_question(field: Field) -> &'static str {
    match field {
        Field::Suffix => "Package suffix (e.g. core, editor.tools, patterns.pooling)",
        Field::ModuleName => "ModuleName (PascalCase, used in namespace/assemblies)",
        Field::DisplayName => "Display name",
        Field::Description => "Description",
        Field::PackageType => "Package type (runtime-only / editor-only / runtime+editor)",
        Field::MinEngineVersion => "Minimum Unity version",
        Field::PackageVersion => "Package version",
        Field::RepoOwner => "GitHub org/user (repo owner)",
        Field::RepoPrefix => "Repo prefix",
    }
}

fn edit_question(field: Field) -> String {
    match field {
        Field::PackageType => "package_type (runtime-only/editor-only/runtime+editor)".to_string(),
        _ => field.key().to_string(),
    }
}

fn rejected_edit_message(field: Field) -> &'static str {
    match field {
        Field::Suffix => "Invalid suffix format. Keeping previous value.",
        Field::ModuleName => "Invalid ModuleName. Keeping previous value.",
        Field::PackageType => "Invalid package type. Keeping previous value.",
        _ => "Invalid value. Keeping previous value.",
    }
}

// ============================================================================
// Collect
// ============================================================================

/// Ask for every field in prompt order, offering `seed` values (or the
/// chained defaults) as the default answer.
///
/// An invalid suffix, module name or package type aborts collection.
pub fn collect(prompter: &mut dyn Prompter, seed: &ConfigInput) -> Result<Configuration> {
    let mut ask = |field: Field, fallback: String| -> Result<String> {
        let default = seed.get(field).map(str::to_string).unwrap_or(fallback);
        let raw = prompter.ask(&TextPrompt::new(collect_question(field)).with_default(default))?;
        field.check(&raw)
    };

    let suffix = ask(Field::Suffix, defaults::default_suffix())?;
    let module_name = ask(Field::ModuleName, defaults::default_module_name(&suffix))?;
    let display_name = ask(Field::DisplayName, defaults::default_display_name(&module_name))?;
    let description = ask(Field::Description, defaults::default_description(&display_name))?;
    let package_type = ask(
        Field::PackageType,
        defaults::default_package_type().as_str().to_string(),
    )?;
    let min_engine_version = ask(
        Field::MinEngineVersion,
        defaults::default_min_engine_version(),
    )?;
    let package_version = ask(Field::PackageVersion, defaults::default_package_version())?;
    let repo_owner = ask(Field::RepoOwner, defaults::default_repo_owner())?;
    let repo_prefix = ask(Field::RepoPrefix, defaults::default_repo_prefix())?;

    let answers = ConfigInput {
        suffix: Some(suffix),
        module_name: Some(module_name),
        display_name: Some(display_name),
        description: Some(description),
        min_engine_version: Some(min_engine_version),
        package_version: Some(package_version),
        package_type: Some(package_type),
        repo_owner: Some(repo_owner),
        repo_prefix: Some(repo_prefix),
    };

    Configuration::from_input(&answers)
}

// ============================================================================
// Review
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewState {
    Display,
    AwaitCommand,
    SelectField,
    EditField(Field),
}

enum Command {
    Accept,
    Edit,
    Cancel,
    Unknown,
}

fn parse_command(answer: &str) -> Command {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Command::Accept,
        "e" | "edit" => Command::Edit,
        "n" | "no" => Command::Cancel,
        _ => Command::Unknown,
    }
}

/// Show the summary and loop until the user accepts or cancels.
///
/// Returns the accepted configuration. Cancelling (or running out of input)
/// yields `setup.cancelled`.
pub fn review(prompter: &mut dyn Prompter, cfg: Configuration) -> Result<Configuration> {
    let mut cfg = cfg;
    let mut state = ReviewState::Display;

    loop {
        state = match state {
            ReviewState::Display => {
                prompter.say("")?;
                for line in cfg.summary().lines() {
                    prompter.say(&line)?;
                }
                prompter.say("")?;
                ReviewState::AwaitCommand
            }
            ReviewState::AwaitCommand => {
                let answer =
                    prompter.ask(&TextPrompt::new(PROCEED_QUESTION).with_default("Y"))?;
                match parse_command(&answer) {
                    Command::Accept => return Ok(cfg),
                    Command::Cancel => return Err(Error::setup_cancelled()),
                    Command::Edit => ReviewState::SelectField,
                    Command::Unknown => {
                        prompter.say("Please input Y, E, or N.")?;
                        ReviewState::Display
                    }
                }
            }
            ReviewState::SelectField => {
                prompter.say("Which field do you want to edit?")?;
                for field in Field::ALL {
                    prompter.say(&format!("{}) {}", field.menu_index(), field.key()))?;
                }
                let choice = prompter.ask(&TextPrompt::new("Select 1-9"))?;
                match Field::from_menu_choice(&choice) {
                    Some(field) => ReviewState::EditField(field),
                    None => {
                        prompter.say("Unknown selection. No changes made.")?;
                        ReviewState::Display
                    }
                }
            }
            ReviewState::EditField(field) => {
                let answer = prompter
                    .ask(&TextPrompt::new(edit_question(field)).with_default(cfg.get(field)))?;
                match cfg.with_field(field, &answer) {
                    Ok(next) => cfg = next,
                    Err(_) => prompter.say(rejected_edit_message(field))?,
                }
                ReviewState::Display
            }
        };
    }
}

/// Collect answers, then review them until accepted.
pub fn run_wizard(prompter: &mut dyn Prompter, seed: &ConfigInput) -> Result<Configuration> {
    let cfg = collect(prompter, seed)?;
    review(prompter, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PackageType;
    use crate::prompt::LinePrompter;
    use std::io::Cursor;

    fn scripted(lines: &[&str]) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        let mut input = lines.join("\n");
        input.push('\n');
        LinePrompter::new(Cursor::new(input.into_bytes()), Vec::new())
    }

    fn default_config() -> Configuration {
        Configuration::from_input(&ConfigInput::default()).unwrap()
    }

    #[test]
    fn collect_accepts_all_defaults() {
        let mut p = scripted(&["", "", "", "", "", "", "", "", ""]);
        let cfg = collect(&mut p, &ConfigInput::default()).unwrap();
        assert_eq!(cfg, default_config());
    }

    #[test]
    fn collect_chains_defaults_from_earlier_answers() {
        let mut p = scripted(&["Editor.Tools", "", "", "", "editor-only", "", "", "acme", ""]);
        let cfg = collect(&mut p, &ConfigInput::default()).unwrap();

        assert_eq!(cfg.suffix(), "editor.tools");
        assert_eq!(cfg.module_name(), "EditorTools");
        assert_eq!(cfg.display_name(), "EditorTools");
        assert_eq!(cfg.description(), "HTDA Framework module: EditorTools");
        assert_eq!(cfg.package_type(), PackageType::EditorOnly);
        assert_eq!(cfg.repo_owner(), "acme");
    }

    #[test]
    fn collect_offers_seed_values_as_defaults() {
        let seed = ConfigInput {
            suffix: Some("patterns.pooling".to_string()),
            repo_owner: Some("acme".to_string()),
            ..ConfigInput::default()
        };
        let mut p = scripted(&["", "", "", "", "", "", "", "", ""]);
        let cfg = collect(&mut p, &seed).unwrap();

        assert_eq!(cfg.module_name(), "PatternsPooling");
        assert_eq!(cfg.repo_owner(), "acme");

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("[patterns.pooling]"));
    }

    #[test]
    fn collect_aborts_on_invalid_suffix() {
        let mut p = scripted(&["bad suffix!"]);
        let err = collect(&mut p, &ConfigInput::default()).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn collect_aborts_on_invalid_package_type() {
        let mut p = scripted(&["core", "", "", "", "both"]);
        let err = collect(&mut p, &ConfigInput::default()).unwrap_err();
        assert_eq!(err.code.as_str(), "validation.invalid_argument");
    }

    #[test]
    fn review_accepts_with_default_answer() {
        let mut p = scripted(&[""]);
        let cfg = review(&mut p, default_config()).unwrap();
        assert_eq!(cfg, default_config());

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("SETUP SUMMARY"));
        assert!(shown.contains("Package ID      : com.htda.framework.core"));
    }

    #[test]
    fn review_cancels_on_no() {
        let mut p = scripted(&["n"]);
        let err = review(&mut p, default_config()).unwrap_err();
        assert_eq!(err.code.as_str(), "setup.cancelled");
    }

    #[test]
    fn review_edits_a_field_then_accepts() {
        let mut p = scripted(&["e", "7", "runtime-only", "y"]);
        let cfg = review(&mut p, default_config()).unwrap();
        assert_eq!(cfg.package_type(), PackageType::RuntimeOnly);
    }

    #[test]
    fn suffix_edit_does_not_rederive_module_name() {
        let mut p = scripted(&["e", "1", "patterns.pooling", "yes"]);
        let cfg = review(&mut p, default_config()).unwrap();
        assert_eq!(cfg.suffix(), "patterns.pooling");
        assert_eq!(cfg.module_name(), "Core");
    }

    #[test]
    fn invalid_edit_keeps_previous_value() {
        let mut p = scripted(&["e", "2", "not-pascal", "y"]);
        let cfg = review(&mut p, default_config()).unwrap();
        assert_eq!(cfg.module_name(), "Core");

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("Invalid ModuleName. Keeping previous value."));
    }

    #[test]
    fn unknown_selection_and_command_reprompt() {
        let mut p = scripted(&["e", "12", "maybe", "y"]);
        let cfg = review(&mut p, default_config()).unwrap();
        assert_eq!(cfg, default_config());

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert!(shown.contains("Unknown selection. No changes made."));
        assert!(shown.contains("Please input Y, E, or N."));
        assert!(shown.contains("9) repo_prefix"));
    }

    #[test]
    fn end_of_input_during_review_cancels() {
        let mut p = scripted(&["e"]);
        let err = review(&mut p, default_config()).unwrap_err();
        assert_eq!(err.code.as_str(), "setup.cancelled");
    }

    #[test]
    fn run_wizard_collects_then_reviews() {
        let mut p = scripted(&["core", "", "", "", "runtime-only", "", "", "", "", "y"]);
        let cfg = run_wizard(&mut p, &ConfigInput::default()).unwrap();
        assert_eq!(cfg.package_type(), PackageType::RuntimeOnly);
    }
}
