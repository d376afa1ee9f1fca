use clap::Args;
use serde::Serialize;
use std::io;

use htda_setup::config::Configuration;
use htda_setup::log_status;
use htda_setup::manifest;
use htda_setup::prompt::LinePrompter;
use htda_setup::setup::{self, SetupOptions, SetupReport};
use htda_setup::wizard;

use super::{CmdResult, ConfigArgs, GlobalArgs};

#[derive(Args)]
pub struct SetupArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Skip the interactive wizard and apply answers as given
    #[arg(short, long)]
    yes: bool,
}

#[derive(Serialize)]
pub struct SetupOutput {
    pub command: &'static str,
    pub root: String,
    pub interactive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers_file: Option<String>,
    pub configuration: Configuration,
    pub report: SetupReport,
}

pub fn run(args: SetupArgs, global: &GlobalArgs) -> CmdResult<SetupOutput> {
    let root = &global.root;

    // Fail on a wrong root before asking any questions.
    manifest::require_manifest(root)?;

    let (seed, answers_path) = args.config.resolve(root)?;
    let interactive = !args.yes && crate::tty::require_tty_for_interactive();

    let cfg = if interactive {
        let stdin = io::stdin();
        let mut prompter = LinePrompter::new(stdin.lock(), io::stderr());
        wizard::run_wizard(&mut prompter, &seed)?
    } else {
        Configuration::from_input(&seed)?
    };

    let options = SetupOptions {
        excluded: answers_path.iter().cloned().collect(),
    };

    log_status!("setup", "Initializing {}", cfg.package_id());
    let report = setup::apply_setup(root, &cfg, &options)?;

    Ok((
        SetupOutput {
            command: "setup",
            root: root.display().to_string(),
            interactive,
            answers_file: answers_path.map(|p| p.display().to_string()),
            configuration: cfg,
            report,
        },
        0,
    ))
}
