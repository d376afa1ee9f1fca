use clap::Args;
use serde::Serialize;

use htda_setup::config::{ConfigSummary, Configuration};

use super::{CmdResult, ConfigArgs, GlobalArgs};

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Serialize)]
pub struct SummaryOutput {
    pub command: &'static str,
    pub configuration: Configuration,
    pub summary: ConfigSummary,
    pub text: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Resolve the configuration and report what setup would produce. Read-only.
pub fn run(args: SummaryArgs, global: &GlobalArgs) -> CmdResult<SummaryOutput> {
    let (input, _) = args.config.resolve(&global.root)?;
    let cfg = Configuration::from_input(&input)?;
    let summary = cfg.summary();

    Ok((
        SummaryOutput {
            command: "summary",
            text: summary.lines(),
            warnings: cfg.version_warning().into_iter().collect(),
            summary,
            configuration: cfg,
        },
        0,
    ))
}
