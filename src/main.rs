use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{setup, summary};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "htda-setup")]
#[command(version = VERSION)]
#[command(about = "Initialize an HTDA Framework package from the template")]
struct Cli {
    /// Package root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename the template package in place
    Setup(setup::SetupArgs),
    /// Show the identifiers setup would produce, without changing anything
    Summary(summary::SummaryArgs),
}

fn resolve_root(raw: Option<&str>) -> htda_setup::Result<PathBuf> {
    match raw {
        Some(raw) => {
            let raw = htda_setup::validation::require_non_empty(
                raw,
                "root",
                "Package root cannot be empty",
            )?;
            Ok(commands::expand_path(raw))
        }
        None => std::env::current_dir().map_err(|e| {
            htda_setup::Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        }),
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let root = match resolve_root(cli.root.as_deref()) {
        Ok(root) => root,
        Err(err) => {
            let exit_code = output::exit_code_for_error(err.code);
            let _ = output::print_json_result(Err(err));
            return std::process::ExitCode::from(exit_code_to_u8(exit_code));
        }
    };
    let global = GlobalArgs { root };

    if matches!(cli.command, Commands::Setup(_)) {
        tty::status("htda-setup is working...");
    }

    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
