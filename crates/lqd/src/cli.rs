use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use crate::args::Args;
use crate::commands::Command;
use crate::commands::LqdCommand;

/// Inspect and check the markup of template output tags.
#[derive(Parser)]
#[command(name = "lqd")]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: LqdCommand,

    #[command(flatten)]
    pub args: Args,
}

/// Parse CLI arguments and execute the chosen command
pub fn run(args: Vec<String>) -> Result<ExitCode> {
    let cli = Cli::try_parse_from(args).unwrap_or_else(|e| {
        e.exit();
    });

    crate::logging::init_tracing(&cli.args.global);

    cli.command.execute(&cli.args)
}
