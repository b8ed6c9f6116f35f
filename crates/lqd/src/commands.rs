mod check;
mod parse;

use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Subcommand;
use lqd_conf::ErrorMode;
use lqd_conf::Settings;

use crate::args::Args;

pub trait Command {
    fn execute(&self, args: &Args) -> Result<ExitCode>;
}

#[derive(Debug, Subcommand)]
pub enum LqdCommand {
    /// Parse one output tag's markup and print its structure as JSON
    Parse(self::parse::Parse),
    /// Check every output tag in template files
    Check(self::check::Check),
}

impl Command for LqdCommand {
    fn execute(&self, args: &Args) -> Result<ExitCode> {
        match self {
            LqdCommand::Parse(cmd) => cmd.execute(args),
            LqdCommand::Check(cmd) => cmd.execute(args),
        }
    }
}

/// Load settings for the current directory, letting `--mode` win.
fn load_settings(mode: Option<ErrorMode>) -> Result<Settings> {
    let project_root = std::env::current_dir().context("Failed to resolve current directory")?;
    let settings = Settings::new(&project_root).context("Failed to load settings")?;
    Ok(match mode {
        Some(mode) => settings.with_error_mode(mode),
        None => settings,
    })
}
