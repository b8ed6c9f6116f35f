use std::io::Read as _;
use std::process::ExitCode;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use lqd_conf::ErrorMode;
use lqd_syntax::parse_variable;
use lqd_syntax::ParseContext;

use crate::args::Args;
use crate::commands::load_settings;
use crate::commands::Command;

#[derive(Debug, Parser)]
pub struct Parse {
    /// Markup of an output tag, without the `{{ }}` delimiters. Read from
    /// stdin when omitted.
    markup: Option<String>,

    /// Error mode to parse with; overrides the configured one.
    #[arg(long, short)]
    mode: Option<ErrorMode>,
}

impl Command for Parse {
    fn execute(&self, _args: &Args) -> Result<ExitCode> {
        let settings = load_settings(self.mode)?;
        let markup = match &self.markup {
            Some(markup) => markup.clone(),
            None => read_stdin()?,
        };

        let context = ParseContext::from_settings(&settings);
        let parsed = match parse_variable(&markup, &context) {
            Ok(parsed) => parsed,
            Err(err) => {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }
        };

        let json = serde_json::to_string_pretty(&parsed).context("Failed to serialize output")?;
        println!("{json}");
        Ok(ExitCode::SUCCESS)
    }
}

fn read_stdin() -> Result<String> {
    let mut source = String::new();
    std::io::stdin()
        .read_to_string(&mut source)
        .context("Failed to read stdin")?;
    Ok(source.trim_end_matches(['\r', '\n']).to_string())
}
