mod args;
mod cli;
mod commands;
mod extract;
mod logging;
mod walk;

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = std::env::args().collect();
    match cli::run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("lqd: {err:#}");
            ExitCode::from(2)
        }
    }
}
