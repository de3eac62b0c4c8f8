use std::process::ExitCode;

use clap::Parser;
use termshell::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match termshell::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("termshell: {e}");
            if e.is_settings_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
