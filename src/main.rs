extern crate clap;

use crate::clap::Parser;
use rowreduce::cli::*;
use std::process::ExitCode;

pub fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.init_tracing();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
