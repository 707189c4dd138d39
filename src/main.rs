// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use holmscan::cli::{self, Cli};
use holmscan::logging;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let mut log = logging::init(cli.verbose, cli.quiet);
    tracing::debug!("Arguments from command line: {:?}", cli);

    match cli::run(&cli, &mut log) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("{:?}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
