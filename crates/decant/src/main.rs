//! decant CLI entry point.
//!
//! Parses arguments, initializes tracing, and runs the selected command on
//! a tokio runtime with Ctrl-C mapped to a clean interrupt exit.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use decant_core::Error;

use crate::cli::{Cli, EXIT_FAILURE, EXIT_SIGINT};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.level);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Fatal: failed to create async runtime: {e}");
            std::process::exit(EXIT_FAILURE);
        }
    };

    let result = runtime.block_on(async {
        tokio::select! {
            biased;
            _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
            result = commands::run(cli) => result,
        }
    });

    let code = match result {
        Ok(code) => code,
        Err(Error::Interrupted) => {
            eprintln!("Interrupted");
            EXIT_SIGINT
        }
        Err(err) => {
            let report = miette::Report::new(err);
            eprintln!("{report:?}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
