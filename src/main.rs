use std::{io, process::ExitCode};

use clap::Parser;
use localise::cli::{Arguments, ExitStatus};
use tracing::Level;
use tracing_subscriber::fmt;

fn main() -> ExitCode {
    let args = Arguments::parse();

    let max_level = if args.verbose() {
        Level::DEBUG
    } else {
        Level::WARN
    };
    fmt()
        .with_max_level(max_level)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();

    match localise::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
