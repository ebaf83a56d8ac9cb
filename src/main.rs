use clap::Parser;
use dovetailkit::cli::{self, Cli};
use dovetailkit::init_logging;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.log_json)?;

    cli::run(cli)
}
