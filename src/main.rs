mod api;
mod cli;
mod core;
mod utils;

use clap::Parser;
use std::process::ExitCode;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    utils::logging::init(cli.verbose);

    let result = match &cli.command {
        Commands::Check(args) => cli::commands::check::execute(args).await,
        Commands::Fix(args) => cli::commands::fix::execute(args).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            cli::output::report_failure(&err);
            ExitCode::FAILURE
        }
    }
}
