//! upsync CLI - deploy build output to a remote server
//!
//! Exit codes:
//!   0  success, nothing to do, or cancelled at the prompt
//!   1  configuration, local filesystem or connection error
//!   2  some uploads failed and --strict was given

use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::deploy::RunStatus;

fn main() -> ExitCode {
    let cli = Cli::parse();
    upsync::logging::init_tracing(cli.verbose);

    match commands::deploy::run(&cli) {
        Ok(RunStatus::Success) | Ok(RunStatus::Cancelled) => ExitCode::SUCCESS,
        Ok(RunStatus::PartialFailure) if cli.deploy.strict => ExitCode::from(2),
        Ok(RunStatus::PartialFailure) => ExitCode::SUCCESS,
        Err(err) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "event": "error", "message": format!("{:#}", err) })
                );
            } else {
                eprintln!("Error: {:#}", err);
            }
            ExitCode::FAILURE
        }
    }
}
