#![deny(missing_docs)]

//! # OAV CLI
//!
//! Validates HTTP messages against an OpenAPI contract.
//!
//! Supported Commands:
//! - `request`: Resolves the operation a request addresses and validates it.
//! - `response`: Validates a response of a given operation.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::error::CliResult;

mod error;
mod input;
mod request;
mod response;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI message validator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a request; prints the operation it matched.
    Request(request::RequestArgs),
    /// Validate a response of an operation.
    Response(response::ResponseArgs),
}

fn run(cli: &Cli) -> CliResult<String> {
    match &cli.command {
        Commands::Request(args) => {
            let addr = request::execute(args)?;
            Ok(format!("Request matches {}", addr))
        }
        Commands::Response(args) => {
            let addr = response::execute(args)?;
            Ok(format!("Response {} of {} is valid", args.status, addr))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
