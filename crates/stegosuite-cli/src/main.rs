use std::error::Error;
use std::process::ExitCode;

use clap::Parser;
use log::error;
use stegosuite_core::StegoSuiteError;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = Result<T, StegoSuiteError>;

fn main() -> ExitCode {
    env_logger::init();

    let args = CliArgs::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{e:?}");
            eprintln!("{}", render_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// `Ok(false)` means the service request ended in a failed outcome
fn run(args: CliArgs) -> CliResult<bool> {
    let config = args.service_config()?;

    match args.command {
        Commands::Encode(encode) => encode.run(&config),
        Commands::Decode(decode) => decode.run(&config),
        Commands::Schemes(schemes) => schemes.run(&config),
    }
}

/// The error followed by every underlying cause
fn render_error(e: &StegoSuiteError) -> String {
    let mut rendered = format!("Error: {e}");
    let mut source = e.source();
    while let Some(cause) = source {
        rendered.push_str(&format!("\n  caused by: {cause}"));
        source = cause.source();
    }
    rendered
}
