//! # Storefront
//!
//! Binary entry point. Everything else lives in the library crate.

use std::process::ExitCode;

use clap::Parser;
use storefront::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    storefront::init_tracing(cli.verbose);

    let output = storefront::run(cli).and_then(|value| {
        serde_json::to_string_pretty(&value)
            .map_err(|e| storefront::error::ApiError::internal(format!("Failed to encode response: {}", e)))
    });

    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
