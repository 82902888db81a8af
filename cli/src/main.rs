#![deny(missing_docs)]

//! # OAS Typegen CLI
//!
//! Command Line Interface for deriving type declarations from OpenAPI documents.
//!
//! Supported Commands:
//! - `generate`: OpenAPI document -> Rust structs or a JSON type listing.

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

mod error;
mod generate;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI type generator")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates types for every operation of an OpenAPI document.
    Generate(generate::GenerateArgs),
}

fn main() {
    // Logs go to stderr so generated code on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Generate(args) => generate::execute(args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
