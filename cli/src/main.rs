use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod convert;
mod error;
mod generate;
mod inspect;
mod output;
mod utils;

use error::Result;

const LOG_ENV: &str = "PEMUTIL_LOG";

#[derive(Parser)]
#[command(name = "pemutil")]
#[command(about = "Inspect, convert and generate PEM encoded keys", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key set and print it as PEM
    Generate {
        #[command(flatten)]
        config: generate::Config,
    },
    /// Summarize the keys and certificates in PEM files
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Re-encode the keys in PEM files
    Convert {
        #[command(flatten)]
        config: convert::Config,
    },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate { config } => generate::execute(config),
        Commands::Inspect { config } => inspect::execute(config),
        Commands::Convert { config } => convert::execute(config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
