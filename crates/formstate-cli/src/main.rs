mod commands;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "formstate")]
#[command(version, about = "Inspect form validation feedback from the command line", long_about = None)]
struct Cli {
    /// Log every field transition
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay events against a form definition and print the resulting state
    Check {
        /// Form definition (TOML)
        config: PathBuf,

        /// Event script (JSON array); without one the form is only submitted
        #[arg(short, long)]
        events: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the built-in error message templates
    Messages,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Field states and submit outcome as JSON
    Json,
    /// Feedback markup for every field
    Html,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            config,
            events,
            format,
        } => {
            let valid = commands::check::execute(&config, events.as_deref(), format)?;
            Ok(if valid { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::Messages => {
            commands::messages::execute();
            Ok(ExitCode::SUCCESS)
        }
    }
}
