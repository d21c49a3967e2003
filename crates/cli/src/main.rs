//! # rentlaw: Rental Act Segmentation CLI
//!
//! Splits a statutory PDF into chapter-scoped, page-annotated paragraph units
//! and reports on how well the document matched the heading conventions.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{InspectArgs, SegmentArgs, TextArgs};
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a YAML configuration file (defaults to `rentlaw.yml` if present)
    #[arg(long, global = true)]
    config: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a statutory PDF into page-annotated paragraph units
    Segment(SegmentArgs),
    /// Report on chapter/paragraph numbering and page coverage
    Inspect(InspectArgs),
    /// Print the text extracted from a PDF
    Text(TextArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Segment(_) => "segment",
            Commands::Inspect(_) => "inspect",
            Commands::Text(_) => "text",
        }
    }
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output.
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    if let Err(e) = run(&cli).await {
        eprintln!("{} failed: {e:#}", cli.command.name());
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Segment(args) => {
            let config = config::get_config(cli.config.as_deref())?;
            commands::handle_segment(args, &config).await
        }
        Commands::Inspect(args) => {
            let config = config::get_config(cli.config.as_deref())?;
            commands::handle_inspect(args, &config).await
        }
        Commands::Text(args) => commands::handle_text(args).await,
    }
}
