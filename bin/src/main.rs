//! momo CLI binary.
//!
//! Runs the daily rank update and renders the bot-readable feeds.

mod cmd;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::{path::PathBuf, process};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "momo")]
#[command(about = "ETF momentum rank tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (JSON). Defaults apply when the default file is absent.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch prices, rank the universe and record today's snapshot
    Update {
        /// Calendar date to run as (YYYY-MM-DD), defaults to today in UTC
        #[arg(long)]
        date: Option<String>,
    },

    /// Write rankings.json, latest.txt and index.html from the history
    Render {
        /// Output directory, overrides the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the plain-text table
        #[arg(long)]
        print: bool,
    },
}

/// Install the fmt subscriber, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::TrackerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Update { date } => {
            cmd::update::run_update(&config, date.as_deref()).await?;
        }
        Commands::Render { output, print } => {
            cmd::render::run_render(&config, output, print)?;
        }
    }

    Ok(())
}
