//! dirwatch CLI - Command-line interface for dirwatch
//!
//! Polls a directory and logs every new line that contains the magic
//! string, until interrupted with Ctrl+C or SIGTERM.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod signals;

#[derive(Parser, Debug)]
#[command(name = "dirwatch")]
#[command(author = "dirwatch Contributors")]
#[command(version)]
#[command(about = "Watch a directory for files containing a magic string", long_about = None)]
struct Cli {
    /// Directory to monitor (defaults to current directory)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Only watch files with this extension, e.g. "txt" or ".log"
    #[arg(short = 'x', long)]
    ext: Option<String>,

    /// Seconds between polls (defaults to 5)
    #[arg(short, long, value_parser = config::parse_interval)]
    interval: Option<Duration>,

    /// JSON file with default dir, ext and interval_secs
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print events as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Magic string to search watched files for
    magic: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let overrides = config::Overrides {
        dir: cli.dir,
        ext: cli.ext,
        interval: cli.interval,
    };

    let result = commands::watch(cli.magic, cli.config.as_deref(), overrides, cli.json).await;

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
