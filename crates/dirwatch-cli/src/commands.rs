//! CLI command implementations.

use crate::config::{self, FileConfig, Overrides};
use crate::signals::SignalListener;
use dirwatch_watcher::{PollingLoop, ShutdownFlag, WatchEvent};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info, warn};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Watch a directory until SIGINT or SIGTERM.
pub async fn watch(
    magic: String,
    config_path: Option<&Path>,
    overrides: Overrides,
    json: bool,
) -> Result<()> {
    let file = match config_path {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let config = config::resolve(magic, file, overrides)?;

    // Register handlers before the first cycle can block the runtime
    let shutdown = ShutdownFlag::new();
    SignalListener::install()?.spawn(shutdown.clone());

    let mut poller = PollingLoop::new(config);
    poller
        .run(&shutdown, |event| {
            if json {
                print_json(event);
            } else {
                log_event(event);
            }
        })
        .await;

    Ok(())
}

fn log_event(event: &WatchEvent) {
    match event {
        WatchEvent::Started {
            dir,
            needle,
            interval,
        } => info!(
            "Watching directory {} every {}s for '{}'",
            dir.display(),
            interval.as_secs_f64(),
            needle
        ),
        WatchEvent::FileAdded { file } => info!("New file {} has been added", file),
        WatchEvent::FileRemoved { file } => info!("File {} has been deleted", file),
        WatchEvent::MagicFound { file, line } => {
            info!("Found magic text in {} on line {}", file, line)
        }
        WatchEvent::ListingFailed { dir, error } => {
            error!("Skipping cycle, cannot read {}: {}", dir.display(), error)
        }
        WatchEvent::ScanFailed { file, error } => warn!("Skipping {}: {}", file, error),
        WatchEvent::Stopped { uptime, cycles } => info!(
            "\n\
             -------------------------------------------------------------------\n   \
             Stopped dirwatch after {} cycles\n   \
             Uptime was {}\n\
             -------------------------------------------------------------------",
            cycles,
            format_uptime(*uptime)
        ),
    }
}

fn print_json(event: &WatchEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(e) => warn!("Failed to serialize event: {}", e),
    }
}

/// Formats a duration as `H:MM:SS.ffffff`.
fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    format!(
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60,
        uptime.subsec_micros()
    )
}
