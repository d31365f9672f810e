//! Polling loop.
//!
//! Each cycle lists the directory, reconciles the tracked set, and scans
//! every tracked file from its last offset. Errors are reported through
//! the callback and never end the loop; only the shutdown flag does.

use crate::error::WatchError;
use crate::event::WatchEvent;
use crate::listing::{list_directory, ListingFilter};
use crate::reconciler::{reconcile, Reconciled, TrackedSet};
use crate::shutdown::ShutdownFlag;
use dirwatch_core::{scan_file, ScanResult};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Default time between polling cycles.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

/// What to watch and how often.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Directory whose files are scanned.
    pub dir: PathBuf,

    /// Magic string to search for.
    pub needle: String,

    /// Sleep between cycles.
    pub interval: Duration,

    /// Which directory entries get tracked.
    pub filter: ListingFilter,
}

impl WatchConfig {
    pub fn new(dir: impl Into<PathBuf>, needle: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            needle: needle.into(),
            interval: DEFAULT_INTERVAL,
            filter: ListingFilter::All,
        }
    }
}

/// Lifecycle of a [`PollingLoop`]. Stopped is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopping,
    Stopped,
}

/// Final numbers reported when the loop stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub uptime: Duration,
    pub cycles: u64,
}

/// Counters for a single cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// The directory listing failed and nothing else ran.
    pub skipped: bool,
    pub added: usize,
    pub removed: usize,
    pub scanned: usize,
    pub scan_failures: usize,
    pub matches: usize,
}

/// Owns the tracked set and drives the poll, scan, sleep sequence.
pub struct PollingLoop {
    config: WatchConfig,
    tracked: TrackedSet,
    state: LoopState,
    cycles: u64,
    started: Option<Instant>,
    summary: Option<RunSummary>,
}

impl PollingLoop {
    pub fn new(config: WatchConfig) -> Self {
        Self {
            config,
            tracked: TrackedSet::new(),
            state: LoopState::Running,
            cycles: 0,
            started: None,
            summary: None,
        }
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn tracked(&self) -> &TrackedSet {
        &self.tracked
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Polls until `shutdown` is triggered, then reports the uptime.
    ///
    /// The flag is checked once per cycle, before any work, so a signal
    /// arriving mid-sleep takes effect once that sleep ends. Calling this
    /// again after the loop stopped returns the same summary without
    /// polling or reporting anything.
    pub async fn run<F>(&mut self, shutdown: &ShutdownFlag, mut report: F) -> RunSummary
    where
        F: FnMut(&WatchEvent),
    {
        if let Some(summary) = self.summary {
            return summary;
        }

        let started = *self.started.get_or_insert_with(Instant::now);

        report(&WatchEvent::Started {
            dir: self.config.dir.clone(),
            needle: self.config.needle.clone(),
            interval: self.config.interval,
        });

        while self.state == LoopState::Running {
            if shutdown.is_triggered() {
                info!("Shutdown requested, stopping after {} cycles", self.cycles);
                self.state = LoopState::Stopping;
                break;
            }

            self.run_cycle(&mut report);
            tokio::time::sleep(self.config.interval).await;
        }

        self.stop(started, &mut report)
    }

    fn stop<F>(&mut self, started: Instant, report: &mut F) -> RunSummary
    where
        F: FnMut(&WatchEvent),
    {
        let summary = RunSummary {
            uptime: started.elapsed(),
            cycles: self.cycles,
        };

        report(&WatchEvent::Stopped {
            uptime: summary.uptime,
            cycles: summary.cycles,
        });

        self.state = LoopState::Stopped;
        self.summary = Some(summary);
        summary
    }

    /// Runs one list, reconcile, scan pass without sleeping.
    pub fn run_cycle<F>(&mut self, report: &mut F) -> CycleStats
    where
        F: FnMut(&WatchEvent),
    {
        self.cycles += 1;
        let mut stats = CycleStats::default();

        let listing = match list_directory(&self.config.dir, &self.config.filter) {
            Ok(listing) => listing,
            Err(e) => {
                report(&WatchEvent::ListingFailed {
                    dir: self.config.dir.clone(),
                    error: e.to_string(),
                });
                stats.skipped = true;
                return stats;
            }
        };

        for change in reconcile(&mut self.tracked, listing) {
            match change {
                Reconciled::Added(file) => {
                    stats.added += 1;
                    report(&WatchEvent::FileAdded { file });
                }
                Reconciled::Removed(file) => {
                    stats.removed += 1;
                    report(&WatchEvent::FileRemoved { file });
                }
            }
        }

        for name in self.tracked.names() {
            match self.scan_tracked(&name) {
                Ok(result) => {
                    stats.scanned += 1;
                    stats.matches += result.matched_lines.len();
                    for line in result.matched_lines {
                        report(&WatchEvent::MagicFound {
                            file: name.clone(),
                            line,
                        });
                    }
                }
                Err(e) => {
                    stats.scan_failures += 1;
                    report(&WatchEvent::ScanFailed {
                        file: name,
                        error: e.to_string(),
                    });
                }
            }
        }

        debug!("Cycle {} finished: {:?}", self.cycles, stats);

        stats
    }

    /// Scans one tracked file from its offset and moves the offset forward.
    fn scan_tracked(&mut self, name: &str) -> Result<ScanResult, WatchError> {
        let Some(file) = self.tracked.get_mut(name) else {
            return Ok(ScanResult::default());
        };

        let path = self.config.dir.join(name);
        let result = scan_file(&path, file.last_line_read, &self.config.needle)?;

        if !file.advance(result.final_line_count) {
            debug!(
                "{} shrank to {} lines, keeping offset {}",
                name, result.final_line_count, file.last_line_read
            );
        }

        Ok(result)
    }
}
