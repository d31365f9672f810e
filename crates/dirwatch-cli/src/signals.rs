//! Termination signal handling.
//!
//! Handlers are registered when the listener is installed, before the
//! first polling cycle, so a signal arriving mid-cycle is queued instead
//! of killing the process. The spawned task only flips the shutdown flag.

use dirwatch_watcher::ShutdownFlag;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[cfg(unix)]
use tokio::signal::unix::{signal, Signal, SignalKind};

/// Registered SIGINT/SIGTERM streams, not yet being listened to.
#[cfg(unix)]
pub struct SignalListener {
    interrupt: Signal,
    terminate: Signal,
}

#[cfg(unix)]
impl SignalListener {
    /// Registers both handlers. Must be called inside a tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Triggers `shutdown` on every received signal until both streams close.
    pub fn spawn(mut self, shutdown: ShutdownFlag) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let name = tokio::select! {
                    Some(()) = self.interrupt.recv() => "SIGINT",
                    Some(()) = self.terminate.recv() => "SIGTERM",
                    else => return,
                };
                notify(&shutdown, name);
            }
        })
    }
}

/// Registered Ctrl+C stream, not yet being listened to.
#[cfg(windows)]
pub struct SignalListener {
    ctrl_c: tokio::signal::windows::CtrlC,
}

#[cfg(windows)]
impl SignalListener {
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            ctrl_c: tokio::signal::windows::ctrl_c()?,
        })
    }

    pub fn spawn(mut self, shutdown: ShutdownFlag) -> JoinHandle<()> {
        tokio::spawn(async move {
            while self.ctrl_c.recv().await.is_some() {
                notify(&shutdown, "Ctrl+C");
            }
        })
    }
}

fn notify(shutdown: &ShutdownFlag, name: &str) {
    warn!("Received {}", name);
    if !shutdown.trigger() {
        debug!("Shutdown already requested");
    }
}
