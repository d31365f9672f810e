//! Cooperative shutdown.
//!
//! Signal handlers set the flag; the polling loop reads it once per cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "please stop" flag. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    triggered: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown. Returns true only for the call that flipped the flag.
    pub fn trigger(&self) -> bool {
        !self.triggered.swap(true, Ordering::SeqCst)
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_is_idempotent() {
        let flag = ShutdownFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_triggered());

        assert!(handle.trigger());
        assert!(!handle.trigger());
        assert!(flag.is_triggered());
    }
}
