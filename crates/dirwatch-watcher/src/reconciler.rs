//! Watch-set reconciliation.
//!
//! Diffs the files we're tracking against a fresh directory listing.
//! New names start tracking at offset 0; names that disappeared are
//! forgotten, so a file recreated later starts from scratch.

use dirwatch_core::WatchedFile;
use std::collections::{HashMap, HashSet};

/// The files currently being watched, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TrackedSet {
    files: HashMap<String, WatchedFile>,
}

impl TrackedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&WatchedFile> {
        self.files.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut WatchedFile> {
        self.files.get_mut(name)
    }

    /// Tracked names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.files.keys().cloned().collect();
        names.sort();
        names
    }
}

/// A change made to the tracked set by [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciled {
    Added(String),
    Removed(String),
}

/// Brings `tracked` in line with `listing`.
///
/// Files in both are left alone, including their offsets. The returned
/// changes are removals then additions, each sorted by name, so the
/// outcome doesn't depend on the order the directory was enumerated in.
pub fn reconcile<I, S>(tracked: &mut TrackedSet, listing: I) -> Vec<Reconciled>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let current: HashSet<String> = listing.into_iter().map(Into::into).collect();

    let mut removed: Vec<String> = tracked
        .files
        .keys()
        .filter(|name| !current.contains(*name))
        .cloned()
        .collect();
    removed.sort();

    let mut added: Vec<String> = current
        .into_iter()
        .filter(|name| !tracked.files.contains_key(name))
        .collect();
    added.sort();

    for name in &removed {
        tracked.files.remove(name);
    }
    for name in &added {
        tracked
            .files
            .insert(name.clone(), WatchedFile::new(name.clone()));
    }

    removed
        .into_iter()
        .map(Reconciled::Removed)
        .chain(added.into_iter().map(Reconciled::Added))
        .collect()
}
