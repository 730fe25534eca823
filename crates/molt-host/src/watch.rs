//! Artifact change detection.
//!
//! A pure modification-time poll, run once per frame by the reload
//! coordinator. A transient stat failure reads as "unchanged": the
//! conservative choice is to not reload on bad data.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Current modification time of an artifact, if it can be read.
pub fn artifact_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|meta| meta.modified()).ok()
}

/// Whether the artifact is strictly newer than `last_seen`.
pub fn has_changed(path: &Path, last_seen: SystemTime) -> bool {
    match artifact_mtime(path) {
        Some(mtime) => mtime > last_seen,
        None => false,
    }
}

/// Last-seen modification time for one watched artifact.
///
/// Updated only by the reload coordinator after a successful reload cycle.
#[derive(Debug, Clone)]
pub struct WatchRecord {
    path: PathBuf,
    last_seen: SystemTime,
}

impl WatchRecord {
    /// Start watching `path`. When `last_seen` is `None` (artifact not yet
    /// available) the record starts at the epoch, so the artifact's first
    /// appearance reads as a change.
    pub fn new(path: PathBuf, last_seen: Option<SystemTime>) -> Self {
        Self {
            path,
            last_seen: last_seen.unwrap_or(SystemTime::UNIX_EPOCH),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_seen(&self) -> SystemTime {
        self.last_seen
    }

    /// Poll the artifact. Pure query; the record is only advanced by
    /// [`mark`](Self::mark).
    pub fn poll(&self) -> bool {
        has_changed(&self.path, self.last_seen)
    }

    /// Record the modification time of the version that was just loaded.
    pub fn mark(&mut self, seen: SystemTime) {
        self.last_seen = seen;
    }
}
