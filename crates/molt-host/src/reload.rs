//! Reload coordination.
//!
//! One state machine per watched module, stepped once per frame:
//! `Stable → PendingChange → Unloading → Reloading → Reinitializing →
//! Stable`. Unload always completes before the next load begins, so at most
//! one version of a module's code is mapped at any observable instant, at
//! the cost of a brief window with no module loaded — a window that spans a
//! single frame boundary, not wall-clock time.

use crate::loader::{ArtifactLoader, ModuleDescriptor, ModuleLoadError};
use crate::watch::WatchRecord;
use molt_kernel::ModuleLifecycle;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where a watched module currently sits in its reload cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPhase {
    #[default]
    Stable,
    PendingChange,
    Unloading,
    Reloading,
    Reinitializing,
}

impl std::fmt::Display for ReloadPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReloadPhase::Stable => write!(f, "stable"),
            ReloadPhase::PendingChange => write!(f, "pending-change"),
            ReloadPhase::Unloading => write!(f, "unloading"),
            ReloadPhase::Reloading => write!(f, "reloading"),
            ReloadPhase::Reinitializing => write!(f, "reinitializing"),
        }
    }
}

/// Reload error types. Any of these is fatal: by the time a reload can fail,
/// the previous module has already been unloaded and there is no safe
/// fallback.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    #[error(transparent)]
    Load(#[from] ModuleLoadError),

    #[error("module reinitialization failed: {0}")]
    Reinit(String),
}

/// What a coordinator step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// No change detected; descriptor untouched.
    Idle,
    /// Mid-cycle: the old module is gone and the new artifact has not
    /// appeared yet. Retried next frame.
    Waiting,
    /// A full reload cycle completed this frame.
    Reloaded,
}

/// Orchestrates unload-old → reload-new → reinitialize for one watched
/// module, once per frame.
pub struct ReloadCoordinator<L: ArtifactLoader> {
    loader: L,
    watch: WatchRecord,
    phase: ReloadPhase,
    settle_delay: Duration,
    reload_count: u64,
}

impl<L: ArtifactLoader> ReloadCoordinator<L> {
    pub fn new(loader: L, watch: WatchRecord) -> Self {
        Self {
            loader,
            watch,
            phase: ReloadPhase::Stable,
            settle_delay: Duration::from_millis(200),
            reload_count: 0,
        }
    }

    /// Pause between unload and load, to avoid racing a writer that is still
    /// flushing the new artifact to disk.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn phase(&self) -> ReloadPhase {
        self.phase
    }

    /// Completed reload cycles so far.
    pub fn reload_count(&self) -> u64 {
        self.reload_count
    }

    pub fn watch(&self) -> &WatchRecord {
        &self.watch
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Run one step of the state machine.
    ///
    /// `reinit` is invoked exactly once per completed cycle, after the new
    /// module is fully constructed, to call its required init entry point
    /// with the pointer-stable arena and current capability table.
    pub fn poll(
        &mut self,
        current: &mut ModuleDescriptor<L::Module>,
        reinit: &mut dyn FnMut(&mut ModuleDescriptor<L::Module>) -> Result<(), ReloadError>,
    ) -> Result<ReloadOutcome, ReloadError> {
        if self.phase == ReloadPhase::Stable {
            if !self.watch.poll() {
                return Ok(ReloadOutcome::Idle);
            }
            info!("change detected in {:?}", self.watch.path());
            self.phase = ReloadPhase::PendingChange;
        }

        if self.phase == ReloadPhase::PendingChange {
            self.phase = ReloadPhase::Unloading;
            if let Some(hooks) = current.hooks_mut() {
                debug!("tearing down outgoing module {:?}", self.watch.path());
                hooks.teardown();
            }
            self.loader.unload(current);

            self.phase = ReloadPhase::Reloading;
            if !self.settle_delay.is_zero() {
                std::thread::sleep(self.settle_delay);
            }
        }

        if self.phase == ReloadPhase::Reloading {
            let fresh = self.loader.load(self.watch.path())?;
            if !fresh.is_loaded() {
                warn!(
                    "artifact {:?} vanished mid-reload; retrying next frame",
                    self.watch.path()
                );
                *current = fresh;
                return Ok(ReloadOutcome::Waiting);
            }
            *current = fresh;
            self.phase = ReloadPhase::Reinitializing;
        }

        if self.phase == ReloadPhase::Reinitializing {
            reinit(current)?;
            let seen = current
                .last_modified()
                .or_else(|| crate::watch::artifact_mtime(self.watch.path()))
                .unwrap_or_else(std::time::SystemTime::now);
            self.watch.mark(seen);
            self.phase = ReloadPhase::Stable;
            self.reload_count += 1;
            info!(
                "reloaded {:?} (cycle {})",
                self.watch.path(),
                self.reload_count
            );
            return Ok(ReloadOutcome::Reloaded);
        }

        Ok(ReloadOutcome::Idle)
    }
}
