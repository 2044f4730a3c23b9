//! The sync service: debounced push, periodic pull, provisioning.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tatame_engine::Academy;
use tatame_model::Snapshot;
use tatame_store::{LocalStore, Slot};

use crate::error::{Result, SyncError};
use crate::host::DocumentHost;
use crate::merge::{MergeStrategy, RemoteWins};
use crate::schedule::{SyncSchedule, SyncTracker};

/// Read-only view of the sync state for presentation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncStatus {
    pub sync_id: Option<String>,
    pub in_progress: bool,
    pub dirty: bool,
    pub last_push: Option<DateTime<Utc>>,
    pub last_pull: Option<DateTime<Utc>>,
}

/// Best-effort mirror of the local snapshot to one remote document.
///
/// The service is driven by `tick`: the shell reports engine revisions
/// through [`note_change`](Self::note_change) after its own mutations and
/// calls `tick` on its cadence; the service decides what is due. Network
/// failures inside `tick` are logged and swallowed; they never surface
/// to the caller and never touch local state.
pub struct SyncService<H: DocumentHost> {
    host: H,
    store: LocalStore,
    schedule: SyncSchedule,
    tracker: SyncTracker,
    merge: Box<dyn MergeStrategy>,
    sync_id: Option<String>,
    last_push: Option<DateTime<Utc>>,
    last_pull: Option<DateTime<Utc>>,
}

impl<H: DocumentHost> SyncService<H> {
    /// Build a service, adopting a sync identifier previously persisted
    /// in the store (if any).
    pub fn new(host: H, store: LocalStore) -> Self {
        let sync_id: Option<String> = store.load(Slot::SyncId);
        if let Some(id) = &sync_id {
            tracing::debug!("sync configured with document {id}");
        }
        Self {
            host,
            store,
            schedule: SyncSchedule::default(),
            tracker: SyncTracker::new(),
            merge: Box::new(RemoteWins),
            sync_id,
            last_push: None,
            last_pull: None,
        }
    }

    /// Override the timing configuration (tests use short periods).
    pub fn with_schedule(mut self, schedule: SyncSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Substitute the merge strategy.
    pub fn with_merge(mut self, merge: Box<dyn MergeStrategy>) -> Self {
        self.merge = merge;
        self
    }

    pub fn sync_id(&self) -> Option<&str> {
        self.sync_id.as_deref()
    }

    pub fn status(&self) -> SyncStatus {
        SyncStatus {
            sync_id: self.sync_id.clone(),
            in_progress: self.tracker.in_flight(),
            dirty: self.tracker.is_dirty(),
            last_push: self.last_push,
            last_pull: self.last_pull,
        }
    }

    /// Report the engine revision after a mutation. Only revisions ahead
    /// of the last synced one arm the push debounce, so changes a pull
    /// applied never push themselves back out.
    pub fn note_change(&mut self, revision: u64, now: Instant) {
        self.tracker.note_change(revision, now);
    }

    /// Run whatever is due at `now`: the periodic pull first (a pull
    /// landing inside the debounce window is overwritten into local state
    /// and the later push uploads the post-pull result), then the
    /// debounced push. No-op without a sync identifier.
    pub fn tick(&mut self, academy: &mut Academy, now: Instant) {
        if self.sync_id.is_none() {
            return;
        }

        if self.tracker.pull_due(&self.schedule, now) {
            self.tracker.mark_polled(now);
            if let Err(error) = self.pull(academy) {
                tracing::warn!("pull failed: {error}");
            }
        }

        if self.tracker.push_due(&self.schedule, now) {
            if let Err(error) = self.push(academy) {
                tracing::warn!("push failed: {error}");
            }
        }
    }

    /// Create a remote document seeded with the current snapshot and
    /// adopt its generated identifier.
    pub fn provision(&mut self, academy: &Academy) -> Result<String> {
        let id = self.host.create(&academy.export_snapshot())?;
        tracing::info!("provisioned sync document {id}");
        self.set_sync_id(&id);
        self.tracker.finish_push(Some(academy.revision()));
        Ok(id)
    }

    /// Adopt an identifier pasted in by the user and pull immediately.
    /// Local-only state created since the last push on this device is
    /// expected to be discarded by that pull.
    pub fn adopt(&mut self, id: &str, academy: &mut Academy) -> Result<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(SyncError::NotConfigured);
        }
        self.set_sync_id(id);
        self.force_pull(academy)
    }

    /// Manual pull trigger.
    pub fn force_pull(&mut self, academy: &mut Academy) -> Result<()> {
        self.tracker.mark_polled(Instant::now());
        self.pull(academy)
    }

    /// Push pending local changes without waiting out the debounce; used
    /// by short-lived commands that would otherwise exit before the quiet
    /// period elapses. No-op when nothing is pending.
    pub fn flush(&mut self, academy: &Academy) -> Result<()> {
        if self.sync_id.is_none() || !self.tracker.is_dirty() {
            return Ok(());
        }
        self.push(academy)
    }

    fn set_sync_id(&mut self, id: &str) {
        if let Err(error) = self.store.save(Slot::SyncId, id) {
            tracing::warn!("failed to persist sync identifier: {error}");
        }
        self.sync_id = Some(id.to_string());
    }

    fn pull(&mut self, academy: &mut Academy) -> Result<()> {
        let Some(id) = self.sync_id.clone() else {
            return Err(SyncError::NotConfigured);
        };
        if !self.tracker.begin_pull() {
            return Ok(());
        }

        let result = self
            .host
            .get(&id)
            .and_then(|body| {
                serde_json::from_str::<Snapshot>(&body)
                    .map_err(|source| SyncError::Malformed { source })
            });

        match result {
            Ok(snapshot) => {
                self.merge.apply(academy, snapshot);
                self.tracker.finish_pull(Some(academy.revision()));
                self.last_pull = Some(Utc::now());
                tracing::debug!("pull applied at revision {}", academy.revision());
                Ok(())
            }
            Err(error) => {
                self.tracker.finish_pull(None);
                Err(error)
            }
        }
    }

    fn push(&mut self, academy: &Academy) -> Result<()> {
        let Some(id) = self.sync_id.clone() else {
            return Err(SyncError::NotConfigured);
        };
        if !self.tracker.begin_push() {
            return Ok(());
        }

        let revision = academy.revision();
        let result = self.host.put(&id, &academy.export_snapshot());

        match result {
            Ok(()) => {
                self.tracker.finish_push(Some(revision));
                self.last_push = Some(Utc::now());
                tracing::debug!("push completed at revision {revision}");
                Ok(())
            }
            Err(error) => {
                // the attempt consumed the arm: no automatic retry
                self.tracker.finish_push(None);
                Err(error)
            }
        }
    }
}
