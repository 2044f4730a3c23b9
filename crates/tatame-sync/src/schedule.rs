//! Sync timing: debounce/poll configuration and the tracker that decides
//! when a push or pull is due.
//!
//! All decisions are pure functions of a caller-supplied `Instant`, so
//! tests drive virtual time instead of sleeping.

use std::time::{Duration, Instant};

/// Quiet period after the last local change before a push goes out.
pub const PUSH_DEBOUNCE: Duration = Duration::from_secs(2);

/// Fixed interval between remote polls.
pub const PULL_INTERVAL: Duration = Duration::from_secs(15);

/// Timing configuration for the sync loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncSchedule {
    /// Debounce for pushes: bursts of edits produce one network write.
    pub debounce: Duration,
    /// Poll period for pulls.
    pub poll_interval: Duration,
}

impl Default for SyncSchedule {
    fn default() -> Self {
        Self {
            debounce: PUSH_DEBOUNCE,
            poll_interval: PULL_INTERVAL,
        }
    }
}

/// Scheduler state for one sync service.
///
/// `synced_revision` is the engine revision the remote document is known
/// to reflect (recorded after every applied pull and successful push).
/// [`note_change`](Self::note_change) arms the push debounce only for
/// revisions ahead of it, which is what keeps a pull from triggering its
/// own push.
#[derive(Debug, Clone, Default)]
pub struct SyncTracker {
    /// A local change is waiting to be pushed.
    dirty: bool,
    /// When the most recent qualifying change was reported.
    last_change: Option<Instant>,
    /// When the last poll was attempted.
    last_poll: Option<Instant>,
    push_in_flight: bool,
    pull_in_flight: bool,
    synced_revision: u64,
}

impl SyncTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an engine revision after a mutation. Re-arms the debounce
    /// for genuinely local changes; changes the service applied itself
    /// (revision not ahead of `synced_revision`) are ignored.
    pub fn note_change(&mut self, revision: u64, now: Instant) {
        if revision <= self.synced_revision {
            return;
        }
        self.dirty = true;
        self.last_change = Some(now);
    }

    /// True when a debounced push should start.
    pub fn push_due(&self, schedule: &SyncSchedule, now: Instant) -> bool {
        self.dirty
            && !self.push_in_flight
            && self
                .last_change
                .is_some_and(|at| now.duration_since(at) >= schedule.debounce)
    }

    /// True when a poll should start. The first call is always due, so a
    /// freshly configured service pulls on startup.
    pub fn pull_due(&self, schedule: &SyncSchedule, now: Instant) -> bool {
        !self.pull_in_flight
            && match self.last_poll {
                None => true,
                Some(at) => now.duration_since(at) >= schedule.poll_interval,
            }
    }

    /// Record a poll attempt (success or failure); the next one waits a
    /// full interval either way.
    pub fn mark_polled(&mut self, now: Instant) {
        self.last_poll = Some(now);
    }

    /// Begin a push; returns `false` when one is already in flight.
    pub fn begin_push(&mut self) -> bool {
        if self.push_in_flight {
            return false;
        }
        self.push_in_flight = true;
        true
    }

    /// Finish a push. The attempt consumes the arm whether or not it
    /// succeeded; failures are not retried until the next local change.
    /// On success the pushed revision becomes the synced revision.
    pub fn finish_push(&mut self, pushed_revision: Option<u64>) {
        self.push_in_flight = false;
        self.dirty = false;
        if let Some(revision) = pushed_revision {
            self.synced_revision = revision;
        }
    }

    /// Begin a pull; returns `false` when one is already in flight.
    pub fn begin_pull(&mut self) -> bool {
        if self.pull_in_flight {
            return false;
        }
        self.pull_in_flight = true;
        true
    }

    /// Finish a pull; on success, record the revision the merge left the
    /// engine at so the resulting local change never arms a push.
    pub fn finish_pull(&mut self, applied_revision: Option<u64>) {
        self.pull_in_flight = false;
        if let Some(revision) = applied_revision {
            self.synced_revision = revision;
        }
    }

    /// Engine revision the remote is known to reflect.
    pub fn synced_revision(&self) -> u64 {
        self.synced_revision
    }

    /// A network call is currently running.
    pub fn in_flight(&self) -> bool {
        self.push_in_flight || self.pull_in_flight
    }

    /// A local change is waiting for its debounced push.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> SyncSchedule {
        SyncSchedule::default()
    }

    #[test]
    fn test_clean_tracker_never_pushes() {
        let tracker = SyncTracker::new();
        let now = Instant::now();
        assert!(!tracker.push_due(&schedule(), now + Duration::from_secs(60)));
    }

    #[test]
    fn test_push_waits_out_the_debounce() {
        let mut tracker = SyncTracker::new();
        let now = Instant::now();
        tracker.note_change(1, now);

        assert!(!tracker.push_due(&schedule(), now + Duration::from_millis(1500)));
        assert!(tracker.push_due(&schedule(), now + Duration::from_millis(2500)));
    }

    #[test]
    fn test_burst_rearms_the_debounce() {
        let mut tracker = SyncTracker::new();
        let now = Instant::now();
        tracker.note_change(1, now);
        tracker.note_change(2, now + Duration::from_millis(1900));

        // 2.5s after the first change, but only 0.6s after the second
        assert!(!tracker.push_due(&schedule(), now + Duration::from_millis(2500)));
        assert!(tracker.push_due(&schedule(), now + Duration::from_millis(3900)));
    }

    #[test]
    fn test_pull_applied_revision_does_not_arm() {
        let mut tracker = SyncTracker::new();
        let now = Instant::now();

        assert!(tracker.begin_pull());
        tracker.finish_pull(Some(7));

        // the engine reports the revision the pull itself produced
        tracker.note_change(7, now);
        assert!(!tracker.is_dirty());
        assert!(!tracker.push_due(&schedule(), now + Duration::from_secs(60)));

        // a genuine local change afterwards arms as usual
        tracker.note_change(8, now);
        assert!(tracker.push_due(&schedule(), now + Duration::from_secs(3)));
    }

    #[test]
    fn test_failed_push_is_not_retried() {
        let mut tracker = SyncTracker::new();
        let now = Instant::now();
        tracker.note_change(1, now);

        assert!(tracker.begin_push());
        tracker.finish_push(None); // failure: synced revision unchanged

        assert!(!tracker.push_due(&schedule(), now + Duration::from_secs(60)));
        assert_eq!(tracker.synced_revision(), 0);

        // next local change re-arms
        tracker.note_change(2, now + Duration::from_secs(60));
        assert!(tracker.push_due(&schedule(), now + Duration::from_secs(63)));
    }

    #[test]
    fn test_no_overlapping_push() {
        let mut tracker = SyncTracker::new();
        tracker.note_change(1, Instant::now());
        assert!(tracker.begin_push());
        assert!(!tracker.begin_push());
        tracker.finish_push(Some(1));
        assert!(!tracker.in_flight());
    }

    #[test]
    fn test_first_poll_is_due_immediately() {
        let mut tracker = SyncTracker::new();
        let now = Instant::now();
        assert!(tracker.pull_due(&schedule(), now));

        tracker.mark_polled(now);
        assert!(!tracker.pull_due(&schedule(), now + Duration::from_secs(10)));
        assert!(tracker.pull_due(&schedule(), now + Duration::from_secs(15)));
    }
}
