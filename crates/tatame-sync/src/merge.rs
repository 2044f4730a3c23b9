//! Merge strategy applied to pulled snapshots.

use tatame_engine::Academy;
use tatame_model::Snapshot;

/// How a pulled remote snapshot lands in local state.
///
/// The shipped strategy is last-writer-wins with no versioning; the seam
/// exists so a version-vector or per-field strategy can replace it
/// without touching the service.
pub trait MergeStrategy {
    fn apply(&self, academy: &mut Academy, remote: Snapshot);
}

/// Compatibility strategy: every collection present in the remote
/// document overwrites the local one unconditionally. No field merge, no
/// version comparison; collections absent from the document are kept.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoteWins;

impl MergeStrategy for RemoteWins {
    fn apply(&self, academy: &mut Academy, remote: Snapshot) {
        academy.apply_snapshot(remote);
    }
}
