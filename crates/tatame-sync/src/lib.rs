//! Best-effort multi-device sync for Tatame.
//!
//! The local snapshot is mirrored to one document on a generic JSON
//! host; a second device holding the same identifier converges by
//! polling. The protocol is deliberately simple:
//!
//! - **push**: debounced full-document replace after local mutations;
//! - **pull**: periodic full-document read, applied remote-wins;
//! - no versioning, no field merge, no retry, no authentication beyond
//!   the identifier itself acting as a capability token.
//!
//! Timing lives in [`SyncTracker`], whose decisions are pure functions
//! of a caller-supplied instant; [`SyncService::tick`] runs whatever is
//! due. Swapping [`MergeStrategy`] or [`DocumentHost`] changes the merge
//! semantics or transport without touching the loop.

mod error;
mod host;
mod merge;
mod schedule;
mod service;

pub use error::{Result, SyncError};
pub use host::{DEFAULT_ENDPOINT, DocumentHost, HttpDocumentHost};
pub use merge::{MergeStrategy, RemoteWins};
pub use schedule::{PULL_INTERVAL, PUSH_DEBOUNCE, SyncSchedule, SyncTracker};
pub use service::{SyncService, SyncStatus};
