//! Sync error types.

use thiserror::Error;

/// Remote sync operation error.
///
/// Everything here is best-effort territory: the service logs and
/// swallows these at the tick level, and local state is never corrupted
/// by a failed push or pull.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Transport-level failure (DNS, TLS, timeout, ...).
    #[error("network error during {operation}")]
    Network {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The host answered with a non-success status.
    #[error("remote returned HTTP {status}")]
    Http { status: u16 },

    /// Document creation did not yield a usable identifier.
    #[error("remote response carried no document location")]
    MissingLocation,

    /// The remote document is not a parseable snapshot.
    #[error("remote document is not a valid snapshot")]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// An operation that needs a sync identifier ran without one.
    #[error("no sync identifier configured")]
    NotConfigured,
}

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
