//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Local store operation error.
///
/// Only writes surface errors; reads degrade to "absent" so a corrupted
/// slot never takes the application down.
#[derive(Debug, Error)]
pub enum StoreError {
    /// File I/O error.
    #[error("failed to {operation} {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized for storage.
    #[error("failed to serialize slot value")]
    Serialization {
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
