//! Entity id generation.

use uuid::Uuid;

/// Generate a fresh opaque entity id.
///
/// Ids are unique strings with no embedded meaning; documents written by
/// other clients may carry ids in other formats and they are accepted
/// as-is.
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}
