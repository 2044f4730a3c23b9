//! Session user.

use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// The signed-in user. Created at login, cleared at logout; the role is a
/// display tag, not an authorization boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub email: String,
}
