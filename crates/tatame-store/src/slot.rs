//! Named storage slots.

use std::fmt;

/// The fixed set of persisted slots: one per collection plus the session
/// user and the sync identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Current session user.
    Session,
    Students,
    Attendance,
    Financials,
    Plans,
    Schedules,
    GraduationRules,
    /// Remote document identifier for device sync.
    SyncId,
}

impl Slot {
    /// Every slot, for bulk operations like [`clear`](crate::LocalStore::clear).
    pub const ALL: [Self; 8] = [
        Self::Session,
        Self::Students,
        Self::Attendance,
        Self::Financials,
        Self::Plans,
        Self::Schedules,
        Self::GraduationRules,
        Self::SyncId,
    ];

    /// File name of the slot inside the store directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            Slot::Session => "session.json",
            Slot::Students => "students.json",
            Slot::Attendance => "attendance.json",
            Slot::Financials => "financials.json",
            Slot::Plans => "plans.json",
            Slot::Schedules => "schedules.json",
            Slot::GraduationRules => "graduation_rules.json",
            Slot::SyncId => "sync_id.json",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}
