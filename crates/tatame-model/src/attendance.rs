//! Attendance log entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::CheckInMethod;

/// One check-in, immutable once recorded (audit-log semantics).
///
/// The student name is denormalized at creation time: renaming the
/// student later does not rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: String,
    pub student_id: String,
    pub student_name: String,
    pub date: NaiveDate,
    /// Locale-formatted wall-clock time, `HH:MM`.
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    pub method: CheckInMethod,
}
