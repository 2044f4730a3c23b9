//! The full-state wire document shared by export/import and device sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attendance::AttendanceRecord;
use crate::financial::FinancialRecord;
use crate::plan::{ClassSchedule, GraduationRule, Plan};
use crate::student::Student;

/// Serialized state of every synced collection at one instant.
///
/// Every collection is optional on read: a document may carry any subset
/// and consumers replace only what is present. Writers always emit the
/// full set. `updatedAt` accepts the `exportedAt` alias written by older
/// builds of the export path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub students: Option<Vec<Student>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<Vec<AttendanceRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financials: Option<Vec<FinancialRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plans: Option<Vec<Plan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<Vec<ClassSchedule>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_rules: Option<Vec<GraduationRule>>,
    #[serde(alias = "exportedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
