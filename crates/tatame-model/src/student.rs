//! Student entity and its graduation history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{BeltColor, StudentStatus};

/// One snapshot in a student's graduation history.
///
/// Appended on enrollment and on every recorded belt/stripe change;
/// entries are never edited or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationEvent {
    pub date: NaiveDate,
    pub belt: BeltColor,
    pub stripes: u8,
}

/// An enrolled student.
///
/// `attendance_count` only moves through attendance recording and never
/// decreases. `graduation_history` is non-empty from creation onward and
/// its last entry matches the current belt/stripes after every recorded
/// promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Reference to a [`Plan`](crate::Plan) id.
    pub plan_id: String,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
    pub photo_url: String,
    pub belt: BeltColor,
    /// Sub-increments within a belt, 0 to 4.
    pub stripes: u8,
    pub graduation_history: Vec<GraduationEvent>,
    pub attendance_count: u32,
}

/// Input for enrolling a student: everything the caller chooses, without
/// the engine-owned fields (`id`, `attendance_count`,
/// `graduation_history`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub birth_date: NaiveDate,
    pub cpf: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub plan_id: String,
    pub enrollment_date: NaiveDate,
    pub status: StudentStatus,
    pub photo_url: String,
    pub belt: BeltColor,
    pub stripes: u8,
}

/// Partial update for a student. `None` fields are left untouched.
///
/// A present `belt` or `stripes` marks the update as a graduation event
/// even when the value is unchanged; the history append is driven by
/// field presence, not by value difference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub cpf: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub plan_id: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<StudentStatus>,
    pub photo_url: Option<String>,
    pub belt: Option<BeltColor>,
    pub stripes: Option<u8>,
}

impl StudentPatch {
    /// True when the patch carries a belt or stripe change marker.
    pub fn is_graduation(&self) -> bool {
        self.belt.is_some() || self.stripes.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_wire_shape() {
        let student = Student {
            id: "s1".into(),
            name: "Ana Silva".into(),
            birth_date: NaiveDate::from_ymd_opt(1995, 8, 22).unwrap(),
            cpf: "987.654.321-11".into(),
            phone: "11888888888".into(),
            email: "ana@example.com".into(),
            address: "Av Principal, 456".into(),
            plan_id: "p3".into(),
            enrollment_date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
            status: StudentStatus::Active,
            photo_url: String::new(),
            belt: BeltColor::White,
            stripes: 3,
            graduation_history: vec![GraduationEvent {
                date: NaiveDate::from_ymd_opt(2023, 3, 15).unwrap(),
                belt: BeltColor::White,
                stripes: 0,
            }],
            attendance_count: 32,
        };

        let json = serde_json::to_value(&student).unwrap();
        assert_eq!(json["planId"], "p3");
        assert_eq!(json["attendanceCount"], 32);
        assert_eq!(json["belt"], "Branca");
        assert_eq!(json["graduationHistory"][0]["date"], "2023-03-15");

        let back: Student = serde_json::from_value(json).unwrap();
        assert_eq!(back, student);
    }

    #[test]
    fn test_patch_graduation_marker() {
        assert!(!StudentPatch::default().is_graduation());
        let patch = StudentPatch {
            stripes: Some(2),
            ..Default::default()
        };
        assert!(patch.is_graduation());
    }
}
