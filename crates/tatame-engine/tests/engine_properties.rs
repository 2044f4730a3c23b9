//! Property tests over arbitrary operation sequences.

use chrono::NaiveDate;
use proptest::prelude::*;
use tatame_engine::Academy;
use tatame_model::{BeltColor, CheckInMethod, NewStudent, StudentPatch, StudentStatus};
use tatame_store::LocalStore;
use tempfile::TempDir;

#[derive(Debug, Clone, Copy)]
enum Op {
    /// Enroll a student with the given belt/stripes.
    Add { belt: usize, stripes: u8 },
    /// Promote the n-th student (modulo roster size).
    Promote { nth: usize, belt: usize, stripes: u8 },
    /// Check in the n-th student, or a bogus id when the roster is empty.
    CheckIn { nth: usize },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..BeltColor::ALL.len(), 0u8..=4).prop_map(|(belt, stripes)| Op::Add { belt, stripes }),
        (0usize..8, 0..BeltColor::ALL.len(), 0u8..=4)
            .prop_map(|(nth, belt, stripes)| Op::Promote { nth, belt, stripes }),
        (0usize..8).prop_map(|nth| Op::CheckIn { nth }),
    ]
}

fn enrollment(belt: BeltColor, stripes: u8) -> NewStudent {
    NewStudent {
        name: "Aluno".into(),
        birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        cpf: String::new(),
        phone: String::new(),
        email: String::new(),
        address: String::new(),
        plan_id: "p1".into(),
        enrollment_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        status: StudentStatus::Active,
        photo_url: String::new(),
        belt,
        stripes,
    }
}

fn run_ops(academy: &mut Academy, ops: &[Op]) {
    for op in ops {
        match *op {
            Op::Add { belt, stripes } => {
                academy.add_student(enrollment(BeltColor::ALL[belt], stripes));
            }
            Op::Promote { nth, belt, stripes } => {
                let Some(id) = academy
                    .students()
                    .get(nth % academy.students().len().max(1))
                    .map(|s| s.id.clone())
                else {
                    continue;
                };
                let patch = StudentPatch {
                    belt: Some(BeltColor::ALL[belt]),
                    stripes: Some(stripes),
                    ..Default::default()
                };
                let _ = academy.update_student(&id, patch);
            }
            Op::CheckIn { nth } => {
                let id = academy
                    .students()
                    .get(nth % academy.students().len().max(1))
                    .map(|s| s.id.clone())
                    .unwrap_or_else(|| "missing".into());
                let _ = academy.record_attendance(&id, None, CheckInMethod::Manual);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn graduation_history_tracks_current_rank(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let dir = TempDir::new().unwrap();
        let mut academy = Academy::open(LocalStore::open(dir.path()));
        run_ops(&mut academy, &ops);

        for student in academy.students() {
            prop_assert!(!student.graduation_history.is_empty());
            let last = student.graduation_history.last().unwrap();
            prop_assert_eq!(last.belt, student.belt);
            prop_assert_eq!(last.stripes, student.stripes);
        }
    }

    #[test]
    fn attendance_counts_match_the_log(ops in proptest::collection::vec(op_strategy(), 0..40)) {
        let dir = TempDir::new().unwrap();
        let mut academy = Academy::open(LocalStore::open(dir.path()));
        run_ops(&mut academy, &ops);

        for student in academy.students() {
            let logged = academy
                .attendance()
                .iter()
                .filter(|r| r.student_id == student.id)
                .count() as u32;
            prop_assert_eq!(student.attendance_count, logged);
        }
    }

    #[test]
    fn export_import_reproduces_collections(ops in proptest::collection::vec(op_strategy(), 0..25)) {
        let dir = TempDir::new().unwrap();
        let mut academy = Academy::open(LocalStore::open(dir.path()));
        run_ops(&mut academy, &ops);
        let exported = academy.export_snapshot();

        let dir2 = TempDir::new().unwrap();
        let mut fresh = Academy::open(LocalStore::open(dir2.path()));
        prop_assert!(fresh.import_snapshot(&exported));

        prop_assert_eq!(fresh.students(), academy.students());
        prop_assert_eq!(fresh.attendance(), academy.attendance());
        prop_assert_eq!(fresh.financials(), academy.financials());
        prop_assert_eq!(fresh.plans(), academy.plans());
        prop_assert_eq!(fresh.schedules(), academy.schedules());
        prop_assert_eq!(fresh.graduation_rules(), academy.graduation_rules());
    }
}
