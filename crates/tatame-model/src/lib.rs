//! Domain model for the Tatame academy management core.
//!
//! Pure data contracts (entities, enumerations and the wire snapshot)
//! with no behavior beyond parsing/formatting helpers. Numeric fields
//! (`amount`, `price`, `attendance_count`, `stripes`) are kept
//! non-negative by the mutation operations in `tatame-engine`, not by the
//! types themselves.
//!
//! Wire compatibility: structs serialize with the camelCase field names
//! and label values the legacy web client stored, so existing local
//! slots and remote documents keep parsing.

pub mod attendance;
pub mod catalog;
pub mod enums;
pub mod financial;
pub mod ids;
pub mod plan;
pub mod snapshot;
pub mod student;
pub mod user;

pub use attendance::AttendanceRecord;
pub use catalog::Product;
pub use enums::{
    BeltColor, CheckInMethod, EntryType, PaymentStatus, StudentStatus, UserRole,
};
pub use financial::{FinancialRecord, NewFinancialRecord};
pub use ids::fresh_id;
pub use plan::{ClassSchedule, GraduationRule, Plan};
pub use snapshot::Snapshot;
pub use student::{GraduationEvent, NewStudent, Student, StudentPatch};
pub use user::User;
