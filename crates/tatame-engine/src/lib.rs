//! Canonical application state for Tatame.
//!
//! [`Academy`] is the single source of truth for students, attendance,
//! the billing ledger, plans, schedules and graduation rules. It is
//! constructed once at startup from a [`tatame_store::LocalStore`] and
//! passed explicitly to whoever needs it; there is no ambient global.
//!
//! Mutations are synchronous reducer steps: each one persists the slots
//! it touched, bumps the revision counter consumed by the sync adapter,
//! and recomputes the graduation-alert list when students or rules
//! changed. Operations that reference a missing entity return
//! [`Outcome::NotFound`] and change nothing.

mod defaults;
mod derived;
mod engine;

pub use defaults::{default_graduation_rules, default_plans, product_catalog};
pub use derived::{FinanceSummary, finance_summary, graduation_alerts};
pub use engine::{Academy, Outcome};
