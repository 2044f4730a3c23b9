//! Derived read models recomputed from the canonical collections.

use tatame_model::{EntryType, FinancialRecord, GraduationRule, PaymentStatus, Student};

/// Graduation alerts: one message per student whose attendance count has
/// reached the threshold of the rule matching their current belt.
///
/// The list is recomputed wholesale after every student or rule change;
/// it fully replaces the previous one, nothing accumulates.
pub fn graduation_alerts(students: &[Student], rules: &[GraduationRule]) -> Vec<String> {
    students
        .iter()
        .filter_map(|student| {
            let rule = rules.iter().find(|rule| rule.belt == student.belt)?;
            (student.attendance_count >= rule.classes_required).then(|| {
                format!(
                    "Apta Graduação: {} atingiu {}/{} aulas.",
                    student.name, student.attendance_count, rule.classes_required
                )
            })
        })
        .collect()
}

/// Totals over settled ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FinanceSummary {
    pub income: f64,
    pub expense: f64,
}

impl FinanceSummary {
    /// Net balance: income minus expense.
    pub fn balance(&self) -> f64 {
        self.income - self.expense
    }
}

/// Sum Paid entries, optionally restricted to one `(year, month)` period.
pub fn finance_summary(
    records: &[FinancialRecord],
    period: Option<(i32, u32)>,
) -> FinanceSummary {
    use chrono::Datelike;

    let mut summary = FinanceSummary::default();
    for record in records {
        if record.status != PaymentStatus::Paid {
            continue;
        }
        if let Some((year, month)) = period {
            if record.date.year() != year || record.date.month() != month {
                continue;
            }
        }
        match record.entry_type {
            EntryType::Income => summary.income += record.amount,
            EntryType::Expense => summary.expense += record.amount,
        }
    }
    summary
}
