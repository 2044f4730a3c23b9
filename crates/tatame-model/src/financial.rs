//! Billing ledger entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{EntryType, PaymentStatus};

/// One ledger entry, income or expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    /// Present when the entry is tied to a student (e.g. a monthly fee).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    /// Non-negative; the direction lives in `entry_type`.
    pub amount: f64,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub description: String,
}

/// Input for a new ledger entry: everything but the generated id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFinancialRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub status: PaymentStatus,
    pub description: String,
}

impl NewFinancialRecord {
    /// Attach the generated id, producing the stored record.
    pub fn with_id(self, id: String) -> FinancialRecord {
        FinancialRecord {
            id,
            student_id: self.student_id,
            entry_type: self.entry_type,
            category: self.category,
            amount: self.amount,
            date: self.date,
            status: self.status,
            description: self.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_on_wire() {
        let record = NewFinancialRecord {
            student_id: Some("s1".into()),
            entry_type: EntryType::Income,
            category: "Mensalidade".into(),
            amount: 250.0,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: PaymentStatus::Paid,
            description: "Carlos Oliveira - Maio".into(),
        }
        .with_id("f1".into());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "INCOME");
        assert_eq!(json["status"], "Pago");
        assert_eq!(json["studentId"], "s1");
    }
}
