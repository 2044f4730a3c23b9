//! Configuration entities: membership plans, the weekly class schedule,
//! and graduation rules.

use serde::{Deserialize, Serialize};

use crate::enums::BeltColor;

/// A membership plan a student can be enrolled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub duration_months: u32,
}

/// One slot on the weekly schedule. Descriptive only; attendance records
/// are not validated against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub id: String,
    pub day_of_week: String,
    pub time: String,
    pub class_name: String,
    pub instructor: String,
}

/// Promotion thresholds for one belt.
///
/// Consumed when computing graduation eligibility; the engine never
/// mutates rules on its own, only configuration does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduationRule {
    pub belt: BeltColor,
    pub classes_required: u32,
    pub months_required: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_wire_shape() {
        let rule = GraduationRule {
            belt: BeltColor::White,
            classes_required: 40,
            months_required: 4,
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["belt"], "Branca");
        assert_eq!(json["classesRequired"], 40);
        assert_eq!(json["monthsRequired"], 4);
    }
}
