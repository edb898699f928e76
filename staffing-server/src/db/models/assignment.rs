//! Assignment Model
//!
//! An assignment binds one employee to one event with a payment amount.
//! The (event, employee) pair is unique.

use super::serde_helpers;
use super::{Employee, Event};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Assignment record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub event: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create/update assignment payload
///
/// `amount_paid` is kept raw so a non-numeric value is reported by
/// validation rather than rejected by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentInput {
    #[serde(default)]
    pub amount_paid: Option<serde_json::Value>,
}

/// Assignment with both sides resolved (`FETCH event, employee`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentDetail {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub event: Event,
    pub employee: Employee,
    #[serde(default)]
    pub amount_paid: f64,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Assignment with the employee resolved (`FETCH employee`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentWithEmployee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub event: RecordId,
    pub employee: Employee,
    #[serde(default)]
    pub amount_paid: f64,
}

/// Assignment with the event resolved (`FETCH event`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentWithEvent {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub event: Event,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    #[serde(default)]
    pub amount_paid: f64,
}

/// Assignment fields attached to projections
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentSummary {
    #[serde(with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub amount_paid: f64,
}

/// Employee assigned to an event
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeWithAssignment {
    #[serde(flatten)]
    pub employee: Employee,
    pub assignment: AssignmentSummary,
}

impl From<AssignmentWithEmployee> for EmployeeWithAssignment {
    fn from(a: AssignmentWithEmployee) -> Self {
        Self {
            employee: a.employee,
            assignment: AssignmentSummary {
                id: a.id,
                amount_paid: a.amount_paid,
            },
        }
    }
}

/// Event an employee is assigned to
#[derive(Debug, Clone, Serialize)]
pub struct EventWithAssignment {
    #[serde(flatten)]
    pub event: Event,
    pub assignment: AssignmentSummary,
}

impl From<AssignmentWithEvent> for EventWithAssignment {
    fn from(a: AssignmentWithEvent) -> Self {
        Self {
            event: a.event,
            assignment: AssignmentSummary {
                id: a.id,
                amount_paid: a.amount_paid,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_projection_flattens() {
        let a = AssignmentWithEmployee {
            id: Some(RecordId::from_table_key("assignment", "a1")),
            event: RecordId::from_table_key("event", "e1"),
            employee: Employee {
                id: Some(RecordId::from_table_key("employee", "m1")),
                first_name: "Ana".into(),
                last_name: None,
                phone: "5551234567".into(),
                created_by: None,
                created_at: 1,
                updated_at: 1,
            },
            amount_paid: 20.0,
        };
        let json = serde_json::to_value(EmployeeWithAssignment::from(a)).unwrap();
        assert_eq!(json["id"], "employee:m1");
        assert_eq!(json["first_name"], "Ana");
        assert_eq!(json["assignment"]["id"], "assignment:a1");
        assert_eq!(json["assignment"]["amount_paid"], 20.0);
    }

    #[test]
    fn test_input_keeps_raw_amount() {
        let input: AssignmentInput = serde_json::from_str(r#"{"amount_paid":"20"}"#).unwrap();
        assert!(input.amount_paid.unwrap().is_string());
        let input: AssignmentInput = serde_json::from_str("{}").unwrap();
        assert!(input.amount_paid.is_none());
    }
}
