//! Assignment Service
//!
//! Keeps an assignment, its event's reference list and the referenced
//! records consistent. Dual writes go through the repository's
//! transactional operations.

use surrealdb::RecordId;

use crate::db::models::{
    AssignmentDetail, AssignmentInput, EMPLOYEE_TABLE, EVENT_TABLE, parse_record_id,
};
use crate::db::repository::{AssignmentRepository, EmployeeRepository, EventRepository, RepoError};
use crate::utils::validation::ValidationReport;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Validate an assignment payload
///
/// Returns the amount to store (`None` when not provided) or the report.
pub fn validate_assignment(input: &AssignmentInput) -> Result<Option<f64>, ValidationReport> {
    let mut report = ValidationReport::new();
    let amount = match &input.amount_paid {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => match value.as_f64() {
            Some(amount) if amount.is_finite() => {
                report.check(amount < 0.0, "Amount paid cannot be negative");
                Some(amount)
            }
            _ => {
                report.push("Amount paid must be a number");
                None
            }
        },
    };
    if report.is_valid { Ok(amount) } else { Err(report) }
}

/// Parse the (event, employee) path pair; malformed ids are 400
pub fn parse_pair(event_raw: &str, employee_raw: &str) -> AppResult<(RecordId, RecordId)> {
    let event = parse_record_id(EVENT_TABLE, event_raw).ok_or_else(|| AppError::invalid_id("event"))?;
    let employee =
        parse_record_id(EMPLOYEE_TABLE, employee_raw).ok_or_else(|| AppError::invalid_id("employee"))?;
    Ok((event, employee))
}

#[derive(Clone)]
pub struct AssignmentService {
    assignments: AssignmentRepository,
    events: EventRepository,
    employees: EmployeeRepository,
}

impl AssignmentService {
    pub fn new(
        assignments: AssignmentRepository,
        events: EventRepository,
        employees: EmployeeRepository,
    ) -> Self {
        Self {
            assignments,
            events,
            employees,
        }
    }

    /// Create an assignment and link it to its event
    pub async fn create_assignment(
        &self,
        event_raw: &str,
        employee_raw: &str,
        input: AssignmentInput,
    ) -> AppResult<AssignmentDetail> {
        let (event, employee) = parse_pair(event_raw, employee_raw)?;
        let amount = validate_assignment(&input)?.unwrap_or(0.0);
        self.confirm_parties(&event, &employee).await?;

        if self.assignments.find_by_pair(&event, &employee).await?.is_some() {
            return Err(assignment_exists());
        }

        self.assignments
            .create_linked(&event, &employee, amount)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => assignment_exists(),
                RepoError::NotFound(what) if what == "event" => {
                    AppError::new(ErrorCode::EventNotFound)
                }
                RepoError::NotFound(_) => AppError::new(ErrorCode::EmployeeNotFound),
                other => other.into(),
            })?;

        tracing::info!(event = %event, employee = %employee, amount_paid = amount, "Assignment created");
        self.detail(&event, &employee).await
    }

    /// Update the pair's assignment (only `amount_paid` is mutable)
    pub async fn update_assignment(
        &self,
        event_raw: &str,
        employee_raw: &str,
        input: AssignmentInput,
    ) -> AppResult<AssignmentDetail> {
        let (event, employee) = parse_pair(event_raw, employee_raw)?;
        let amount = validate_assignment(&input)?;
        self.confirm_parties(&event, &employee).await?;

        let existing = self
            .assignments
            .find_by_pair(&event, &employee)
            .await?
            .ok_or_else(assignment_not_found)?;

        if let (Some(amount), Some(id)) = (amount, existing.id.as_ref()) {
            self.assignments
                .update_amount(id, amount)
                .await?
                .ok_or_else(assignment_not_found)?;
            tracing::info!(assignment = %id, amount_paid = amount, "Assignment updated");
        }

        self.detail(&event, &employee).await
    }

    /// Unlink the pair's assignment from its event and delete it
    pub async fn delete_assignment(&self, event_raw: &str, employee_raw: &str) -> AppResult<()> {
        let (event, employee) = parse_pair(event_raw, employee_raw)?;
        self.confirm_parties(&event, &employee).await?;

        let existing = self
            .assignments
            .find_by_pair(&event, &employee)
            .await?
            .ok_or_else(assignment_not_found)?;
        let id = existing.id.ok_or_else(assignment_not_found)?;

        self.assignments
            .delete_linked(&id, &event)
            .await
            .map_err(|e| match e {
                RepoError::NotFound(_) => assignment_not_found(),
                other => other.into(),
            })?;

        tracing::info!(assignment = %id, "Assignment deleted");
        Ok(())
    }

    async fn confirm_parties(&self, event: &RecordId, employee: &RecordId) -> AppResult<()> {
        if !self.events.exists(event).await? {
            return Err(AppError::new(ErrorCode::EventNotFound));
        }
        if !self.employees.exists(employee).await? {
            return Err(AppError::new(ErrorCode::EmployeeNotFound));
        }
        Ok(())
    }

    async fn detail(&self, event: &RecordId, employee: &RecordId) -> AppResult<AssignmentDetail> {
        self.assignments
            .find_detail_by_pair(event, employee)
            .await?
            .ok_or_else(assignment_not_found)
    }
}

fn assignment_exists() -> AppError {
    AppError::with_message(
        ErrorCode::AssignmentExists,
        "Assignment already exists for this event and employee",
    )
}

fn assignment_not_found() -> AppError {
    AppError::new(ErrorCode::AssignmentNotFound)
}
