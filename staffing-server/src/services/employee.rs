//! Employee Service

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::db::models::{
    EMPLOYEE_TABLE, Employee, EmployeeCreate, EmployeeUpdate, EventWithAssignment, USER_TABLE,
    parse_record_id,
};
use crate::db::repository::{AssignmentRepository, EmployeeRepository, RepoError};
use crate::utils::types::PaginationParams;
use crate::utils::validation::{
    MAX_NAME_LEN, ValidationReport, exceeds, is_blank, is_valid_phone, trimmed,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::Pagination;

/// Validate a create payload
pub fn validate_employee_create(input: &EmployeeCreate) -> ValidationReport {
    let mut report = ValidationReport::new();
    let first = input.first_name.as_deref().map(str::trim);
    let last = input.last_name.as_deref().map(str::trim);

    if is_blank(first) {
        report.push("First name is required");
    } else {
        report.check(exceeds(first, MAX_NAME_LEN), "First name must not exceed 20 characters");
    }
    report.check(exceeds(last, MAX_NAME_LEN), "Last name must not exceed 20 characters");

    match input.phone.as_deref().map(str::trim) {
        None | Some("") => report.push("Phone is required"),
        Some(phone) => report.check(!is_valid_phone(phone), "Invalid phone format"),
    }
    report
}

/// Validate an update payload; only provided fields are checked
pub fn validate_employee_update(input: &EmployeeUpdate) -> ValidationReport {
    let mut report = ValidationReport::new();

    if let Some(first) = input.first_name.as_deref().map(str::trim) {
        if first.is_empty() {
            report.push("First name cannot be empty");
        } else {
            report.check(exceeds(Some(first), MAX_NAME_LEN), "First name must not exceed 20 characters");
        }
    }
    report.check(
        exceeds(input.last_name.as_deref().map(str::trim), MAX_NAME_LEN),
        "Last name must not exceed 20 characters",
    );
    if let Some(phone) = input.phone.as_deref().map(str::trim) {
        if phone.is_empty() {
            report.push("Phone cannot be empty");
        } else {
            report.check(!is_valid_phone(phone), "Invalid phone format");
        }
    }
    report
}

/// `GET /employees` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

/// One page of employees
#[derive(Debug, Clone, Serialize)]
pub struct EmployeePage {
    pub employees: Vec<Employee>,
    pub pagination: Pagination,
}

/// Parse an employee id; malformed ids cannot name an employee
pub fn employee_id(raw: &str) -> AppResult<RecordId> {
    parse_record_id(EMPLOYEE_TABLE, raw).ok_or_else(employee_not_found)
}

fn employee_not_found() -> AppError {
    AppError::new(ErrorCode::EmployeeNotFound)
}

#[derive(Clone)]
pub struct EmployeeService {
    employees: EmployeeRepository,
    assignments: AssignmentRepository,
}

impl EmployeeService {
    pub fn new(employees: EmployeeRepository, assignments: AssignmentRepository) -> Self {
        Self {
            employees,
            assignments,
        }
    }

    pub async fn create_employee(
        &self,
        input: EmployeeCreate,
        user: &CurrentUser,
    ) -> AppResult<Employee> {
        validate_employee_create(&input).into_result()?;

        let phone = trimmed(input.phone.as_deref()).unwrap_or_default();
        if self.employees.find_by_phone(&phone).await?.is_some() {
            return Err(AppError::new(ErrorCode::EmployeePhoneExists));
        }

        let employee = self
            .employees
            .create(
                trimmed(input.first_name.as_deref()).unwrap_or_default(),
                trimmed(input.last_name.as_deref()),
                phone,
                parse_record_id(USER_TABLE, &user.id),
            )
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(msg) => {
                    AppError::with_message(ErrorCode::EmployeePhoneExists, msg)
                }
                other => other.into(),
            })?;

        tracing::info!(employee_id = ?employee.id, "Employee created");
        Ok(employee)
    }

    pub async fn get_employee(&self, raw_id: &str) -> AppResult<Employee> {
        let id = employee_id(raw_id)?;
        self.employees
            .find_by_id(&id)
            .await?
            .ok_or_else(employee_not_found)
    }

    /// Page through employees, newest first
    pub async fn list_employees(&self, query: EmployeeQuery) -> AppResult<EmployeePage> {
        let page = PaginationParams::new(query.page, query.limit);
        let search = trimmed(query.search.as_deref()).map(|s| s.to_lowercase());

        let (employees, total) = self
            .employees
            .list(search.as_deref(), page.offset(), page.limit())
            .await?;
        Ok(EmployeePage {
            employees,
            pagination: Pagination::new(total, page.page, page.limit),
        })
    }

    /// Partial update; the phone is re-checked for uniqueness only when it changes
    pub async fn update_employee(&self, raw_id: &str, input: EmployeeUpdate) -> AppResult<Employee> {
        let id = employee_id(raw_id)?;
        validate_employee_update(&input).into_result()?;

        let current = self
            .employees
            .find_by_id(&id)
            .await?
            .ok_or_else(employee_not_found)?;

        let changes = EmployeeUpdate {
            first_name: trimmed(input.first_name.as_deref()),
            last_name: input.last_name.as_deref().map(|s| s.trim().to_string()),
            phone: trimmed(input.phone.as_deref()),
        };

        if let Some(phone) = changes.phone.as_deref()
            && phone != current.phone
            && self.employees.find_by_phone(phone).await?.is_some()
        {
            return Err(AppError::with_message(
                ErrorCode::EmployeePhoneExists,
                "Phone number already in use by another employee",
            ));
        }

        let updated = self
            .employees
            .update(&id, changes)
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(msg) => {
                    AppError::with_message(ErrorCode::EmployeePhoneExists, msg)
                }
                other => other.into(),
            })?
            .ok_or_else(employee_not_found)?;

        tracing::info!(employee_id = %id, "Employee updated");
        Ok(updated)
    }

    /// Delete the employee, its assignments and their event references
    pub async fn delete_employee(&self, raw_id: &str) -> AppResult<()> {
        let id = employee_id(raw_id)?;
        if !self.employees.exists(&id).await? {
            return Err(employee_not_found());
        }
        self.employees.delete_cascade(&id).await?;
        tracing::info!(employee_id = %id, "Employee deleted with assignments");
        Ok(())
    }

    /// Events the employee is assigned to, newest first
    pub async fn get_employee_events(&self, raw_id: &str) -> AppResult<Vec<EventWithAssignment>> {
        let id = employee_id(raw_id)?;
        if !self.employees.exists(&id).await? {
            return Err(employee_not_found());
        }
        let rows = self.assignments.list_by_employee(&id).await?;
        Ok(rows.into_iter().map(EventWithAssignment::from).collect())
    }
}
