//! Event Service
//!
//! Event CRUD, search, confirmed guests and read projections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::db::models::{
    EVENT_TABLE, EmployeeWithAssignment, Event, EventCreate, EventFields, EventStatus, EventUpdate,
    Guest, GuestCreate, Host, Invitation, InvitationView, Payment, PaymentStatus, USER_TABLE,
    parse_record_id,
};
use crate::db::repository::{AssignmentRepository, EventFilter, EventRepository};
use crate::utils::time::{parse_clock_time, parse_event_date, today};
use crate::utils::types::PaginationParams;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TITLE_LEN, ValidationReport, exceeds, is_blank, is_valid_email, trimmed,
};
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::Pagination;

// =============================================================================
// Validation
// =============================================================================

/// Validate an event payload against creation rules
///
/// Returns the normalized fields, or the report with every violation.
pub fn validate_event(
    input: &EventCreate,
    today: NaiveDate,
) -> Result<EventFields, ValidationReport> {
    let mut report = ValidationReport::new();

    // Schedule
    let date = match input.date.as_deref().map(str::trim) {
        None | Some("") => {
            report.push("Event date is required");
            None
        }
        Some(raw) => match parse_event_date(raw) {
            None => {
                report.push("Invalid date format");
                None
            }
            Some(date) if date < today => {
                report.push("Event date cannot be in the past");
                None
            }
            Some(date) => Some(date),
        },
    };

    let start = clock(&mut report, input.start_time.as_deref(), "Start time");
    let end = clock(&mut report, input.end_time.as_deref(), "End time");
    if let (Some(start), Some(end)) = (start, end) {
        report.check(start >= end, "End time must be after start time");
    }

    // Host
    let host = match &input.host {
        None => {
            report.push("Host information is required");
            None
        }
        Some(host) => {
            report.check(is_blank(host.first_name.as_deref()), "Host first name is required");
            report.check(is_blank(host.last_name.as_deref()), "Host last name is required");
            match host.email.as_deref().map(str::trim) {
                None | Some("") => report.push("Host email is required"),
                Some(email) => report.check(!is_valid_email(email), "Invalid host email format"),
            }
            report.check(is_blank(host.phone.as_deref()), "Host phone is required");

            Some(Host {
                first_name: trimmed(host.first_name.as_deref()).unwrap_or_default(),
                last_name: trimmed(host.last_name.as_deref()).unwrap_or_default(),
                email: trimmed(host.email.as_deref()).unwrap_or_default(),
                phone: trimmed(host.phone.as_deref()).unwrap_or_default(),
            })
        }
    };

    // Payment
    let payment = match &input.payment {
        None => {
            report.push("Payment information is required");
            None
        }
        Some(payment) => {
            let advanced = payment.advanced_payment.unwrap_or(0.0);
            match payment.total_price {
                None => report.push("Total price is required"),
                Some(total) => report.check(total < 0.0, "Total price cannot be negative"),
            }
            report.check(advanced < 0.0, "Advanced payment cannot be negative");
            if let Some(total) = payment.total_price {
                report.check(
                    advanced > total,
                    "Advanced payment cannot exceed total price",
                );
            }

            let date = match payment.date.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(raw) => {
                    let parsed = parse_event_date(raw);
                    report.check(parsed.is_none(), "Invalid payment date format");
                    parsed
                }
            };

            Some(Payment {
                total_price: payment.total_price.unwrap_or(0.0),
                advanced_payment: advanced,
                method: trimmed(payment.method.as_deref()),
                date,
                status: payment.status.unwrap_or(PaymentStatus::Pending),
            })
        }
    };

    // Invitation
    let invitation = match &input.invitation {
        None => {
            report.push("Invitation information is required");
            None
        }
        Some(invitation) => {
            let title = invitation.title.as_deref().map(str::trim);
            if is_blank(title) {
                report.push("Invitation title is required");
            } else {
                report.check(
                    exceeds(title, MAX_TITLE_LEN),
                    "Invitation title must not exceed 20 characters",
                );
            }
            Some(Invitation {
                title: title.unwrap_or_default().to_string(),
                image_url: trimmed(invitation.image_url.as_deref()),
            })
        }
    };

    match (report.is_valid, date, start, end, host, payment, invitation) {
        (true, Some(date), Some(start), Some(end), Some(host), Some(payment), Some(invitation)) => {
            Ok(EventFields {
                date,
                start_time: start.format("%H:%M").to_string(),
                end_time: end.format("%H:%M").to_string(),
                host,
                payment,
                invitation,
            })
        }
        _ => Err(report),
    }
}

fn clock(report: &mut ValidationReport, raw: Option<&str>, label: &str) -> Option<chrono::NaiveTime> {
    match raw.map(str::trim) {
        None | Some("") => {
            report.push(format!("{label} is required"));
            None
        }
        Some(raw) => {
            let parsed = parse_clock_time(raw);
            if parsed.is_none() {
                report.push(format!("{label} must be in HH:MM format"));
            }
            parsed
        }
    }
}

/// Validate a guest payload
pub fn validate_guest(input: &GuestCreate) -> ValidationReport {
    let mut report = ValidationReport::new();
    let first = input.first_name.as_deref().map(str::trim);
    let last = input.last_name.as_deref().map(str::trim);

    if is_blank(first) {
        report.push("Guest first name is required");
    } else {
        report.check(exceeds(first, MAX_NAME_LEN), "Guest first name must not exceed 20 characters");
    }
    if is_blank(last) {
        report.push("Guest last name is required");
    } else {
        report.check(exceeds(last, MAX_NAME_LEN), "Guest last name must not exceed 20 characters");
    }
    report.check(is_blank(input.email.as_deref()), "Guest email is required");
    report
}

// =============================================================================
// Search
// =============================================================================

/// `GET /events` query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub search: Option<String>,
}

impl EventQuery {
    fn into_filter(self) -> AppResult<(EventFilter, PaginationParams)> {
        let mut report = ValidationReport::new();

        let status = match trimmed(self.status.as_deref()) {
            None => None,
            Some(raw) => match raw.to_uppercase().as_str() {
                "PENDING" => Some(EventStatus::Pending),
                "CONFIRMED" => Some(EventStatus::Confirmed),
                "CANCELLED" => Some(EventStatus::Cancelled),
                _ => {
                    report.push("Invalid status");
                    None
                }
            },
        };
        let mut date = |raw: Option<String>, label: &str| match trimmed(raw.as_deref()) {
            None => None,
            Some(raw) => {
                let parsed = parse_event_date(&raw);
                report.check(parsed.is_none(), &format!("Invalid {label} format"));
                parsed
            }
        };
        let date_from = date(self.date_from, "date_from");
        let date_to = date(self.date_to, "date_to");
        report.into_result()?;

        let filter = EventFilter {
            status,
            date_from,
            date_to,
            search: trimmed(self.search.as_deref()).map(|s| s.to_lowercase()),
        };
        Ok((filter, PaginationParams::new(self.page, self.limit)))
    }
}

/// One page of events
#[derive(Debug, Clone, Serialize)]
pub struct EventPage {
    pub events: Vec<Event>,
    pub pagination: Pagination,
}

// =============================================================================
// Service
// =============================================================================

/// Parse an event id; malformed ids cannot name an event
pub fn event_id(raw: &str) -> AppResult<RecordId> {
    parse_record_id(EVENT_TABLE, raw).ok_or_else(event_not_found)
}

fn event_not_found() -> AppError {
    AppError::new(ErrorCode::EventNotFound)
}

#[derive(Clone)]
pub struct EventService {
    events: EventRepository,
    assignments: AssignmentRepository,
}

impl EventService {
    pub fn new(events: EventRepository, assignments: AssignmentRepository) -> Self {
        Self {
            events,
            assignments,
        }
    }

    pub async fn create_event(&self, input: EventCreate, user: &CurrentUser) -> AppResult<Event> {
        let fields = validate_event(&input, today())?;
        let status = input.status.unwrap_or_default();
        let created_by = parse_record_id(USER_TABLE, &user.id);

        let event = self.events.create(fields, status, created_by).await?;
        tracing::info!(event_id = ?event.id, user = %user.id, "Event created");
        Ok(event)
    }

    pub async fn get_event(&self, raw_id: &str) -> AppResult<Event> {
        let id = event_id(raw_id)?;
        self.events
            .find_by_id(&id)
            .await?
            .ok_or_else(event_not_found)
    }

    pub async fn search_events(&self, query: EventQuery) -> AppResult<EventPage> {
        let (filter, page) = query.into_filter()?;
        let (events, total) = self
            .events
            .search(&filter, page.offset(), page.limit())
            .await?;
        Ok(EventPage {
            events,
            pagination: Pagination::new(total, page.page, page.limit),
        })
    }

    /// Partial update; schedule/host/payment/invitation changes re-validate
    /// the merged record
    pub async fn update_event(&self, raw_id: &str, patch: EventUpdate) -> AppResult<Event> {
        let id = event_id(raw_id)?;
        let current = self
            .events
            .find_by_id(&id)
            .await?
            .ok_or_else(event_not_found)?;

        let fields = if patch.touches_validated_fields() {
            Some(validate_event(&patch.merged_over(&current), today())?)
        } else {
            None
        };

        let updated = self
            .events
            .update(&id, fields, patch.status)
            .await?
            .ok_or_else(event_not_found)?;
        tracing::info!(event_id = %id, "Event updated");
        Ok(updated)
    }

    /// Delete the event and every assignment tied to it
    pub async fn delete_event(&self, raw_id: &str) -> AppResult<()> {
        let id = event_id(raw_id)?;
        if !self.events.exists(&id).await? {
            return Err(event_not_found());
        }

        let assignments = self.assignments.count_for_event(&id).await?;
        self.events.delete_cascade(&id).await?;
        tracing::info!(event_id = %id, assignments, "Event deleted with assignments");
        Ok(())
    }

    /// Add a confirmed guest
    ///
    /// Returns the event and whether a guest was added; an email already on
    /// the list leaves the event unchanged.
    pub async fn add_guest(&self, raw_id: &str, input: GuestCreate) -> AppResult<(Event, bool)> {
        let id = event_id(raw_id)?;
        validate_guest(&input).into_result()?;

        let current = self
            .events
            .find_by_id(&id)
            .await?
            .ok_or_else(event_not_found)?;

        let email = input
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .unwrap_or_default();
        if current.has_guest_email(&email) {
            return Ok((current, false));
        }

        let guest = Guest {
            id: uuid::Uuid::new_v4().simple().to_string(),
            first_name: trimmed(input.first_name.as_deref()).unwrap_or_default(),
            last_name: trimmed(input.last_name.as_deref()).unwrap_or_default(),
            email,
            assist: input.assist.unwrap_or(false),
        };

        match self.events.push_guest(&id, guest).await? {
            Some(updated) => Ok((updated, true)),
            // Lost a race with the same email, or the event went away
            None => {
                let current = self
                    .events
                    .find_by_id(&id)
                    .await?
                    .ok_or_else(event_not_found)?;
                Ok((current, false))
            }
        }
    }

    pub async fn list_guests(&self, raw_id: &str) -> AppResult<Vec<Guest>> {
        Ok(self.get_event(raw_id).await?.confirmed_guests)
    }

    /// Remove a guest by generated id or email
    pub async fn remove_guest(&self, raw_id: &str, guest_key: &str) -> AppResult<Event> {
        let id = event_id(raw_id)?;
        let current = self
            .events
            .find_by_id(&id)
            .await?
            .ok_or_else(event_not_found)?;

        let key = guest_key.trim();
        let key = if key.contains('@') {
            key.to_lowercase()
        } else {
            key.to_string()
        };
        if current.find_guest(&key).is_none() {
            return Err(AppError::new(ErrorCode::GuestNotFound));
        }

        self.events
            .pull_guest(&id, &key)
            .await?
            .ok_or_else(event_not_found)
    }

    pub async fn get_invitation(&self, raw_id: &str) -> AppResult<InvitationView> {
        Ok(InvitationView::from(self.get_event(raw_id).await?))
    }

    /// Employees assigned to the event, each with its assignment summary
    pub async fn get_event_employees(&self, raw_id: &str) -> AppResult<Vec<EmployeeWithAssignment>> {
        let id = event_id(raw_id)?;
        if !self.events.exists(&id).await? {
            return Err(event_not_found());
        }
        let rows = self.assignments.list_by_event(&id).await?;
        Ok(rows.into_iter().map(EmployeeWithAssignment::from).collect())
    }
}
