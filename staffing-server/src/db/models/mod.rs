//! Database Models
//!
//! Stored records, request payloads and read projections.
//!
//! Identifiers use the `table:key` convention everywhere. Handlers accept
//! either the full form or the bare key; [`parse_record_id`] normalizes both.

// Serde helpers
pub mod serde_helpers;

// Auth
pub mod user;

// Staffing
pub mod assignment;
pub mod employee;
pub mod event;

// Re-exports
pub use assignment::{
    Assignment, AssignmentDetail, AssignmentInput, AssignmentSummary, AssignmentWithEmployee,
    AssignmentWithEvent, EmployeeWithAssignment, EventWithAssignment,
};
pub use employee::{Employee, EmployeeCreate, EmployeeId, EmployeeUpdate};
pub use event::{
    Event, EventCreate, EventFields, EventId, EventStatus, EventUpdate, Guest, GuestCreate, Host,
    HostInput, Invitation, InvitationInput, InvitationView, Payment, PaymentInput, PaymentStatus,
    EventDetails,
};
pub use user::{AuthResponse, LoginRequest, RegisterRequest, User, UserId, UserInfo};

use surrealdb::RecordId;

pub const EVENT_TABLE: &str = "event";
pub const EMPLOYEE_TABLE: &str = "employee";
pub const USER_TABLE: &str = "user";

const MAX_KEY_LEN: usize = 64;

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_KEY_LEN
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split `"table:key"` into its parts, tolerating an escaped key (`⟨key⟩`)
pub(crate) fn split_record_id(raw: &str) -> Option<(&str, &str)> {
    let (table, key) = raw.trim().split_once(':')?;
    let key = key
        .strip_prefix('⟨')
        .and_then(|k| k.strip_suffix('⟩'))
        .unwrap_or(key);
    (is_ident(table) && is_ident(key)).then_some((table, key))
}

/// Parse a path/body identifier for `table`
///
/// Accepts `"table:key"` or a bare `"key"`. Returns `None` for anything
/// malformed or pointing at another table.
pub fn parse_record_id(table: &str, raw: &str) -> Option<RecordId> {
    let raw = raw.trim();
    if raw.contains(':') {
        let (t, key) = split_record_id(raw)?;
        (t == table).then(|| RecordId::from_table_key(table, key))
    } else {
        is_ident(raw).then(|| RecordId::from_table_key(table, raw))
    }
}
