//! Event Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Event ID type
pub type EventId = RecordId;

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
}

/// Event host (embedded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Event payment (embedded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub total_price: f64,
    #[serde(default)]
    pub advanced_payment: f64,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Event invitation (embedded)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invitation {
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Confirmed guest (embedded, identified by a generated id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub assist: bool,
}

/// Event record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EventId>,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: EventStatus,
    pub host: Host,
    pub payment: Payment,
    pub invitation: Invitation,
    #[serde(default)]
    pub confirmed_guests: Vec<Guest>,
    /// Assignment references
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub assignments: Vec<RecordId>,
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub created_by: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Event {
    pub fn has_guest_email(&self, email: &str) -> bool {
        self.confirmed_guests.iter().any(|g| g.email == email)
    }

    /// Find a guest by generated id or by email
    pub fn find_guest(&self, id_or_email: &str) -> Option<&Guest> {
        self.confirmed_guests
            .iter()
            .find(|g| g.id == id_or_email || g.email == id_or_email)
    }
}

/// Validated schedule, host, payment and invitation of an event
///
/// Produced only by the event validator; written as-is on create and
/// merged over the stored record on update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventFields {
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub host: Host,
    pub payment: Payment,
    pub invitation: Invitation,
}

// =============================================================================
// Request payloads
// =============================================================================

/// Host payload (every field optional so validation can report all gaps)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Payment payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentInput {
    pub total_price: Option<f64>,
    pub advanced_payment: Option<f64>,
    pub method: Option<String>,
    pub date: Option<String>,
    pub status: Option<PaymentStatus>,
}

/// Invitation payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvitationInput {
    pub title: Option<String>,
    pub image_url: Option<String>,
}

/// Create event payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCreate {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<EventStatus>,
    pub host: Option<HostInput>,
    pub payment: Option<PaymentInput>,
    pub invitation: Option<InvitationInput>,
}

/// Update event payload (only provided fields change)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub status: Option<EventStatus>,
    pub host: Option<HostInput>,
    pub payment: Option<PaymentInput>,
    pub invitation: Option<InvitationInput>,
}

impl EventUpdate {
    /// Whether any field covered by creation rules is provided
    pub fn touches_validated_fields(&self) -> bool {
        self.date.is_some()
            || self.start_time.is_some()
            || self.end_time.is_some()
            || self.host.is_some()
            || self.payment.is_some()
            || self.invitation.is_some()
    }

    /// Overlay this patch on a stored event, sub-record field by field
    pub fn merged_over(&self, current: &Event) -> EventCreate {
        let host = self.host.clone().unwrap_or_default();
        let payment = self.payment.clone().unwrap_or_default();
        let invitation = self.invitation.clone().unwrap_or_default();

        EventCreate {
            date: self
                .date
                .clone()
                .or_else(|| Some(current.date.format("%Y-%m-%d").to_string())),
            start_time: self
                .start_time
                .clone()
                .or_else(|| Some(current.start_time.clone())),
            end_time: self
                .end_time
                .clone()
                .or_else(|| Some(current.end_time.clone())),
            status: self.status.or(Some(current.status)),
            host: Some(HostInput {
                first_name: host.first_name.or_else(|| Some(current.host.first_name.clone())),
                last_name: host.last_name.or_else(|| Some(current.host.last_name.clone())),
                email: host.email.or_else(|| Some(current.host.email.clone())),
                phone: host.phone.or_else(|| Some(current.host.phone.clone())),
            }),
            payment: Some(PaymentInput {
                total_price: payment.total_price.or(Some(current.payment.total_price)),
                advanced_payment: payment
                    .advanced_payment
                    .or(Some(current.payment.advanced_payment)),
                method: payment.method.or_else(|| current.payment.method.clone()),
                date: payment.date.or_else(|| {
                    current
                        .payment
                        .date
                        .map(|d| d.format("%Y-%m-%d").to_string())
                }),
                status: payment.status.or(Some(current.payment.status)),
            }),
            invitation: Some(InvitationInput {
                title: invitation
                    .title
                    .or_else(|| Some(current.invitation.title.clone())),
                image_url: invitation
                    .image_url
                    .or_else(|| current.invitation.image_url.clone()),
            }),
        }
    }
}

/// Add guest payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GuestCreate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub assist: Option<bool>,
}

// =============================================================================
// Projections
// =============================================================================

/// Host and schedule shown alongside an invitation
#[derive(Debug, Clone, Serialize)]
pub struct EventDetails {
    pub host: Host,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
}

/// `GET /events/{id}/invitations` body
#[derive(Debug, Clone, Serialize)]
pub struct InvitationView {
    pub invitation: Invitation,
    pub event_details: EventDetails,
}

impl From<Event> for InvitationView {
    fn from(event: Event) -> Self {
        Self {
            invitation: event.invitation,
            event_details: EventDetails {
                host: event.host,
                date: event.date,
                start_time: event.start_time,
                end_time: event.end_time,
            },
        }
    }
}
