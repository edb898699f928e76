//! Input validation helpers
//!
//! Validators are pure: they collect every violation, in a fixed order,
//! into a [`ValidationReport`]. A failed report becomes a 400 whose
//! details are the ordered error list.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::utils::{AppError, AppResult};

// ── Limits ──────────────────────────────────────────────────────────

/// Person names: employee, guest, user
pub const MAX_NAME_LEN: usize = 20;

/// Invitation title
pub const MAX_TITLE_LEN: usize = 20;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum digits in a phone number
pub const MIN_PHONE_DIGITS: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]+$").expect("phone pattern"));

// ── Report ──────────────────────────────────────────────────────────

/// Outcome of a validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Record a violation
    pub fn push(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.is_valid = false;
    }

    /// Record `message` when `failed` holds
    pub fn check(&mut self, failed: bool, message: &str) {
        if failed {
            self.push(message);
        }
    }

    pub fn into_result(self) -> AppResult<()> {
        if self.is_valid {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl From<ValidationReport> for AppError {
    fn from(report: ValidationReport) -> Self {
        AppError::validation_failed(report.errors)
    }
}

// ── Primitives ──────────────────────────────────────────────────────

/// Missing, empty or whitespace-only
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// Longer than `max` characters
pub fn exceeds(value: Option<&str>, max: usize) -> bool {
    value.is_some_and(|v| v.chars().count() > max)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Digits, spaces, `+ - ( )` only, with at least [`MIN_PHONE_DIGITS`] digits
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone) && phone.chars().filter(char::is_ascii_digit).count() >= MIN_PHONE_DIGITS
}

/// Trimmed copy of an optional string, `None` when blank
pub fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
