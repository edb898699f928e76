//! Auth Service
//!
//! Registration, password login and token verification.

use std::sync::Arc;

use crate::auth::{CurrentUser, JwtError, JwtService, password};
use crate::db::models::{AuthResponse, LoginRequest, RegisterRequest, USER_TABLE, User, UserInfo, parse_record_id};
use crate::db::repository::{RepoError, UserRepository};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MIN_PASSWORD_LEN, ValidationReport, exceeds, is_blank,
    is_valid_email, trimmed,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Validate a registration payload
pub fn validate_registration(input: &RegisterRequest) -> ValidationReport {
    let mut report = ValidationReport::new();
    let first_name = input.first_name.as_deref();
    let email = input.email.as_deref().map(str::trim);
    let password = input.password.as_deref();

    if is_blank(first_name) {
        report.push("First name is required");
    } else {
        report.check(exceeds(first_name.map(str::trim), MAX_NAME_LEN), "First name must not exceed 20 characters");
    }
    report.check(
        exceeds(input.last_name.as_deref().map(str::trim), MAX_NAME_LEN),
        "Last name must not exceed 20 characters",
    );

    match email {
        None | Some("") => report.push("Email is required"),
        Some(email) => report.check(!is_valid_email(email), "Invalid email format"),
    }

    match password {
        None | Some("") => report.push("Password is required"),
        Some(password) => {
            let len = password.chars().count();
            report.check(
                len < MIN_PASSWORD_LEN,
                "Password must be at least 6 characters long",
            );
            report.check(
                len > MAX_PASSWORD_LEN,
                "Password must not exceed 128 characters",
            );
        }
    }

    report
}

/// Validate a login payload
pub fn validate_login(input: &LoginRequest) -> ValidationReport {
    let mut report = ValidationReport::new();
    match input.email.as_deref().map(str::trim) {
        None | Some("") => report.push("Email is required"),
        Some(email) => report.check(!is_valid_email(email), "Invalid email format"),
    }
    report.check(
        input.password.as_deref().is_none_or(str::is_empty),
        "Password is required",
    );
    report
}

/// Lowercased, trimmed email
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Stored user as seen by clients
pub fn sanitize_user(user: User) -> UserInfo {
    UserInfo::from(user)
}

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: Arc<JwtService>,
}

impl AuthService {
    pub fn new(users: UserRepository, jwt: Arc<JwtService>) -> Self {
        Self { users, jwt }
    }

    /// Register a password account and issue a token
    pub async fn register(&self, input: RegisterRequest) -> AppResult<AuthResponse> {
        validate_registration(&input).into_result()?;

        let email = normalize_email(input.email.as_deref().unwrap_or_default());
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::new(ErrorCode::EmailAlreadyRegistered));
        }

        let password = input.password.unwrap_or_default();
        let hash = password::hash_password(&password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

        let first_name = trimmed(input.first_name.as_deref()).unwrap_or_default();
        let last_name = trimmed(input.last_name.as_deref());

        let user = self
            .users
            .create(first_name, last_name, email, Some(hash))
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => AppError::new(ErrorCode::EmailAlreadyRegistered),
                other => other.into(),
            })?;

        tracing::info!(user_id = ?user.id, "User registered");
        self.issue(user)
    }

    /// Password login
    pub async fn login(&self, input: LoginRequest) -> AppResult<AuthResponse> {
        validate_login(&input).into_result()?;

        let email = normalize_email(input.email.as_deref().unwrap_or_default());
        let password = input.password.unwrap_or_default();

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                crate::security_log!("WARN", "login_unknown_email", email = email.clone());
                return Err(AppError::invalid_credentials());
            }
        };

        if user.hash_pass.is_none() {
            return Err(AppError::new(ErrorCode::PasswordLoginUnavailable));
        }

        let matches = user
            .verify_password(&password)
            .map_err(|e| AppError::internal(format!("Stored password hash is corrupt: {e}")))?;
        if !matches {
            crate::security_log!("WARN", "login_bad_password", email = email.clone());
            return Err(AppError::invalid_credentials());
        }

        tracing::info!(user_id = ?user.id, "User logged in");
        self.issue(user)
    }

    /// Verify a bearer token and resolve the caller
    ///
    /// Expired, malformed or foreign-signed tokens and tokens of deleted
    /// users are 401; well-signed tokens for another issuer/audience are 403.
    pub async fn verify_token(&self, token: &str) -> AppResult<CurrentUser> {
        let claims = self.jwt.validate_token(token).map_err(|e| match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            JwtError::Rejected(_) => AppError::token_rejected("Token was not issued for this service"),
            _ => AppError::invalid_token("Invalid token"),
        })?;

        let user_id = parse_record_id(USER_TABLE, &claims.sub)
            .ok_or_else(|| AppError::invalid_token("Invalid token"))?;
        if self.users.find_by_id(&user_id).await?.is_none() {
            return Err(AppError::invalid_token("User no longer exists"));
        }

        Ok(CurrentUser::from(claims))
    }

    /// Sanitized profile of the caller
    pub async fn me(&self, current: &CurrentUser) -> AppResult<UserInfo> {
        let user_id = parse_record_id(USER_TABLE, &current.id)
            .ok_or_else(|| AppError::invalid_token("Invalid token"))?;
        self.users
            .find_by_id(&user_id)
            .await?
            .map(sanitize_user)
            .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))
    }

    fn issue(&self, user: User) -> AppResult<AuthResponse> {
        let info = sanitize_user(user);
        let token = self
            .jwt
            .generate_token(&info.id, &info.email)
            .map_err(|e| AppError::internal(e.to_string()))?;
        Ok(AuthResponse { user: info, token })
    }
}
