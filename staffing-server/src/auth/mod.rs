//! Authentication
//!
//! - [`JwtService`] issues and validates access tokens
//! - [`CurrentUser`] is the authenticated caller
//! - [`require_auth`] guards every non-public `/api` route

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{PUBLIC_ROUTES, require_auth};
