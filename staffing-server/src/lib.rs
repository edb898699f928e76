//! Staffing Server - event staffing backend
//!
//! # Modules
//!
//! ```text
//! staffing-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT, password hashing, middleware, extractor
//! ├── db/            # SurrealDB service, schema, transactions, repositories
//! ├── services/      # auth, events, employees, assignments, reconciliation
//! ├── api/           # HTTP routes and handlers
//! ├── middleware/    # request logging
//! └── utils/         # errors, validation, logging, pagination
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-exports
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_app};
pub use db::DbService;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

/// Security event log (target `security`)
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
