//! Domain services
//!
//! Validation, business rules and cross-entity orchestration. Handlers
//! call these; these call repositories.

pub mod assignment;
pub mod auth;
pub mod employee;
pub mod event;
pub mod reconcile;
pub mod scheduler;

pub use assignment::AssignmentService;
pub use auth::AuthService;
pub use employee::EmployeeService;
pub use event::EventService;
pub use reconcile::{ReconcileReport, ReconcileService};
pub use scheduler::ReconcileScheduler;
