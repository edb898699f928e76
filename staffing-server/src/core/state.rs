use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::{
    AssignmentRepository, EmployeeRepository, EventRepository, UserRepository,
};
use crate::services::{
    AssignmentService, AuthService, EmployeeService, EventService, ReconcileService,
};

/// Server state - shared handles to every service
///
/// Built once at start-up and cloned into each request. Cloning is cheap:
/// the database handle and services are reference-counted internally.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database |
/// | jwt_service | Arc<JwtService> | Token issuing and validation |
/// | auth / events / employees / assignments / reconcile | services | Domain services |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    auth: AuthService,
    events: EventService,
    employees: EmployeeService,
    assignments: AssignmentService,
    reconcile: ReconcileService,
}

impl ServerState {
    /// Wire repositories and services over an open database
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let users = UserRepository::new(db.clone());
        let event_repo = EventRepository::new(db.clone());
        let employee_repo = EmployeeRepository::new(db.clone());
        let assignment_repo = AssignmentRepository::new(db.clone());

        Self {
            auth: AuthService::new(users, jwt_service.clone()),
            events: EventService::new(event_repo.clone(), assignment_repo.clone()),
            employees: EmployeeService::new(employee_repo.clone(), assignment_repo.clone()),
            assignments: AssignmentService::new(assignment_repo.clone(), event_repo, employee_repo),
            reconcile: ReconcileService::new(assignment_repo),
            config,
            db,
            jwt_service,
        }
    }

    /// Open the configured database, apply the schema and wire services
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let db_service = DbService::new(
            &config.database_url,
            &config.database_namespace,
            &config.database_name,
        )
        .await
        .map_err(|e| ServerError::Database(e.message))?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth
    }

    pub fn event_service(&self) -> &EventService {
        &self.events
    }

    pub fn employee_service(&self) -> &EmployeeService {
        &self.employees
    }

    pub fn assignment_service(&self) -> &AssignmentService {
        &self.assignments
    }

    pub fn reconcile_service(&self) -> &ReconcileService {
        &self.reconcile
    }
}
