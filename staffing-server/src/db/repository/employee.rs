//! Employee Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{EMPLOYEE_TABLE, Employee, EmployeeUpdate};
use crate::db::transaction::Transaction;
use crate::utils::time::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const SEARCH_CLAUSE: &str = " WHERE string::contains(string::lowercase(first_name ?? ''), $search) \
    OR string::contains(string::lowercase(last_name ?? ''), $search) \
    OR string::contains(phone ?? '', $search)";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find employee by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Employee>> {
        self.base.find(id).await
    }

    pub async fn exists(&self, id: &RecordId) -> RepoResult<bool> {
        self.base.exists(id).await
    }

    /// Find employee by phone
    pub async fn find_by_phone(&self, phone: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE phone = $phone LIMIT 1")
            .bind(("phone", phone.to_string()))
            .await?;
        let employees: Vec<Employee> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Page through employees, newest first
    ///
    /// `search` must already be lowercased.
    pub async fn list(
        &self,
        search: Option<&str>,
        offset: u64,
        limit: u32,
    ) -> RepoResult<(Vec<Employee>, u64)> {
        let where_clause = if search.is_some() { SEARCH_CLAUSE } else { "" };
        let search = search.map(str::to_string);

        let sql = format!(
            "SELECT * FROM employee{where_clause} ORDER BY created_at DESC LIMIT $limit START $offset"
        );
        let mut query = self
            .base
            .db()
            .query(sql)
            .bind(("limit", limit))
            .bind(("offset", offset));
        if let Some(s) = &search {
            query = query.bind(("search", s.clone()));
        }
        let employees: Vec<Employee> = query.await?.take(0)?;

        let total = self
            .base
            .count_where(EMPLOYEE_TABLE, where_clause, |q| match search {
                Some(s) => q.bind(("search", s)),
                None => q,
            })
            .await?;

        Ok((employees, total))
    }

    /// Create an employee; a taken phone number is `Duplicate`
    pub async fn create(
        &self,
        first_name: String,
        last_name: Option<String>,
        phone: String,
        created_by: Option<RecordId>,
    ) -> RepoResult<Employee> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    first_name = $first_name,
                    last_name = $last_name,
                    phone = $phone,
                    created_by = $created_by,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("first_name", first_name))
            .bind(("last_name", last_name))
            .bind(("phone", phone))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await
            .map_err(|e| {
                RepoError::from_write(e, "Employee with this phone number already exists")
            })?;

        let created: Option<Employee> = result.take(0).map_err(|e| {
            RepoError::from_write(e, "Employee with this phone number already exists")
        })?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Apply provided fields; `None` when the employee is gone
    pub async fn update(&self, id: &RecordId, data: EmployeeUpdate) -> RepoResult<Option<Employee>> {
        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(e.to_string()))?;
        if let Some(map) = patch.as_object_mut() {
            map.insert("updated_at".into(), now_millis().into());
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("data", patch))
            .await
            .map_err(|e| RepoError::from_write(e, "Phone number already in use by another employee"))?;

        result
            .take::<Option<Employee>>(0)
            .map_err(|e| RepoError::from_write(e, "Phone number already in use by another employee"))
    }

    /// Delete an employee with its assignments and their event references
    pub async fn delete_cascade(&self, id: &RecordId) -> RepoResult<()> {
        let employee = id.clone();
        Transaction::new("delete_employee")
            .statement("LET $owned = (SELECT VALUE id FROM assignment WHERE employee = $employee)")
            .statement(
                "UPDATE event SET assignments = array::complement(assignments, $owned) \
                 WHERE assignments ANYINSIDE $owned",
            )
            .statement("DELETE assignment WHERE employee = $employee")
            .statement("DELETE $employee")
            .execute(self.base.db(), move |q| q.bind(("employee", employee)))
            .await
    }
}
