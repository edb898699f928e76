//! Assignment Repository
//!
//! Writes that touch both an assignment and its event's reference list run
//! inside one transaction.

use super::event::EventRefs;
use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::{Assignment, AssignmentDetail, AssignmentWithEmployee, AssignmentWithEvent};
use crate::db::transaction::{Transaction, throw_missing_if};
use crate::utils::time::now_millis;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Assignments, event reference lists and employee ids read by one statement
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReconcileSnapshot {
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub events: Vec<EventRefs>,
    #[serde(default)]
    pub employees: Vec<RecordId>,
}

/// Change to one event's reference list
///
/// Applied against the list as stored at repair time, so references
/// written after the snapshot are kept. The result is also de-duplicated.
#[derive(Debug, Clone, PartialEq)]
pub struct Relink {
    pub event: RecordId,
    /// References to strip
    pub remove: Vec<RecordId>,
    /// References to append when the assignment still exists
    pub restore: Vec<RecordId>,
}

/// Repairs computed by reconciliation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepairSet {
    /// Assignments to delete
    pub delete: Vec<RecordId>,
    pub relink: Vec<Relink>,
}

impl RepairSet {
    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.relink.is_empty()
    }
}

#[derive(Clone)]
pub struct AssignmentRepository {
    base: BaseRepository,
}

impl AssignmentRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the assignment for an (event, employee) pair
    pub async fn find_by_pair(
        &self,
        event: &RecordId,
        employee: &RecordId,
    ) -> RepoResult<Option<Assignment>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM assignment WHERE event = $event AND employee = $employee LIMIT 1")
            .bind(("event", event.clone()))
            .bind(("employee", employee.clone()))
            .await?;
        let rows: Vec<Assignment> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Find the pair's assignment with event and employee resolved
    pub async fn find_detail_by_pair(
        &self,
        event: &RecordId,
        employee: &RecordId,
    ) -> RepoResult<Option<AssignmentDetail>> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT * FROM assignment WHERE event = $event AND employee = $employee \
                 LIMIT 1 FETCH event, employee",
            )
            .bind(("event", event.clone()))
            .bind(("employee", employee.clone()))
            .await?;
        let rows: Vec<AssignmentDetail> = result.take(0)?;
        Ok(rows.into_iter().next())
    }

    /// Create the assignment and append its id to the event, atomically
    ///
    /// `NotFound` if the event or employee vanished; `Duplicate` if the
    /// pair already exists.
    pub async fn create_linked(
        &self,
        event: &RecordId,
        employee: &RecordId,
        amount_paid: f64,
    ) -> RepoResult<()> {
        let (event, employee) = (event.clone(), employee.clone());
        Transaction::new("create_assignment")
            .statement(throw_missing_if(
                "array::len((SELECT VALUE id FROM $employee)) == 0",
                "employee",
            ))
            .statement(
                "LET $created = (CREATE ONLY assignment SET \
                    event = $event, employee = $employee, amount_paid = $amount_paid, \
                    created_at = $now, updated_at = $now \
                 RETURN VALUE id)",
            )
            .statement(
                "LET $linked = (UPDATE $event SET \
                    assignments = array::union(assignments ?? [], [$created]), \
                    updated_at = $now \
                 RETURN AFTER)",
            )
            .statement(throw_missing_if("array::len($linked) == 0", "event"))
            .execute(self.base.db(), move |q| {
                q.bind(("event", event))
                    .bind(("employee", employee))
                    .bind(("amount_paid", amount_paid))
                    .bind(("now", now_millis()))
            })
            .await
            .map_err(|e| match e {
                RepoError::Duplicate(_) => RepoError::Duplicate(
                    "Assignment already exists for this event and employee".to_string(),
                ),
                other => other,
            })
    }

    /// Set `amount_paid`; `None` when the assignment is gone
    pub async fn update_amount(&self, id: &RecordId, amount_paid: f64) -> RepoResult<Option<Assignment>> {
        let updated: Option<Assignment> = self
            .base
            .db()
            .query("UPDATE $thing SET amount_paid = $amount_paid, updated_at = $now RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("amount_paid", amount_paid))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        Ok(updated)
    }

    /// Remove the id from the event's list and delete the assignment, atomically
    pub async fn delete_linked(&self, id: &RecordId, event: &RecordId) -> RepoResult<()> {
        let (assignment, event) = (id.clone(), event.clone());
        Transaction::new("delete_assignment")
            .statement(
                "UPDATE $event SET \
                    assignments = array::complement(assignments ?? [], [$assignment]), \
                    updated_at = $now",
            )
            .statement("LET $removed = (DELETE $assignment RETURN BEFORE)")
            .statement(throw_missing_if("array::len($removed) == 0", "assignment"))
            .execute(self.base.db(), move |q| {
                q.bind(("assignment", assignment))
                    .bind(("event", event))
                    .bind(("now", now_millis()))
            })
            .await
    }

    /// Assignments of an event, employees resolved, oldest first
    pub async fn list_by_event(&self, event: &RecordId) -> RepoResult<Vec<AssignmentWithEmployee>> {
        let rows: Vec<AssignmentWithEmployee> = self
            .base
            .db()
            .query(
                "SELECT * FROM assignment WHERE event = $event AND employee.id != NONE \
                 ORDER BY created_at ASC FETCH employee",
            )
            .bind(("event", event.clone()))
            .await?
            .take(0)?;
        Ok(rows)
    }

    /// Assignments of an employee, events resolved, newest event first
    pub async fn list_by_employee(
        &self,
        employee: &RecordId,
    ) -> RepoResult<Vec<AssignmentWithEvent>> {
        let mut rows: Vec<AssignmentWithEvent> = self
            .base
            .db()
            .query(
                "SELECT * FROM assignment WHERE employee = $employee AND event.id != NONE \
                 FETCH event",
            )
            .bind(("employee", employee.clone()))
            .await?
            .take(0)?;
        rows.sort_by(|a, b| b.event.date.cmp(&a.event.date));
        Ok(rows)
    }

    /// Number of assignments pointing at an event
    pub async fn count_for_event(&self, event: &RecordId) -> RepoResult<u64> {
        let rows: Vec<CountRow> = self
            .base
            .db()
            .query("SELECT count() FROM assignment WHERE event = $event GROUP ALL")
            .bind(("event", event.clone()))
            .await?
            .take(0)?;
        Ok(rows.first().map(|r| r.count).unwrap_or(0))
    }

    /// Consistent view of every assignment, event list and employee id
    ///
    /// A single statement runs in one read transaction, so a write that
    /// commits during the scan is either fully visible or not at all.
    pub async fn reconcile_snapshot(&self) -> RepoResult<ReconcileSnapshot> {
        let snapshot: Option<ReconcileSnapshot> = self
            .base
            .db()
            .query(
                "RETURN { \
                    assignments: (SELECT * FROM assignment), \
                    events: (SELECT id, assignments ?? [] AS assignments FROM event), \
                    employees: (SELECT VALUE id FROM employee) \
                 }",
            )
            .await?
            .take(0)?;
        Ok(snapshot.unwrap_or_default())
    }

    /// Apply reconciliation repairs in one transaction
    pub async fn apply_repairs(&self, repairs: RepairSet) -> RepoResult<()> {
        if repairs.is_empty() {
            return Ok(());
        }

        let mut tx = Transaction::new("reconcile");
        if !repairs.delete.is_empty() {
            tx = tx.statement("DELETE assignment WHERE id INSIDE $orphans");
        }
        for i in 0..repairs.relink.len() {
            tx = tx.statement(format!(
                "UPDATE $ev{i} SET assignments = array::union( \
                    array::complement(assignments ?? [], $remove{i}), \
                    (SELECT VALUE id FROM assignment WHERE id INSIDE $restore{i} AND event = $ev{i}) \
                 )"
            ));
        }

        let RepairSet { delete, relink } = repairs;
        tx.execute(self.base.db(), move |mut q| {
            if !delete.is_empty() {
                q = q.bind(("orphans", delete));
            }
            for (i, change) in relink.into_iter().enumerate() {
                q = q
                    .bind((format!("ev{i}"), change.event))
                    .bind((format!("remove{i}"), change.remove))
                    .bind((format!("restore{i}"), change.restore));
            }
            q
        })
        .await
    }
}
