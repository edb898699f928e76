//! Reconciliation
//!
//! Repairs drift between event reference lists and assignment documents:
//!
//! - an assignment whose event or employee no longer exists is deleted
//! - an assignment missing from its event's list is re-appended
//! - a reference to a missing assignment, or to one that belongs to another
//!   event, is removed
//!
//! The plan is computed in memory from one consistent snapshot and applied
//! in one transaction as changes to each list, never as a replacement, so
//! references written by requests in between survive.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use surrealdb::RecordId;

use crate::db::models::Assignment;
use crate::db::repository::AssignmentRepository;
use crate::db::repository::assignment::{ReconcileSnapshot, Relink, RepairSet};
use crate::db::repository::event::EventRefs;
use crate::utils::AppResult;

/// Summary of one reconciliation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub orphans_deleted: usize,
    pub references_restored: usize,
    pub references_removed: usize,
    pub events_repaired: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Compute the repairs for a store snapshot
pub fn plan(
    assignments: &[Assignment],
    events: &[EventRefs],
    employees: &[RecordId],
) -> (RepairSet, ReconcileReport) {
    let event_keys: HashSet<String> = events.iter().map(|e| e.id.to_string()).collect();
    let employee_keys: HashSet<String> = employees.iter().map(|e| e.to_string()).collect();

    let mut repairs = RepairSet::default();
    let mut report = ReconcileReport::default();

    // assignment id -> owning event, for assignments that survive
    let mut owner: HashMap<String, String> = HashMap::new();
    // event -> surviving assignment ids, in scan order
    let mut expected: HashMap<String, Vec<RecordId>> = HashMap::new();

    for assignment in assignments {
        let Some(id) = assignment.id.clone() else {
            continue;
        };
        let event_key = assignment.event.to_string();
        if !event_keys.contains(&event_key) || !employee_keys.contains(&assignment.employee.to_string()) {
            repairs.delete.push(id);
            report.orphans_deleted += 1;
            continue;
        }
        owner.insert(id.to_string(), event_key.clone());
        expected.entry(event_key).or_default().push(id);
    }

    for event in events {
        let event_key = event.id.to_string();
        let mut seen = HashSet::new();
        let mut remove: Vec<RecordId> = Vec::new();
        let mut restore = Vec::new();
        let mut duplicated = false;

        for reference in &event.assignments {
            let key = reference.to_string();
            if owner.get(&key) != Some(&event_key) {
                if !remove.contains(reference) {
                    remove.push(reference.clone());
                }
                report.references_removed += 1;
            } else if !seen.insert(key) {
                duplicated = true;
                report.references_removed += 1;
            }
        }
        for id in expected.get(&event_key).into_iter().flatten() {
            if seen.insert(id.to_string()) {
                restore.push(id.clone());
                report.references_restored += 1;
            }
        }

        if duplicated || !remove.is_empty() || !restore.is_empty() {
            repairs.relink.push(Relink {
                event: event.id.clone(),
                remove,
                restore,
            });
            report.events_repaired += 1;
        }
    }

    (repairs, report)
}

#[derive(Clone)]
pub struct ReconcileService {
    assignments: AssignmentRepository,
}

impl ReconcileService {
    pub fn new(assignments: AssignmentRepository) -> Self {
        Self { assignments }
    }

    /// Scan the store and apply every repair in one transaction
    pub async fn run(&self) -> AppResult<ReconcileReport> {
        let ReconcileSnapshot {
            assignments,
            events,
            employees,
        } = self.assignments.reconcile_snapshot().await?;

        let (repairs, report) = plan(&assignments, &events, &employees);
        if repairs.is_empty() {
            tracing::debug!("Reconciliation found no drift");
            return Ok(report);
        }

        self.assignments.apply_repairs(repairs).await?;
        tracing::info!(
            orphans_deleted = report.orphans_deleted,
            references_restored = report.references_restored,
            references_removed = report.references_removed,
            events_repaired = report.events_repaired,
            "Reconciliation applied"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rid(table: &str, key: &str) -> RecordId {
        RecordId::from_table_key(table, key)
    }

    fn assignment(key: &str, event: &str, employee: &str) -> Assignment {
        Assignment {
            id: Some(rid("assignment", key)),
            event: rid("event", event),
            employee: rid("employee", employee),
            amount_paid: 0.0,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn relink(event: &str, remove: &[&str], restore: &[&str]) -> Relink {
        Relink {
            event: rid("event", event),
            remove: remove.iter().map(|r| rid("assignment", r)).collect(),
            restore: restore.iter().map(|r| rid("assignment", r)).collect(),
        }
    }

    fn event(key: &str, refs: &[&str]) -> EventRefs {
        EventRefs {
            id: rid("event", key),
            assignments: refs.iter().map(|r| rid("assignment", r)).collect(),
        }
    }

    #[test]
    fn test_consistent_store_is_clean() {
        let (repairs, report) = plan(
            &[assignment("a1", "e1", "m1")],
            &[event("e1", &["a1"])],
            &[rid("employee", "m1")],
        );
        assert!(repairs.is_empty());
        assert!(report.is_clean());
    }

    #[test]
    fn test_orphans_deleted_and_references_dropped() {
        let (repairs, report) = plan(
            &[
                assignment("a1", "e1", "gone"),
                assignment("a2", "missing", "m1"),
                assignment("a3", "e1", "m1"),
            ],
            &[event("e1", &["a1", "a3"])],
            &[rid("employee", "m1")],
        );
        assert_eq!(repairs.delete, vec![rid("assignment", "a1"), rid("assignment", "a2")]);
        assert_eq!(repairs.relink, vec![relink("e1", &["a1"], &[])]);
        assert_eq!(report.orphans_deleted, 2);
        assert_eq!(report.references_removed, 1);
        assert_eq!(report.events_repaired, 1);
    }

    #[test]
    fn test_missing_reference_restored() {
        let (repairs, report) = plan(
            &[assignment("a1", "e1", "m1"), assignment("a2", "e1", "m2")],
            &[event("e1", &["a1"])],
            &[rid("employee", "m1"), rid("employee", "m2")],
        );
        assert!(repairs.delete.is_empty());
        assert_eq!(repairs.relink, vec![relink("e1", &[], &["a2"])]);
        assert_eq!(report.references_restored, 1);
    }

    #[test]
    fn test_reference_to_other_event_and_duplicates_removed() {
        let (repairs, report) = plan(
            &[assignment("a1", "e1", "m1")],
            &[event("e1", &["a1", "a1"]), event("e2", &["a1", "ghost"])],
            &[rid("employee", "m1")],
        );
        assert_eq!(
            repairs.relink,
            vec![relink("e1", &[], &[]), relink("e2", &["a1", "ghost"], &[])]
        );
        assert_eq!(report.references_removed, 3);
        assert_eq!(report.events_repaired, 2);
    }
}
