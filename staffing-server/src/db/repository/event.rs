//! Event Repository

use super::{BaseRepository, RepoResult};
use crate::db::models::{Event, EventFields, EventStatus, Guest, EVENT_TABLE};
use crate::db::transaction::Transaction;
use crate::utils::time::now_millis;
use chrono::NaiveDate;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::method::Query;
use surrealdb::{RecordId, Surreal};

/// Filters for event search; all present filters combine with AND
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub status: Option<EventStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    /// Lowercased substring matched against host name and email
    pub search: Option<String>,
}

impl EventFilter {
    fn where_clause(&self) -> String {
        let mut conditions = Vec::new();
        if self.status.is_some() {
            conditions.push("status = $status");
        }
        if self.date_from.is_some() {
            conditions.push("date >= $date_from");
        }
        if self.date_to.is_some() {
            conditions.push("date <= $date_to");
        }
        if self.search.is_some() {
            conditions.push(
                "(string::contains(string::lowercase(host.first_name ?? ''), $search) \
                 OR string::contains(string::lowercase(host.last_name ?? ''), $search) \
                 OR string::contains(string::lowercase(host.email ?? ''), $search))",
            );
        }
        if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        }
    }

    fn bind<'a>(&self, mut q: Query<'a, Db>) -> Query<'a, Db> {
        if let Some(status) = self.status {
            q = q.bind(("status", status.as_str()));
        }
        if let Some(from) = self.date_from {
            q = q.bind(("date_from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.date_to {
            q = q.bind(("date_to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(search) = &self.search {
            q = q.bind(("search", search.clone()));
        }
        q
    }
}

/// Event id with its assignment reference list
#[derive(Debug, Clone, Deserialize)]
pub struct EventRefs {
    pub id: RecordId,
    #[serde(default)]
    pub assignments: Vec<RecordId>,
}

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create an event from validated fields
    pub async fn create(
        &self,
        fields: EventFields,
        status: EventStatus,
        created_by: Option<RecordId>,
    ) -> RepoResult<Event> {
        let now = now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE event SET
                    date = $date,
                    start_time = $start_time,
                    end_time = $end_time,
                    status = $status,
                    host = $host,
                    payment = $payment,
                    invitation = $invitation,
                    confirmed_guests = [],
                    assignments = [],
                    created_by = $created_by,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("date", fields.date.format("%Y-%m-%d").to_string()))
            .bind(("start_time", fields.start_time))
            .bind(("end_time", fields.end_time))
            .bind(("status", status.as_str()))
            .bind(("host", fields.host))
            .bind(("payment", fields.payment))
            .bind(("invitation", fields.invitation))
            .bind(("created_by", created_by))
            .bind(("now", now))
            .await?;

        let created: Option<Event> = result.take(0)?;
        created.ok_or_else(|| super::RepoError::Database("Failed to create event".to_string()))
    }

    /// Find event by id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Event>> {
        self.base.find(id).await
    }

    pub async fn exists(&self, id: &RecordId) -> RepoResult<bool> {
        self.base.exists(id).await
    }

    /// Search events, newest date first; returns the page and the filtered total
    pub async fn search(
        &self,
        filter: &EventFilter,
        offset: u64,
        limit: u32,
    ) -> RepoResult<(Vec<Event>, u64)> {
        let where_clause = filter.where_clause();

        let sql = format!(
            "SELECT * FROM event{where_clause} ORDER BY date DESC, created_at DESC LIMIT $limit START $offset"
        );
        let events: Vec<Event> = filter
            .bind(self.base.db().query(sql))
            .bind(("limit", limit))
            .bind(("offset", offset))
            .await?
            .take(0)?;

        let total = self
            .base
            .count_where(EVENT_TABLE, &where_clause, |q| filter.bind(q))
            .await?;

        Ok((events, total))
    }

    /// Overwrite validated fields and/or status; `None` when the event is gone
    pub async fn update(
        &self,
        id: &RecordId,
        fields: Option<EventFields>,
        status: Option<EventStatus>,
    ) -> RepoResult<Option<Event>> {
        let mut data = serde_json::Map::new();
        if let Some(fields) = fields {
            data.insert(
                "date".into(),
                fields.date.format("%Y-%m-%d").to_string().into(),
            );
            data.insert("start_time".into(), fields.start_time.into());
            data.insert("end_time".into(), fields.end_time.into());
            data.insert("host".into(), to_json(&fields.host)?);
            data.insert("payment".into(), to_json(&fields.payment)?);
            data.insert("invitation".into(), to_json(&fields.invitation)?);
        }
        if let Some(status) = status {
            data.insert("status".into(), status.as_str().into());
        }
        data.insert("updated_at".into(), now_millis().into());

        let updated: Option<Event> = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", id.clone()))
            .bind(("data", serde_json::Value::Object(data)))
            .await?
            .take(0)?;
        Ok(updated)
    }

    /// Delete an event and every assignment tied to it
    ///
    /// Removes assignments listed in the event and those whose `event`
    /// field points at it, then the event, in one transaction.
    pub async fn delete_cascade(&self, id: &RecordId) -> RepoResult<()> {
        let event = id.clone();
        Transaction::new("delete_event")
            .statement("LET $refs = array::flatten((SELECT VALUE assignments FROM $event))")
            .statement("DELETE assignment WHERE event = $event OR id INSIDE $refs")
            .statement("DELETE $event")
            .execute(self.base.db(), move |q| q.bind(("event", event)))
            .await
    }

    /// Append a guest unless one with the same email exists
    ///
    /// Returns `None` when nothing was written (duplicate email or missing
    /// event).
    pub async fn push_guest(&self, id: &RecordId, guest: Guest) -> RepoResult<Option<Event>> {
        let email = guest.email.clone();
        let updated: Option<Event> = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    confirmed_guests += $guest,
                    updated_at = $now
                WHERE $email NOTINSIDE (confirmed_guests ?? []).email
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("guest", guest))
            .bind(("email", email))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        Ok(updated)
    }

    /// Remove the guest whose id or email equals `key`
    pub async fn pull_guest(&self, id: &RecordId, key: &str) -> RepoResult<Option<Event>> {
        let updated: Option<Event> = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    confirmed_guests = confirmed_guests[WHERE id != $key AND email != $key],
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("key", key.to_string()))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        Ok(updated)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> RepoResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| super::RepoError::Database(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_clause_combines_filters() {
        assert_eq!(EventFilter::default().where_clause(), "");

        let filter = EventFilter {
            status: Some(EventStatus::Confirmed),
            date_from: NaiveDate::from_ymd_opt(2030, 1, 1),
            date_to: None,
            search: Some("ana".into()),
        };
        let clause = filter.where_clause();
        assert!(clause.starts_with(" WHERE status = $status AND date >= $date_from AND ("));
        assert!(clause.contains("host.email"));
        assert!(!clause.contains("$date_to"));
    }
}
