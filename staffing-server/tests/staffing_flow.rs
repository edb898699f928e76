//! Events, employees and assignments through the HTTP surface

mod common;

use axum::http::StatusCode;
use common::{TestApp, assignment_uri, event_body};
use serde_json::json;
use staffing_server::db::models::{EMPLOYEE_TABLE, EVENT_TABLE, parse_record_id};
use staffing_server::db::repository::{AssignmentRepository, RepoError};
use surrealdb::RecordId;

async fn assignment_ids(t: &TestApp) -> Vec<RecordId> {
    t.state
        .get_db()
        .query("SELECT VALUE id FROM assignment")
        .await
        .unwrap()
        .take::<Vec<RecordId>>(0)
        .unwrap()
}

async fn event_refs(t: &TestApp, event: &RecordId) -> Vec<RecordId> {
    t.state
        .get_db()
        .query("SELECT assignments FROM ONLY $event")
        .bind(("event", event.clone()))
        .await
        .unwrap()
        .take::<Option<Vec<RecordId>>>((0, "assignments"))
        .unwrap()
        .unwrap_or_default()
}

#[tokio::test]
async fn test_event_employee_assignment_scenario() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let event = t.event(&token, "Party").await;
    let employee = t.employee(&token, "Ana", "5551234567").await;

    let (status, body) = t.assign(&token, &event, &employee, 20.0).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Assignment created successfully");
    assert_eq!(body["data"]["amount_paid"], 20.0);
    assert_eq!(body["data"]["event"]["id"], event.as_str());
    assert_eq!(body["data"]["employee"]["first_name"], "Ana");

    let (status, body) = t.assign(&token, &event, &employee, 20.0).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let (_, body) = t.get(&format!("/api/events/{event}"), &token).await;
    assert_eq!(body["data"]["assignments"].as_array().unwrap().len(), 1);

    let (status, _) = t.delete(&format!("/api/events/{event}"), &token).await;
    assert_eq!(status, StatusCode::OK);

    assert!(assignment_ids(&t).await.is_empty());

    let (status, _) = t.get(&format!("/api/events/{event}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Employee survives; its event list is now empty
    let (status, body) = t.get(&format!("/api/employees/{employee}/events"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_event_removes_every_assignment() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let event = t.event(&token, "Wedding").await;
    let other = t.event(&token, "Gala").await;
    let ids = [
        t.employee(&token, "Ana", "5551234567").await,
        t.employee(&token, "Luis", "5551234568").await,
        t.employee(&token, "Sofia", "5551234569").await,
    ];
    for employee in &ids {
        let (status, _) = t.assign(&token, &event, employee, 10.0).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    let (status, _) = t.assign(&token, &other, &ids[0], 5.0).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = t.delete(&format!("/api/events/{event}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Event deleted successfully");

    for employee in &ids {
        let (_, body) = t.get(&format!("/api/employees/{employee}/events"), &token).await;
        let events = body["data"].as_array().unwrap();
        assert!(events.iter().all(|e| e["id"] != event.as_str()));
    }
    let (_, body) = t.get(&format!("/api/events/{other}/employees"), &token).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // Second delete is a clean NotFound
    let (status, _) = t.delete(&format!("/api/events/{event}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_employee_removes_only_its_assignments() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let event = t.event(&token, "Party").await;
    let ana = t.employee(&token, "Ana", "5551234567").await;
    let luis = t.employee(&token, "Luis", "5551234568").await;
    t.assign(&token, &event, &ana, 20.0).await;
    t.assign(&token, &event, &luis, 30.0).await;

    let (status, body) = t.delete(&format!("/api/employees/{ana}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Employee deleted successfully");

    let (_, body) = t.get(&format!("/api/events/{event}"), &token).await;
    assert_eq!(body["data"]["assignments"].as_array().unwrap().len(), 1);

    let (_, body) = t.get(&format!("/api/events/{event}/employees"), &token).await;
    let employees = body["data"].as_array().unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0]["id"], luis.as_str());
    assert_eq!(employees[0]["assignment"]["amount_paid"], 30.0);

    let (status, _) = t.get(&format!("/api/employees/{ana}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_negative_amount_rejected_without_side_effects() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let event = t.event(&token, "Party").await;
    let employee = t.employee(&token, "Ana", "5551234567").await;

    let (status, body) = t.assign(&token, &event, &employee, -5.0).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = t.get(&format!("/api/events/{event}"), &token).await;
    assert!(body["data"]["assignments"].as_array().unwrap().is_empty());

    // Valid create, then a rejected negative update keeps the old amount
    let (status, _) = t.assign(&token, &event, &employee, 15.0).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = assignment_uri(&event, &employee);
    let (status, _) = t.put(&uri, &token, json!({ "amount_paid": -1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = t.put(&uri, &token, json!({ "amount_paid": 40 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["amount_paid"], 40.0);
}

#[tokio::test]
async fn test_assignment_ids_and_lifecycle() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let event = t.event(&token, "Party").await;
    let employee = t.employee(&token, "Ana", "5551234567").await;

    let (status, body) = t
        .post(&assignment_uri("not-an-id!", &employee), &token, json!({}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid event ID");

    let (status, _) = t
        .post(&assignment_uri(&event, "employee:missing"), &token, json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Empty body defaults the amount to zero
    let (status, body) = t
        .send("POST", &assignment_uri(&event, &employee), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["amount_paid"], 0.0);

    let (status, _) = t.delete(&assignment_uri(&event, &employee), &token).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = t.delete(&assignment_uri(&event, &employee), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = t.get(&format!("/api/events/{event}"), &token).await;
    assert!(body["data"]["assignments"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_guest_is_noop() {
    let t = TestApp::new().await;
    let token = t.token().await;
    let event = t.event(&token, "Party").await;
    let uri = format!("/api/events/{event}/guest");
    let guest = json!({ "first_name": "Eva", "last_name": "Diaz", "email": "eva@example.com" });

    let (status, body) = t.post(&uri, &token, guest.clone()).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Guest added successfully");

    let mut again = guest.clone();
    again["email"] = json!("EVA@example.com");
    let (status, body) = t.post(&uri, &token, again).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["confirmed_guests"].as_array().unwrap().len(), 1);

    let (_, body) = t.get(&format!("/api/events/{event}/guests"), &token).await;
    let guests = body["data"].as_array().unwrap();
    assert_eq!(guests.len(), 1);
    let guest_id = guests[0]["id"].as_str().unwrap().to_string();

    let (status, body) = t
        .delete(&format!("/api/events/{event}/guest/{guest_id}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["confirmed_guests"].as_array().unwrap().is_empty());

    let (status, _) = t
        .delete(&format!("/api/events/{event}/guest/eva@example.com"), &token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_advanced_payment_above_stored_total_rejected() {
    let t = TestApp::new().await;
    let token = t.token().await;
    let event = t.event(&token, "Party").await;
    let uri = format!("/api/events/{event}");

    let (status, body) = t
        .put(&uri, &token, json!({ "payment": { "advanced_payment": 150 } }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["details"].as_array().unwrap();
    assert!(details.iter().any(|d| d == "Advanced payment cannot exceed total price"));

    let (status, body) = t
        .put(&uri, &token, json!({ "payment": { "advanced_payment": 50 } }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["payment"]["advanced_payment"], 50.0);
    assert_eq!(body["data"]["payment"]["total_price"], 100.0);

    let (status, body) = t.put(&uri, &token, json!({ "status": "CONFIRMED" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "CONFIRMED");
}

#[tokio::test]
async fn test_event_validation_and_projections() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let mut bad = event_body("Party");
    bad["end_time"] = json!("09:00");
    bad["date"] = json!("2000-01-01");
    let (status, body) = t.post("/api/events", &token, bad).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d.as_str())
        .collect();
    assert_eq!(
        details,
        vec![
            "Event date cannot be in the past",
            "End time must be after start time"
        ]
    );

    let event = t.event(&token, "Party").await;
    let (status, body) = t.get(&format!("/api/events/{event}/invitations"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["invitation"]["title"], "Party");
    assert_eq!(body["data"]["event_details"]["start_time"], "10:00");
    assert_eq!(body["data"]["event_details"]["host"]["first_name"], "Lucia");

    // Bare keys are accepted in paths
    let bare = event.split_once(':').unwrap().1;
    let (status, _) = t.get(&format!("/api/events/{bare}"), &token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = t.get("/api/events/employee:abc", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_search_and_pagination() {
    let t = TestApp::new().await;
    let token = t.token().await;

    for title in ["One", "Two", "Three"] {
        t.event(&token, title).await;
    }
    let mut other_host = event_body("Four");
    other_host["host"]["first_name"] = json!("Roberto");
    let (status, _) = t.post("/api/events", &token, other_host).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = t.get("/api/events?page=1&limit=2", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["events"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pagination"]["total"], 4);
    assert_eq!(body["data"]["pagination"]["total_pages"], 2);

    let (_, body) = t.get("/api/events?search=ROBERTO", &token).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let (_, body) = t.get("/api/events?status=CONFIRMED", &token).await;
    assert_eq!(body["data"]["pagination"]["total"], 0);

    let (status, body) = t.get("/api/events?status=maybe", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0], "Invalid status");

    let (status, _) = t.get("/api/events?page=abc", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_far_page_returns_empty_list() {
    let t = TestApp::new().await;
    let token = t.token().await;
    t.event(&token, "Party").await;
    t.employee(&token, "Ana", "5551234567").await;

    let (status, body) = t
        .get("/api/employees?page=50000000&limit=100", &token)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["employees"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["pagination"]["total"], 1);
    assert_eq!(body["data"]["pagination"]["page"], 50000000);

    let (status, body) = t.get("/api/events?page=4294967295&limit=100", &token).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["data"]["events"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_employee_crud_and_phone_uniqueness() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let ana = t.employee(&token, "Ana", "5551234567").await;
    let (status, body) = t
        .post(
            "/api/employees",
            &token,
            json!({ "first_name": "Other", "phone": "5551234567" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    let luis = t.employee(&token, "Luis", "5559876543").await;
    let (status, _) = t
        .put(
            &format!("/api/employees/{luis}"),
            &token,
            json!({ "phone": "5551234567" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Same phone as before is not a conflict
    let (status, body) = t
        .put(
            &format!("/api/employees/{ana}"),
            &token,
            json!({ "first_name": "Ana Maria", "phone": "5551234567" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Ana Maria");

    let (_, body) = t.get("/api/employees?search=maria", &token).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);

    let (_, body) = t.get("/api/employees?limit=1", &token).await;
    assert_eq!(body["data"]["employees"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["pagination"]["total"], 2);

    let (status, body) = t
        .post("/api/employees", &token, json!({ "phone": "123" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["details"].as_array().unwrap().len() >= 2);
}

#[tokio::test]
async fn test_linked_create_rolls_back_when_event_vanished() {
    let t = TestApp::new().await;
    let token = t.token().await;
    let employee_raw = t.employee(&token, "Ana", "5551234567").await;
    let employee = parse_record_id(EMPLOYEE_TABLE, &employee_raw).unwrap();
    let ghost = RecordId::from_table_key(EVENT_TABLE, "ghost");

    let repo = AssignmentRepository::new(t.state.get_db());
    let err = repo.create_linked(&ghost, &employee, 1.0).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound(ref what) if what == "event"), "{err}");
    assert!(assignment_ids(&t).await.is_empty());
}

#[tokio::test]
async fn test_linked_create_rejects_second_pair_at_the_index() {
    let t = TestApp::new().await;
    let token = t.token().await;
    let event_raw = t.event(&token, "Party").await;
    let employee_raw = t.employee(&token, "Ana", "5551234567").await;
    let event = parse_record_id(EVENT_TABLE, &event_raw).unwrap();
    let employee = parse_record_id(EMPLOYEE_TABLE, &employee_raw).unwrap();

    let repo = AssignmentRepository::new(t.state.get_db());
    repo.create_linked(&event, &employee, 1.0).await.unwrap();
    let err = repo.create_linked(&event, &employee, 2.0).await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)), "{err}");

    let ids = assignment_ids(&t).await;
    assert_eq!(ids.len(), 1);
    assert_eq!(event_refs(&t, &event).await, ids);
}
