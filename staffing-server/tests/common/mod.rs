//! Test harness: in-memory database, full router, JSON helpers

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Days;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use staffing_server::core::{Config, ServerState, build_app};
use staffing_server::db::DbService;
use staffing_server::utils::time::today;

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = DbService::memory().await.expect("in-memory database");
        let state = ServerState::new(Config::default(), db.db);
        Self {
            app: build_app(&state),
            state,
        }
    }

    /// Send a request; returns status and parsed JSON body (`Null` when empty)
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    /// Send a raw, possibly malformed, JSON body without a token
    pub async fn send_raw(&self, method: &str, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("GET", uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, Some(token), None).await
    }

    /// Register a fresh user and return its token
    pub async fn token(&self) -> String {
        let (status, body) = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(json!({
                    "first_name": "Maria",
                    "email": "maria@example.com",
                    "password": "secret1"
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["token"].as_str().unwrap().to_string()
    }

    /// Create an event and return its id
    pub async fn event(&self, token: &str, title: &str) -> String {
        let (status, body) = self.post("/api/events", token, event_body(title)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    /// Create an employee and return its id
    pub async fn employee(&self, token: &str, first_name: &str, phone: &str) -> String {
        let (status, body) = self
            .post(
                "/api/employees",
                token,
                json!({ "first_name": first_name, "phone": phone }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    pub async fn assign(&self, token: &str, event: &str, employee: &str, amount: f64) -> (StatusCode, Value) {
        self.post(
            &assignment_uri(event, employee),
            token,
            json!({ "amount_paid": amount }),
        )
        .await
    }
}

pub fn assignment_uri(event: &str, employee: &str) -> String {
    format!("/api/assignments/event/{event}/employee/{employee}")
}

pub fn tomorrow() -> String {
    (today() + Days::new(1)).format("%Y-%m-%d").to_string()
}

/// Valid event payload: tomorrow 10:00-12:00, payment 100/0
pub fn event_body(title: &str) -> Value {
    json!({
        "date": tomorrow(),
        "start_time": "10:00",
        "end_time": "12:00",
        "host": {
            "first_name": "Lucia",
            "last_name": "Perez",
            "email": "lucia@example.com",
            "phone": "5550001111"
        },
        "payment": { "total_price": 100, "advanced_payment": 0 },
        "invitation": { "title": title }
    })
}
