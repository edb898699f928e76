//! Registration, login and token handling through the HTTP surface

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_register_rejects_short_password() {
    let t = TestApp::new().await;

    let (status, body) = t
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "first_name": "Ana", "email": "ana@example.com", "password": "short" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    let details: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d.as_str())
        .collect();
    assert_eq!(details, vec!["Password must be at least 6 characters long"]);
}

#[tokio::test]
async fn test_register_then_login() {
    let t = TestApp::new().await;

    let (status, body) = t
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "first_name": "Ana", "email": "Ana@Example.com", "password": "sixsix" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["data"]["user"]["email"], "ana@example.com");
    assert!(body["data"]["user"].get("hash_pass").is_none());

    // Same email, different case
    let (status, _) = t
        .send(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "first_name": "Ana", "email": "ANA@example.com", "password": "sixsix" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = t
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "sixsix" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let (status, body) = t
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ana@example.com", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");

    let (status, body) = t
        .send(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "sixsix" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid email or password");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let t = TestApp::new().await;
    let token = t.token().await;

    let (status, body) = t.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "maria@example.com");
    assert!(body["data"].get("hash_pass").is_none());

    let (status, body) = t.get("/api/auth/me", "garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);

    let (status, _) = t.send("GET", "/api/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_verify_token_rejects_garbage() {
    let t = TestApp::new().await;
    let err = t
        .state
        .auth_service()
        .verify_token("not.a.token")
        .await
        .unwrap_err();
    assert_eq!(err.http_status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_is_public() {
    let t = TestApp::new().await;
    let (status, body) = t.send("GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let t = TestApp::new().await;
    let (status, body) = t.send_raw("POST", "/api/auth/login", "{\"email\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["timestamp"].is_string());
}
