// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Route tests driven through the router with `tower::ServiceExt::oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod route_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use campus_complaints_persistence::Persistence;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};

/// Helper to create a router over a fresh in-memory database.
pub fn create_test_app() -> Router {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    build_router(AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    })
}

/// Sends a request and returns the status and decoded JSON body.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

pub fn admin_get(uri: &str, role: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-actor-id", "admin-1")
        .header("x-actor-role", role)
        .body(Body::empty())
        .unwrap()
}

pub fn admin_post(uri: &str, role: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-actor-id", "admin-1")
        .header("x-actor-role", role)
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn student_get(uri: &str, student_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(student_id) = student_id {
        builder = builder.header("x-student-id", student_id);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn submission_body(enrollment_number: &str, complaint_type: &str) -> Value {
    serde_json::json!({
        "student_name": "Priya Sharma",
        "enrollment_number": enrollment_number,
        "residence": { "kind": "hosteller", "house_name": "House A", "room_number": "101" },
        "complaint_type": complaint_type,
        "description": "Water supply cut off since Monday"
    })
}

pub fn submit_request(student_id: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/complaints")
        .header("content-type", "application/json");
    if let Some(student_id) = student_id {
        builder = builder.header("x-student-id", student_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Files a complaint and returns its display id.
pub async fn file(app: &Router, enrollment_number: &str, complaint_type: &str) -> String {
    let (status, body) = send(
        app,
        submit_request(
            Some("stu-001"),
            &submission_body(enrollment_number, complaint_type),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}
