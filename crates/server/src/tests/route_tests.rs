// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::json;

use super::{
    admin_get, admin_post, create_test_app, file, send, student_get, submission_body,
    submit_request,
};

#[tokio::test]
async fn test_submit_returns_created_complaint() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        submit_request(Some("stu-001"), &submission_body("en-42", "exam")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "CMPL-0001");
    assert_eq!(body["assigned_to"], "examcell");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["enrollment_number"], "EN-42");
}

#[tokio::test]
async fn test_submit_requires_student_header() {
    let app = create_test_app();
    let (status, body) = send(&app, submit_request(None, &submission_body("EN-1", "exam"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthenticated");
}

#[tokio::test]
async fn test_submit_rejects_unknown_type() {
    let app = create_test_app();
    let (status, body) = send(
        &app,
        submit_request(Some("stu-001"), &submission_body("EN-1", "parking")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InvalidInput");
}

#[tokio::test]
async fn test_escalate_then_resolve_flow() {
    let app = create_test_app();
    let id: String = file(&app, "EN-1", "hostel").await;

    let (status, body) = send(
        &app,
        admin_post(&format!("/complaints/{id}/escalate"), "Warden", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["complaint"]["assigned_to"], "registrar");
    assert_eq!(body["complaint"]["escalation_chain"], json!(["warden", "registrar"]));

    let (status, body) = send(
        &app,
        admin_post(&format!("/complaints/{id}/resolve"), "registrar", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["complaint"]["status"], "resolved");
    assert_eq!(body["complaint"]["resolved"]["by_role"], "registrar");

    let (status, body) = send(
        &app,
        admin_get(&format!("/complaints/{id}/history"), "warden"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["entries"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_escalate_with_explicit_target_and_reason() {
    let app = create_test_app();
    let id: String = file(&app, "EN-1", "academic").await;

    let (status, body) = send(
        &app,
        admin_post(
            &format!("/complaints/{id}/escalate"),
            "mentor",
            &json!({ "target_role": "Vice Chancellor", "reason": "Policy question" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["complaint"]["assigned_to"], "vc");
    assert_eq!(body["complaint"]["escalation_reason"], "Policy question");

    let (status, body) = send(
        &app,
        admin_post(&format!("/complaints/{id}/escalate"), "vc", &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "TerminalAuthority");
}

#[tokio::test]
async fn test_get_complaint_visibility() {
    let app = create_test_app();
    let id: String = file(&app, "EN-1", "hostel").await;

    let (status, _) = send(&app, admin_get(&format!("/complaints/{id}"), "warden")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, admin_get(&format!("/complaints/{id}"), "mentor")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "NotVisible");
}

#[tokio::test]
async fn test_queue_endpoints() {
    let app = create_test_app();
    let first: String = file(&app, "EN-1", "hostel").await;
    file(&app, "EN-1", "hostel").await;
    send(
        &app,
        admin_post(&format!("/complaints/{first}/escalate"), "warden", &json!({})),
    )
    .await;

    let (status, body) = send(&app, admin_get("/complaints", "warden")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complaints"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, admin_get("/complaints?status=escalated", "warden")).await;
    assert_eq!(body["complaints"][0]["id"], first);
    assert_eq!(body["complaints"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, admin_get("/complaints/pending", "warden")).await;
    assert_eq!(body["complaints"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, admin_get("/complaints/pending", "registrar")).await;
    assert_eq!(body["complaints"][0]["id"], first);

    let (_, body) = send(&app, admin_get("/complaints/escalated", "registrar")).await;
    assert_eq!(body["complaints"].as_array().unwrap().len(), 1);

    let (_, body) = send(&app, admin_get("/complaints/resolved", "registrar")).await;
    assert!(body["complaints"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, admin_get("/complaints?status=closed", "warden")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "InvalidInput");
}

#[tokio::test]
async fn test_stats_endpoints() {
    let app = create_test_app();
    let first: String = file(&app, "EN-7", "hostel").await;
    file(&app, "EN-7", "exam").await;
    send(
        &app,
        admin_post(&format!("/complaints/{first}/resolve"), "warden", &json!({})),
    )
    .await;

    let (status, body) = send(&app, admin_get("/stats", "warden")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["resolved"], 1);
    assert_eq!(body["degraded"], false);

    let (status, body) = send(&app, student_get("/students/en-7/stats", Some("stu-001"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["enrollment_number"], "EN-7");
    assert_eq!(body["total"], 2);
    assert_eq!(body["pending"], 1);
    assert_eq!(body["resolved"], 1);

    let (status, body) = send(
        &app,
        student_get("/students/EN-7/complaints?limit=1", Some("stu-001")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complaints"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_student_endpoints_require_the_filing_student() {
    let app = create_test_app();
    file(&app, "EN-7", "hostel").await;

    let (status, body) = send(&app, student_get("/students/EN-7/complaints", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthenticated");

    let (status, _) = send(&app, admin_get("/students/EN-7/stats", "warden")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        student_get("/students/EN-7/complaints", Some("stu-002")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["complaints"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, student_get("/students/EN-7/stats", Some("stu-002"))).await;
    assert_eq!(body["total"], 0);
}
