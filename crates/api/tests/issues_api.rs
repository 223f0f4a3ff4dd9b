//! Integration tests for the issue ledger endpoints.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, build_seeded_app, build_test_app, get, post, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Raise an issue and return its generated id.
async fn raise(app: axum::Router, severity: &str, kind: &str) -> String {
    let response = post_json(
        app,
        "/api/v1/issues",
        json!({
            "severity": severity,
            "kind": kind,
            "instance_id": "aurora-prod-mysql-9",
            "message": "synthetic issue for testing"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Test: listing and summary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_includes_resolved_issues() {
    let app = build_seeded_app().await;
    let response = get(app, "/api/v1/issues").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();

    assert_eq!(data.len(), 3);
    assert_eq!(data[0]["status"], "active");
    assert_eq!(data[1]["status"], "active");
    assert_eq!(data[2]["status"], "resolved");
}

#[tokio::test]
async fn severity_filter_narrows_the_list() {
    let app = build_seeded_app().await;
    let response = get(app, "/api/v1/issues?severity=critical").await;

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();

    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["kind"], "api-throttle");
    assert_eq!(data[0]["kind_label"], "API Throttling");
    assert_eq!(data[0]["count"], 5);
    assert_eq!(data[0]["instance_id"], "aurora-prod-mysql-15");
}

#[tokio::test]
async fn unknown_severity_filter_is_rejected() {
    let app = build_seeded_app().await;
    let response = get(app, "/api/v1/issues?severity=catastrophic").await;

    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ARGUMENT").await;
}

#[tokio::test]
async fn summary_counts_every_issue_including_resolved() {
    let app = build_seeded_app().await;
    let response = get(app, "/api/v1/issues/summary").await;

    let json = body_json(response).await;
    assert_eq!(json["data"]["critical"], 1);
    assert_eq!(json["data"]["warning"], 1);
    assert_eq!(json["data"]["info"], 1);
    assert_eq!(json["data"]["total"], 3);
}

// ---------------------------------------------------------------------------
// Test: raising issues
// ---------------------------------------------------------------------------

#[tokio::test]
async fn raise_creates_an_active_issue_with_count_one() {
    let app = build_test_app();

    let response = post_json(
        app,
        "/api/v1/issues",
        json!({
            "severity": "warning",
            "kind": "connection-error",
            "instance_id": "aurora-prod-mysql-7",
            "message": "Connection refused by instance endpoint"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;

    assert_eq!(json["data"]["severity"], "warning");
    assert_eq!(json["data"]["kind"], "connection-error");
    assert_eq!(json["data"]["kind_label"], "Connection Error");
    assert_eq!(json["data"]["status"], "active");
    assert_eq!(json["data"]["count"], 1);
    assert!(json["data"]["id"].is_string());
}

#[tokio::test]
async fn raise_accepts_kinds_outside_the_known_set() {
    // The kind taxonomy is open: unknown identifiers are stored verbatim
    // and echoed back as their own label.
    let app = build_test_app();

    let response = post_json(
        app,
        "/api/v1/issues",
        json!({
            "severity": "info",
            "kind": "disk-pressure",
            "instance_id": "aurora-prod-mysql-7",
            "message": "Local spool directory above 80%"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["kind"], "disk-pressure");
    assert_eq!(json["data"]["kind_label"], "disk-pressure");
}

#[tokio::test]
async fn raise_with_unknown_severity_is_rejected() {
    let app = build_test_app();

    let response = post_json(
        app,
        "/api/v1/issues",
        json!({
            "severity": "fatal",
            "kind": "api-throttle",
            "instance_id": "aurora-prod-mysql-7",
            "message": "nope"
        }),
    )
    .await;

    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ARGUMENT").await;
}

// ---------------------------------------------------------------------------
// Test: resolve lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn resolve_marks_the_issue_resolved() {
    let app = build_test_app();
    let id = raise(app.clone(), "critical", "api-throttle").await;

    let response = post(app.clone(), &format!("/api/v1/issues/{id}/resolve")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "resolved");

    // Resolved issues stay in the ledger and keep counting in the summary.
    let summary = body_json(get(app, "/api/v1/issues/summary").await).await;
    assert_eq!(summary["data"]["critical"], 1);
    assert_eq!(summary["data"]["total"], 1);
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let app = build_test_app();
    let id = raise(app.clone(), "warning", "circuit-breaker").await;

    let first = post(app.clone(), &format!("/api/v1/issues/{id}/resolve")).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = post(app.clone(), &format!("/api/v1/issues/{id}/resolve")).await;
    assert_eq!(second.status(), StatusCode::OK);
    let json = body_json(second).await;
    assert_eq!(json["data"]["status"], "resolved");
}

#[tokio::test]
async fn resolve_unknown_issue_returns_404() {
    let app = build_test_app();
    let response = post(app, "/api/v1/issues/0194aaaa-0000-7000-8000-000000000000/resolve").await;

    assert_error(response, StatusCode::NOT_FOUND, "NOT_FOUND").await;
}

// ---------------------------------------------------------------------------
// Test: recurrence counting
// ---------------------------------------------------------------------------

#[tokio::test]
async fn occurrence_increments_the_count() {
    let app = build_test_app();
    let id = raise(app.clone(), "warning", "processing-delay").await;

    let response = post(app.clone(), &format!("/api/v1/issues/{id}/occurrence")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 2);

    let response = post(app, &format!("/api/v1/issues/{id}/occurrence")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["count"], 3);
}

#[tokio::test]
async fn occurrence_on_resolved_issue_returns_conflict() {
    let app = build_test_app();
    let id = raise(app.clone(), "info", "processing-delay").await;

    let response = post(app.clone(), &format!("/api/v1/issues/{id}/resolve")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post(app, &format!("/api/v1/issues/{id}/occurrence")).await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}
