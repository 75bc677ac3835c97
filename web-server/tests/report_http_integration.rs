//! HTTP-level tests for the case report server.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot` over an
//! in-memory case source; no database or listener is involved.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use case_report::source::InMemoryCaseSource;
use case_report::{BatchPolicy, CaseReportService, RawCaseRecord, RoutingTable};
use case_report_web_server::{build_router, AppState};
use http_body_util::BodyExt;
use tower::ServiceExt;

fn case(id: &str, subject: &str, severity: &str) -> RawCaseRecord {
    RawCaseRecord {
        id: id.into(),
        case_origin: "Salesforce".into(),
        country: "United States of America".into(),
        severity: severity.into(),
        product: "<b>Widget</b>".into(),
        subject: subject.into(),
        log_time: "t1".into(),
        ..Default::default()
    }
}

fn app_with(records: Vec<RawCaseRecord>, policy: BatchPolicy) -> axum::Router {
    let source = InMemoryCaseSource::new().with_collection("unassigned", records);
    let reports = CaseReportService::new(Arc::new(source), RoutingTable::builtin(), "unassigned")
        .with_policy(policy);
    build_router(AppState::new(reports))
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

// ── GET / ──────────────────────────────────────────────────────

#[tokio::test]
async fn serves_report_inside_html_envelope() {
    let app = app_with(vec![case("C1", "OES: issue", "1 - Critical")], BatchPolicy::default());
    let (status, content_type, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    assert_eq!(
        body,
        "<html>t1|C1|Open Enterprise Server|Critical||SF||||||||||USA|||||||||||OES: issue<br></html>"
    );
}

#[tokio::test]
async fn empty_collection_serves_empty_envelope() {
    let (status, _, body) = get(app_with(vec![], BatchPolicy::default()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "<html></html>");
}

#[tokio::test]
async fn malformed_record_fails_without_partial_body() {
    let records = vec![
        case("C1", "OES: issue", "1 - Critical"),
        case("C2", "GW: broken", "Critical"),
    ];
    let (status, _, body) = get(app_with(records, BatchPolicy::AbortOnFirst), "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!body.contains("<html>"));
    assert!(!body.contains("C1"));
}

#[tokio::test]
async fn skip_policy_serves_remaining_lines() {
    let records = vec![
        case("C1", "OES: issue", "1 - Critical"),
        case("C2", "GW: broken", "Critical"),
    ];
    let (status, _, body) = get(app_with(records, BatchPolicy::SkipAndReport), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("|C1|"));
    assert!(!body.contains("|C2|"));
}

#[tokio::test]
async fn unavailable_store_returns_503() {
    let reports = CaseReportService::new(
        Arc::new(InMemoryCaseSource::unavailable()),
        RoutingTable::builtin(),
        "unassigned",
    );
    let app = build_router(AppState::new(reports));
    let (status, _, body) = get(app, "/").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, "Case store unavailable");
}

// ── JSON endpoints ─────────────────────────────────────────────

#[tokio::test]
async fn lists_normalized_cases_as_json() {
    let records = vec![
        case("C1", "ZEN: imaging", "2 - High"),
        case("C2", "no prefix here", "2 - High"),
    ];
    let (status, _, body) = get(app_with(records, BatchPolicy::SkipAndReport), "/api/cases").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["collection"], "unassigned");
    assert_eq!(json["data"]["cases"][0]["product"], "ZENWorks");
    assert_eq!(json["data"]["cases"][0]["caseOrigin"], "SF");
    assert_eq!(json["data"]["skipped"][0]["record_id"], "C2");
    assert_eq!(json["data"]["skipped"][0]["field"], "subject");
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (status, _, body) = get(app_with(vec![], BatchPolicy::default()), "/api/health").await;
    assert_eq!(status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["data"], "OK");
}
