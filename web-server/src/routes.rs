//! Report endpoints
//!
//! `GET /` serves the pipe-delimited report inside an `<html>` envelope.
//! `GET /api/cases` runs the same pipeline and returns the normalized cases
//! as JSON.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, State},
    response::{Html, Json},
};
use case_report::{render_html, MalformedRecordError, NormalizedCase};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SkippedCase {
    pub record_id: String,
    pub field: String,
    pub reason: String,
}

impl From<MalformedRecordError> for SkippedCase {
    fn from(err: MalformedRecordError) -> Self {
        Self {
            record_id: err.record_id,
            field: err.field.to_string(),
            reason: err.reason,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CaseListing {
    pub collection: String,
    pub cases: Vec<NormalizedCase>,
    pub skipped: Vec<SkippedCase>,
}

fn log_incoming(path: &str, connect_info: Option<ConnectInfo<SocketAddr>>) {
    match connect_info {
        Some(ConnectInfo(addr)) => {
            info!("Incoming GET {} request from IP \"{}\".", path, addr.ip())
        }
        None => info!("Incoming GET {} request.", path),
    }
}

pub async fn case_report(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Result<Html<String>, AppError> {
    log_incoming("/", connect_info);

    let report = state.reports.generate().await?;
    debug!("html body: {}", report.body);

    Ok(Html(render_html(&report.body)))
}

pub async fn list_cases(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
) -> Result<Json<ApiResponse<CaseListing>>, AppError> {
    log_incoming("/api/cases", connect_info);

    let report = state.reports.generate().await?;
    let listing = CaseListing {
        collection: state.reports.collection().to_string(),
        cases: report.cases,
        skipped: report.skipped.into_iter().map(SkippedCase::from).collect(),
    };

    Ok(Json(ApiResponse {
        success: true,
        data: Some(listing),
        error: None,
    }))
}

// Health check endpoint
pub async fn health_check() -> Json<ApiResponse<String>> {
    Json(ApiResponse {
        success: true,
        data: Some("OK".to_string()),
        error: None,
    })
}
