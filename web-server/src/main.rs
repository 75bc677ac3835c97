//! Case Report Web Server
//!
//! Reads config from env vars (a `.env` file is honoured):
//!   DATABASE_URL         Postgres connection string
//!   CASE_DB_SCHEMA       schema holding the case collections (default: sfwb)
//!   CASE_COLLECTION      collection to report on (default: unassigned)
//!   CASE_JSON_DIR        serve collections from JSON files instead of Postgres
//!   ROUTING_TABLE_PATH   YAML routing table replacing the built-in one
//!   BATCH_POLICY         abort | skip (default: abort)
//!   HTTP_PORT            listen port (default: 3000)
//!   APP_ENV, LOG_LEVEL, LOG_DIR  logging

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use case_report::source::{CaseSource, JsonFileCaseSource, PgCaseSource};
use case_report::{CaseReportService, ReportConfig};
use case_report_web_server::{build_router, logging, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ReportConfig::from_env()?;
    logging::init(&config)?;

    let routing = config.load_routing_table()?;
    info!("Loaded routing table with {} entries", routing.len());

    let source: Arc<dyn CaseSource> = match &config.json_dir {
        Some(dir) => {
            info!("Reading case collections from {}", dir.display());
            Arc::new(JsonFileCaseSource::new(dir))
        }
        None => {
            info!("Using case store schema \"{}\"", config.schema);
            Arc::new(PgCaseSource::connect_lazy(&config.database_url, &config.schema)?)
        }
    };

    let reports = CaseReportService::new(source, routing, &config.collection)
        .with_policy(config.batch_policy);
    let app = build_router(AppState::new(reports));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!("Server started on port {}.", config.http_port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
