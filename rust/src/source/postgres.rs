//! Postgres-backed case source.
//!
//! Every collection is a table of JSONB documents:
//!
//! ```sql
//! CREATE TABLE sfwb.unassigned (
//!     seq BIGSERIAL PRIMARY KEY,
//!     doc JSONB NOT NULL
//! );
//! ```
//!
//! Insertion order (`seq`) is the collection's natural order. All SQL is
//! runtime-checked (sqlx::query, not sqlx::query!) so no database is needed
//! at compile time.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::debug;

use super::{decode_documents, validate_identifier, CaseSource};
use crate::error::SourceError;
use crate::models::RawCaseRecord;

const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_CONNECTIONS: u32 = 20;
/// SQLSTATE undefined_table
const UNDEFINED_TABLE: &str = "42P01";

pub struct PgCaseSource {
    pool: PgPool,
    schema: String,
}

impl PgCaseSource {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Result<Self, SourceError> {
        let schema = schema.into();
        validate_identifier(&schema)?;
        Ok(Self { pool, schema })
    }

    /// Build a lazily connecting pool; nothing touches the network until the
    /// first fetch, so the server can start while the store is down.
    pub fn connect_lazy(database_url: &str, schema: impl Into<String>) -> Result<Self, SourceError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .connect_lazy(database_url)
            .map_err(unavailable)?;
        Self::new(pool, schema)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn ping(&self) -> Result<(), SourceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(unavailable)?;
        debug!("Connected successfully to case store");
        Ok(())
    }
}

#[async_trait]
impl CaseSource for PgCaseSource {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<RawCaseRecord>, SourceError> {
        validate_identifier(collection)?;
        self.ping().await?;

        let query = format!(
            r#"SELECT doc FROM "{}"."{}" ORDER BY seq"#,
            self.schema, collection
        );
        let documents = sqlx::query_scalar::<_, serde_json::Value>(&query)
            .fetch_all(&self.pool)
            .await
            .or_else(collection_fetch_error)?;

        decode_documents(collection, documents)
    }
}

fn unavailable(e: sqlx::Error) -> SourceError {
    SourceError::Unavailable(e.to_string())
}

/// A collection whose table does not exist reads as empty, like an unknown
/// collection in the other sources.
fn collection_fetch_error(e: sqlx::Error) -> Result<Vec<serde_json::Value>, SourceError> {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNDEFINED_TABLE) {
            debug!("Collection table does not exist: {}", db.message());
            return Ok(Vec::new());
        }
    }
    Err(classify_error(e))
}

/// Only failures to reach the store count as unavailable; everything else
/// the store reports back is a query failure.
fn classify_error(e: sqlx::Error) -> SourceError {
    match e {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => unavailable(e),
        other => SourceError::Query(other.to_string()),
    }
}
