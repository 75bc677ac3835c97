//! Error types for the case report pipeline
//!
//! Each stage owns a narrow error enum; `ReportError` is the umbrella the
//! request handler maps onto an HTTP status.

use thiserror::Error;

use crate::models::CaseField;

/// A raw case record is missing the substructure a normalization rule expects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Malformed case record '{record_id}': field {field} {reason}")]
pub struct MalformedRecordError {
    pub record_id: String,
    pub field: CaseField,
    pub reason: String,
}

impl MalformedRecordError {
    pub fn new(record_id: impl Into<String>, field: CaseField, reason: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            field,
            reason: reason.into(),
        }
    }
}

/// Failures raised by a case source
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Case source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid collection name '{0}'")]
    InvalidCollection(String),

    #[error("Case source query failed: {0}")]
    Query(String),

    #[error("Document {position} in collection '{collection}' could not be decoded: {reason}")]
    InvalidDocument {
        collection: String,
        position: usize,
        reason: String,
    },
}

/// Configuration errors raised while reading the environment or the routing table
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Routing table error: {0}")]
    RoutingTable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Main error type for a report request
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ReportError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Source(SourceError::Unavailable(_)) => 503,
            Self::Source(_) => 500,
            Self::Malformed(_) => 500,
            Self::Config(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
