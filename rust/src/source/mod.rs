//! Case sources
//!
//! A case source returns every document of a named collection, in the
//! store's natural order, as [`RawCaseRecord`]s. No filtering or paging.

mod json_file;
mod memory;
#[cfg(feature = "database")]
mod postgres;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::models::RawCaseRecord;

pub use json_file::JsonFileCaseSource;
pub use memory::InMemoryCaseSource;
#[cfg(feature = "database")]
pub use postgres::PgCaseSource;

/// Collection holding cases nobody has picked up yet
pub const UNASSIGNED_COLLECTION: &str = "unassigned";

#[async_trait]
pub trait CaseSource: Send + Sync {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<RawCaseRecord>, SourceError>;
}

/// Collection and schema names end up in SQL and file paths, so only plain
/// identifiers are accepted.
pub fn validate_identifier(name: &str) -> Result<(), SourceError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SourceError::InvalidCollection(name.to_string()))
    }
}

/// Decode store documents, reporting the position of the first bad one.
pub(crate) fn decode_documents(
    collection: &str,
    documents: Vec<serde_json::Value>,
) -> Result<Vec<RawCaseRecord>, SourceError> {
    documents
        .into_iter()
        .enumerate()
        .map(|(position, doc)| {
            serde_json::from_value(doc).map_err(|e| SourceError::InvalidDocument {
                collection: collection.to_string(),
                position,
                reason: e.to_string(),
            })
        })
        .collect()
}
