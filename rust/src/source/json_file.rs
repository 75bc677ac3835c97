use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use super::{decode_documents, validate_identifier, CaseSource};
use crate::error::SourceError;
use crate::models::RawCaseRecord;

/// Case source reading `<dir>/<collection>.json`, a JSON array of case
/// documents. Used for local runs without a database.
///
/// A collection without a file reads as empty; a missing directory means the
/// store itself is unavailable.
#[derive(Debug, Clone)]
pub struct JsonFileCaseSource {
    dir: PathBuf,
}

impl JsonFileCaseSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }
}

#[async_trait]
impl CaseSource for JsonFileCaseSource {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<RawCaseRecord>, SourceError> {
        validate_identifier(collection)?;
        let path = self.collection_path(collection);

        if !tokio::fs::try_exists(&self.dir).await.unwrap_or(false) {
            return Err(SourceError::Unavailable(format!(
                "case directory {} does not exist",
                self.dir.display()
            )));
        }

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No collection file at {}", path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(SourceError::Unavailable(format!("{}: {}", path.display(), e)));
            }
        };

        let documents: Vec<serde_json::Value> =
            serde_json::from_str(&content).map_err(|e| SourceError::InvalidDocument {
                collection: collection.to_string(),
                position: 0,
                reason: format!("collection file is not a JSON array of documents: {e}"),
            })?;

        debug!(
            "Read {} documents from {}",
            documents.len(),
            path.display()
        );
        decode_documents(collection, documents)
    }
}
