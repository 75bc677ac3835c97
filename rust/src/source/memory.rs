use std::collections::HashMap;

use async_trait::async_trait;

use super::CaseSource;
use crate::error::SourceError;
use crate::models::RawCaseRecord;

/// Case source backed by in-process collections.
///
/// A collection that was never inserted reads as empty.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseSource {
    collections: HashMap<String, Vec<RawCaseRecord>>,
    unavailable: bool,
}

impl InMemoryCaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(
        mut self,
        name: impl Into<String>,
        records: Vec<RawCaseRecord>,
    ) -> Self {
        self.collections.insert(name.into(), records);
        self
    }

    /// A source whose every fetch fails with [`SourceError::Unavailable`]
    pub fn unavailable() -> Self {
        Self {
            collections: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl CaseSource for InMemoryCaseSource {
    async fn fetch_all(&self, collection: &str) -> Result<Vec<RawCaseRecord>, SourceError> {
        if self.unavailable {
            return Err(SourceError::Unavailable(
                "in-memory source marked unavailable".to_string(),
            ));
        }
        Ok(self.collections.get(collection).cloned().unwrap_or_default())
    }
}
