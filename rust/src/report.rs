//! Report service
//!
//! Ties a [`CaseSource`] to the static routing table and batch policy. One
//! call to [`CaseReportService::generate`] is one request's worth of work;
//! nothing is cached between calls.

use std::sync::Arc;

use tracing::debug;

use crate::aggregator::{build_report, BatchPolicy, BatchReport};
use crate::error::Result;
use crate::routing::RoutingTable;
use crate::source::CaseSource;

#[derive(Clone)]
pub struct CaseReportService {
    source: Arc<dyn CaseSource>,
    routing: Arc<RoutingTable>,
    collection: String,
    policy: BatchPolicy,
}

impl CaseReportService {
    pub fn new(
        source: Arc<dyn CaseSource>,
        routing: RoutingTable,
        collection: impl Into<String>,
    ) -> Self {
        Self {
            source,
            routing: Arc::new(routing),
            collection: collection.into(),
            policy: BatchPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: BatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    pub fn routing(&self) -> &RoutingTable {
        &self.routing
    }

    /// Fetch the whole collection and render it.
    pub async fn generate(&self) -> Result<BatchReport> {
        let records = self.source.fetch_all(&self.collection).await?;
        if records.is_empty() {
            debug!("No documents found!");
        }
        debug!(
            collection = %self.collection,
            count = records.len(),
            "Fetched case records"
        );
        let report = build_report(records, &self.routing, self.policy)?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ReportError, SourceError};
    use crate::models::RawCaseRecord;
    use crate::source::InMemoryCaseSource;

    fn record(id: &str, severity: &str) -> RawCaseRecord {
        RawCaseRecord {
            id: id.into(),
            severity: severity.into(),
            product: "<i>SBM</i>".into(),
            subject: "SBM: slow".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn generates_from_configured_collection() {
        let source = InMemoryCaseSource::new()
            .with_collection("unassigned", vec![record("C1", "2 - High")])
            .with_collection("assigned", vec![record("C9", "2 - High")]);
        let service = CaseReportService::new(Arc::new(source), RoutingTable::builtin(), "unassigned");

        let report = service.generate().await.unwrap();
        assert_eq!(report.rendered(), 1);
        assert!(report.body.contains("|C1|SBM|High|"));
    }

    #[tokio::test]
    async fn source_failure_propagates() {
        let service = CaseReportService::new(
            Arc::new(InMemoryCaseSource::unavailable()),
            RoutingTable::builtin(),
            "unassigned",
        );
        let err = service.generate().await.unwrap_err();
        assert!(matches!(err, ReportError::Source(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn malformed_record_aborts_by_default() {
        let source = InMemoryCaseSource::new()
            .with_collection("unassigned", vec![record("C1", "2 - High"), record("C2", "High")]);
        let service = CaseReportService::new(Arc::new(source), RoutingTable::builtin(), "unassigned");

        let err = service.generate().await.unwrap_err();
        assert!(matches!(err, ReportError::Malformed(ref e) if e.record_id == "C2"));
    }

    #[tokio::test]
    async fn skip_policy_reports_malformed_records() {
        let source = InMemoryCaseSource::new()
            .with_collection("unassigned", vec![record("C1", "2 - High"), record("C2", "High")]);
        let service = CaseReportService::new(Arc::new(source), RoutingTable::builtin(), "unassigned")
            .with_policy(BatchPolicy::SkipAndReport);

        let report = service.generate().await.unwrap();
        assert_eq!(report.rendered(), 1);
        assert_eq!(report.skipped.len(), 1);
    }
}
