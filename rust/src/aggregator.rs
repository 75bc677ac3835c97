//! Batch aggregation
//!
//! Runs every record of a batch through normalization and line synthesis,
//! in input order, and decides what a malformed record does to the batch.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, MalformedRecordError};
use crate::models::{NormalizedCase, RawCaseRecord};
use crate::normalizer::normalize;
use crate::routing::RoutingTable;
use crate::synthesizer::report_line;

/// What a malformed record does to its batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Fail the whole batch on the first malformed record
    #[default]
    AbortOnFirst,
    /// Leave the record out of the report, log it, and keep going
    SkipAndReport,
}

impl FromStr for BatchPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" | "abort_on_first" => Ok(BatchPolicy::AbortOnFirst),
            "skip" | "skip_and_report" => Ok(BatchPolicy::SkipAndReport),
            other => Err(ConfigError::InvalidValue {
                key: "BATCH_POLICY".to_string(),
                value: other.to_string(),
                reason: "expected 'abort' or 'skip'".to_string(),
            }),
        }
    }
}

/// Outcome of one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Concatenated report lines, each ending in `<br>`
    pub body: String,
    /// Normalized cases that made it into `body`, in order
    pub cases: Vec<NormalizedCase>,
    /// Records left out under [`BatchPolicy::SkipAndReport`]
    pub skipped: Vec<MalformedRecordError>,
}

impl BatchReport {
    pub fn rendered(&self) -> usize {
        self.cases.len()
    }
}

/// Normalize and render a batch.
///
/// An empty batch yields an empty body. Under [`BatchPolicy::AbortOnFirst`]
/// the first malformed record is returned as the error and no partial body
/// escapes.
pub fn build_report(
    records: Vec<RawCaseRecord>,
    routing: &RoutingTable,
    policy: BatchPolicy,
) -> Result<BatchReport, MalformedRecordError> {
    let mut report = BatchReport::default();

    for raw in records {
        match normalize(raw, routing) {
            Ok(case) => {
                report.body.push_str(&report_line(&case));
                report.cases.push(case);
            }
            Err(err) => match policy {
                BatchPolicy::AbortOnFirst => return Err(err),
                BatchPolicy::SkipAndReport => {
                    warn!(
                        case_id = %err.record_id,
                        field = %err.field,
                        "Skipping malformed case: {}",
                        err
                    );
                    report.skipped.push(err);
                }
            },
        }
    }

    debug!(
        rendered = report.rendered(),
        skipped = report.skipped.len(),
        "Batch rendered"
    );
    Ok(report)
}

/// Wrap a report body in the HTML envelope served to browsers.
pub fn render_html(body: &str) -> String {
    format!("<html>{body}</html>")
}
