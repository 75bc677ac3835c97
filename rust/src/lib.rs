//! Case report - normalization and report synthesis for support cases
//!
//! Fetches support-case documents from a case store, cleans up their field
//! values, resolves each case's product from its subject prefix, and renders
//! the batch as a pipe-delimited report embedded in an HTML page.
//!
//! ## Pipeline
//! Case Source -> Record Normalizer -> Report Line Synthesizer -> HTML body
//!
//! ## Quick Start
//!
//! ```rust
//! use case_report::aggregator::{build_report, BatchPolicy};
//! use case_report::models::RawCaseRecord;
//! use case_report::routing::RoutingTable;
//!
//! let record = RawCaseRecord {
//!     id: "C1".into(),
//!     case_origin: "Salesforce".into(),
//!     severity: "1 - Critical".into(),
//!     product: "<b>Widget</b>".into(),
//!     subject: "OES: volume offline".into(),
//!     ..Default::default()
//! };
//! let report = build_report(vec![record], &RoutingTable::builtin(), BatchPolicy::default())?;
//! assert!(report.body.starts_with("|C1|Open Enterprise Server|Critical||SF|"));
//! # Ok::<(), case_report::error::MalformedRecordError>(())
//! ```

// Core error handling
pub mod error;

// Case records
pub mod models;

// Static reference data
pub mod routing;

// Pipeline stages
pub mod aggregator;
pub mod normalizer;
pub mod synthesizer;

// Case store access
pub mod source;

pub mod config;
pub mod report;

pub use aggregator::{build_report, render_html, BatchPolicy, BatchReport};
pub use config::ReportConfig;
pub use error::{ConfigError, MalformedRecordError, ReportError, SourceError};
pub use models::{CaseField, NormalizedCase, RawCaseRecord};
pub use report::CaseReportService;
pub use routing::{RouteEntry, RoutingTable};
pub use source::CaseSource;
