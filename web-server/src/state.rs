//! Shared application state

use case_report::CaseReportService;

/// Shared application state for the report routes
#[derive(Clone)]
pub struct AppState {
    pub reports: CaseReportService,
}

impl AppState {
    pub fn new(reports: CaseReportService) -> Self {
        Self { reports }
    }
}
