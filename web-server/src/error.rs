//! HTTP error mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use case_report::ReportError;
use thiserror::Error;

/// A failed report request. The partial report is never part of the response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct AppError(#[from] pub ReportError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Error caught: {}", self.0);
        let status = self.status();
        let message = match status {
            StatusCode::SERVICE_UNAVAILABLE => "Case store unavailable",
            _ => "Case report could not be generated",
        };
        (status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use case_report::{CaseField, MalformedRecordError, SourceError};

    #[test]
    fn unavailable_store_maps_to_503() {
        let err = AppError::from(ReportError::from(SourceError::Unavailable("refused".into())));
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn malformed_record_maps_to_500() {
        let err = AppError::from(ReportError::from(MalformedRecordError::new(
            "C1",
            CaseField::Subject,
            "has no ':' separator",
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_query_failure_maps_to_500() {
        let err = AppError::from(ReportError::from(SourceError::Query(
            "permission denied for table unassigned".into(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
