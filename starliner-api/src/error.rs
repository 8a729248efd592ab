use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use starliner_booking::{GateError, SubmissionError};
use starliner_catalog::CatalogError;
use starliner_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    /// A wizard step refused to advance; every failing field is reported
    IncompleteBooking(GateError),
    /// The booking service refused or could not be reached
    UpstreamError(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                json!({ "success": false, "message": msg }),
            ),
            AppError::NotFoundError(msg) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "message": msg }),
            ),
            AppError::IncompleteBooking(err) => {
                let violations: Vec<_> = err
                    .violations
                    .iter()
                    .map(|v| json!({ "field": v.field(), "message": v.to_string() }))
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    json!({
                        "success": false,
                        "message": err.to_string(),
                        "stage": err.stage,
                        "violations": violations,
                    }),
                )
            }
            AppError::UpstreamError(msg) => {
                tracing::warn!("Booking submission failed: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    json!({ "success": false, "message": msg }),
                )
            }
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "success": false, "message": "Internal Server Error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::NotFound(msg) => AppError::NotFoundError(format!("{} not found", msg)),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::NotFoundError("Tour not found".to_string()),
            CatalogError::MissingFields | CatalogError::Duplicate(_) => {
                AppError::ValidationError(err.to_string())
            }
        }
    }
}

impl From<SubmissionError> for AppError {
    fn from(err: SubmissionError) -> Self {
        match err {
            SubmissionError::Incomplete(gate) => AppError::IncompleteBooking(gate),
            SubmissionError::NotAtPayment(_) => AppError::ValidationError(err.to_string()),
            SubmissionError::Rejected(msg) | SubmissionError::Transport(msg) => {
                AppError::UpstreamError(msg)
            }
        }
    }
}

impl From<GateError> for AppError {
    fn from(err: GateError) -> Self {
        AppError::IncompleteBooking(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Anyhow(err)
    }
}
