use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use boostmax_catalog::CatalogError;
use boostmax_core::CoreError;
use boostmax_order::LedgerError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError { code: &'static str, message: String },
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, error_message) = match self {
            AppError::ValidationError { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL", "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => AppError::ValidationError {
                code: e.code(),
                message: e.to_string(),
            },
            CoreError::Catalog(e @ CatalogError::NotFound(_)) => AppError::NotFoundError(e.to_string()),
            CoreError::Ledger(e @ LedgerError::NotFound(_)) => AppError::NotFoundError(e.to_string()),
            CoreError::Ledger(e @ LedgerError::DuplicateId(_)) => AppError::ConflictError(e.to_string()),
            other => AppError::InternalServerError(other.to_string()),
        }
    }
}
