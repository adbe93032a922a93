//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use thiserror::Error;
use wildfire_core::{FailureKind, InferenceFailure};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed request body
    #[error("{0}")]
    ValidationError(String),

    /// Well-formed, but not a state or cause the app offers
    #[error("{0}")]
    UnknownInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Inference(#[from] InferenceFailure),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Inference(failure) => match failure.kind {
                FailureKind::ResolverUnavailable | FailureKind::ArtifactLoadFailure => {
                    StatusCode::SERVICE_UNAVAILABLE
                }
                FailureKind::UnknownCategory
                | FailureKind::ModelMismatch
                | FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "invalid_request",
            AppError::UnknownInput(_) => "unknown_input",
            AppError::NotFound(_) => "not_found",
            AppError::Inference(failure) => failure.kind.as_str(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match &self {
            AppError::ValidationError(msg)
            | AppError::UnknownInput(msg)
            | AppError::NotFound(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                msg.clone()
            }
            AppError::Inference(failure) => match failure.kind {
                FailureKind::ResolverUnavailable => {
                    tracing::warn!("Geocoder unavailable: {}", failure);
                    "Location service is unavailable, please try again".to_string()
                }
                FailureKind::ArtifactLoadFailure => {
                    tracing::error!("Model artifacts unavailable: {}", failure);
                    "Prediction model is not loaded".to_string()
                }
                FailureKind::UnknownCategory => {
                    tracing::error!("Reference data out of sync with model: {}", failure);
                    "Input is not supported by the loaded model".to_string()
                }
                FailureKind::ModelMismatch => {
                    tracing::error!("Model mismatch: {}", failure);
                    "Loaded model is incompatible with this service".to_string()
                }
                FailureKind::Internal => {
                    tracing::error!("Internal error: {}", failure);
                    "Internal server error".to_string()
                }
            },
        };

        let body = Json(json!({
            "error": error_message,
            "kind": self.kind(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
