//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use validator::Validate;
use wildfire_core::logic::model::RiskLabel;
use wildfire_core::logic::reference;
use wildfire_core::{
    FailureKind, InferenceFailure, InferenceStage, PredictionOutcome, RawRequest,
};

use crate::{AppError, AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(length(min = 1, max = 64, message = "state is required"))]
    pub state: String,

    /// Optional; blank means "anywhere in the state"
    #[serde(default)]
    #[validate(length(max = 128, message = "city is too long"))]
    pub city: String,

    #[validate(length(min = 1, max = 64, message = "cause is required"))]
    pub cause: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PredictResponse {
    Predicted {
        risk_label: RiskLabel,
        risk_text: &'static str,
        message: String,
        latitude: f64,
        longitude: f64,
        query: String,
    },
    LocationNotFound {
        message: String,
        query: String,
    },
}

impl From<PredictionOutcome> for PredictResponse {
    fn from(outcome: PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Predicted(result) => {
                let risk_text = result.risk_label.friendly_text();
                PredictResponse::Predicted {
                    risk_label: result.risk_label,
                    risk_text,
                    message: format!("Prediction for {}: {}", result.query, risk_text),
                    latitude: result.coordinates.latitude,
                    longitude: result.coordinates.longitude,
                    query: result.query,
                }
            }
            PredictionOutcome::LocationNotFound { query } => PredictResponse::LocationNotFound {
                message: "Location not found. Try a more specific city.".to_string(),
                query,
            },
        }
    }
}

/// Predict wildfire risk for one location and cause
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    // Malformed bodies get the same error shape as every other rejection
    let Json(req) = payload?;
    req.validate()?;

    // Only what the form offers; anything else is a client error, not a
    // model failure
    if reference::find_state(&req.state).is_none() {
        return Err(AppError::UnknownInput(format!("Unknown state '{}'", req.state)));
    }
    if !reference::is_known_cause(&req.cause) {
        return Err(AppError::UnknownInput(format!("Unknown fire cause '{}'", req.cause)));
    }

    let predictor = state.predictor()?.clone();
    let request = RawRequest::new(req.state, req.city, req.cause);

    let outcome = tokio::task::spawn_blocking(move || predictor.predict(&request))
        .await
        .map_err(|e| {
            InferenceFailure::new(FailureKind::Internal, InferenceStage::Start, e.to_string())
        })??;

    Ok(Json(outcome.into()))
}
