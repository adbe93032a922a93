//! Reference data handlers
//!
//! Everything a client needs to build the input form.

use axum::{extract::Path, Json};
use serde::Serialize;
use wildfire_core::logic::model::RiskLabel;
use wildfire_core::logic::reference::{self, StateInfo};

use crate::{AppError, AppResult};

#[derive(Serialize)]
pub struct RiskTexts {
    high: &'static str,
    low: &'static str,
}

#[derive(Serialize)]
pub struct ReferenceResponse {
    states: &'static [StateInfo],
    causes: &'static [&'static str],
    default_cause: &'static str,
    risk_labels: RiskTexts,
}

#[derive(Serialize)]
pub struct CitiesResponse {
    state: String,
    cities: &'static [&'static str],
}

pub async fn get() -> Json<ReferenceResponse> {
    Json(ReferenceResponse {
        states: reference::US_STATES,
        causes: reference::FIRE_CAUSES,
        default_cause: reference::DEFAULT_CAUSE,
        risk_labels: RiskTexts {
            high: RiskLabel::High.friendly_text(),
            low: RiskLabel::Low.friendly_text(),
        },
    })
}

/// Suggested cities for one state, by full name
pub async fn cities(Path(state): Path<String>) -> AppResult<Json<CitiesResponse>> {
    let cities = reference::cities(&state)
        .ok_or_else(|| AppError::NotFound(format!("Unknown state '{}'", state)))?;

    Ok(Json(CitiesResponse { state, cities }))
}
