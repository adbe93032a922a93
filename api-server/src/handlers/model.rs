//! Model status handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use wildfire_core::logic::features::LayoutInfo;
use wildfire_core::logic::model::{DecisionRule, EngineStats};

use crate::{AppResult, AppState};

#[derive(Serialize)]
pub struct ModelStatus {
    backend: String,
    classes: Vec<String>,
    layout: LayoutInfo,
    decision_rule: DecisionRule,
    source: String,
    loaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    engine: Option<EngineStats>,
}

/// Loaded bundle, feature layout and decision rule
pub async fn status(State(state): State<AppState>) -> AppResult<Json<ModelStatus>> {
    let bundle = state.predictor()?.bundle();
    let info = bundle.info();

    Ok(Json(ModelStatus {
        backend: info.backend.clone(),
        classes: info.classes.clone(),
        layout: info.layout.clone(),
        decision_rule: DecisionRule::default(),
        source: info.source.clone(),
        loaded_at: info.loaded_at,
        engine: bundle.classifier().stats(),
    }))
}
