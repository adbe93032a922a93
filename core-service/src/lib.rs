//! Wildfire Risk Predictor - Inference Core
//!
//! (state, city, cause) → High/Low wildfire risk, through a geocoder and a
//! pre-trained classifier loaded from an artifact directory.

pub mod constants;
pub mod logic;

pub use logic::predictor::{
    predict, FailureKind, InferenceFailure, InferenceStage, PredictionOutcome, PredictionResult,
    Predictor, RawRequest,
};
