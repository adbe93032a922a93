//! Inference Orchestrator
//!
//! One request in, one outcome out:
//!
//! ```text
//! Start → Resolving → Encoding → Classifying → Done
//!             │           │           │
//!             └───────────┴───────────┴──→ Failed(kind)
//! ```
//!
//! "Location not found" ends the run early but is not a failure. Nothing is
//! retried; a panic anywhere in the pipeline is reported as an `Internal`
//! failure instead of unwinding into the caller.

use std::any::Any;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::artifacts::{self, ArtifactBundle, ArtifactError};
use super::features::{self, EncodeError};
use super::location::{self, Coordinates, GeocodeError, LocationResolver, NominatimGeocoder};
use super::model::{self, ClassifierError, RiskLabel};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// One user submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRequest {
    pub state: String,
    #[serde(default)]
    pub city: String,
    pub cause: String,
}

impl RawRequest {
    pub fn new(state: impl Into<String>, city: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            city: city.into(),
            cause: cause.into(),
        }
    }
}

/// What presentation needs to show a result and a map marker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub risk_label: RiskLabel,
    pub coordinates: Coordinates,
    /// Query the location was resolved from
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PredictionOutcome {
    Predicted(PredictionResult),
    /// Valid request, the geocoder knows no such place
    LocationNotFound { query: String },
}

// ============================================================================
// FAILURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InferenceStage {
    Start,
    Resolving,
    Encoding,
    Classifying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Geocoder unreachable or erroring; the user may try again
    ResolverUnavailable,
    /// Reference data and fitted encoders disagree
    UnknownCategory,
    /// Artifacts could not be loaded; nothing can be predicted
    ArtifactLoadFailure,
    /// Classifier contract broken (e.g. no "Low" class)
    ModelMismatch,
    /// Anything unexpected, including panics
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::ResolverUnavailable => "resolver_unavailable",
            FailureKind::UnknownCategory => "unknown_category",
            FailureKind::ArtifactLoadFailure => "artifact_load_failure",
            FailureKind::ModelMismatch => "model_mismatch",
            FailureKind::Internal => "internal",
        }
    }

    /// Whether resubmitting the same request can succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::ResolverUnavailable)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InferenceFailure {
    pub kind: FailureKind,
    pub stage: InferenceStage,
    pub message: String,
}

impl InferenceFailure {
    pub fn new(kind: FailureKind, stage: InferenceStage, message: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for InferenceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {:?}: {}", self.kind.as_str(), self.stage, self.message)
    }
}

impl std::error::Error for InferenceFailure {}

impl From<ArtifactError> for InferenceFailure {
    fn from(e: ArtifactError) -> Self {
        Self::new(FailureKind::ArtifactLoadFailure, InferenceStage::Start, e.to_string())
    }
}

impl From<GeocodeError> for InferenceFailure {
    fn from(e: GeocodeError) -> Self {
        Self::new(FailureKind::ResolverUnavailable, InferenceStage::Resolving, e.to_string())
    }
}

impl From<EncodeError> for InferenceFailure {
    fn from(e: EncodeError) -> Self {
        Self::new(FailureKind::UnknownCategory, InferenceStage::Encoding, e.to_string())
    }
}

impl From<ClassifierError> for InferenceFailure {
    fn from(e: ClassifierError) -> Self {
        let kind = match e {
            ClassifierError::Inference(_) => FailureKind::Internal,
            ClassifierError::MissingClass { .. }
            | ClassifierError::ShapeMismatch { .. }
            | ClassifierError::InvalidProbability { .. } => FailureKind::ModelMismatch,
        };
        Self::new(kind, InferenceStage::Classifying, e.to_string())
    }
}

// ============================================================================
// PREDICTOR
// ============================================================================

#[derive(Clone)]
pub struct Predictor {
    bundle: Arc<ArtifactBundle>,
    resolver: LocationResolver,
}

impl Predictor {
    pub fn new(bundle: Arc<ArtifactBundle>, resolver: LocationResolver) -> Self {
        Self { bundle, resolver }
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Run the whole pipeline for one request. Single attempt, blocking.
    pub fn predict(&self, request: &RawRequest) -> Result<PredictionOutcome, InferenceFailure> {
        let stage = Cell::new(InferenceStage::Start);

        match panic::catch_unwind(AssertUnwindSafe(|| self.run(request, &stage))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                log::error!("Prediction panicked at {:?}: {}", stage.get(), message);
                Err(InferenceFailure::new(
                    FailureKind::Internal,
                    stage.get(),
                    format!("unexpected error: {}", message),
                ))
            }
        }
    }

    fn run(
        &self,
        request: &RawRequest,
        stage: &Cell<InferenceStage>,
    ) -> Result<PredictionOutcome, InferenceFailure> {
        stage.set(InferenceStage::Resolving);
        let query = location::build_query(&request.state, &request.city);

        let coordinates = match self.resolver.resolve(&request.state, &request.city) {
            Ok(Some(coordinates)) => coordinates,
            Ok(None) => return Ok(PredictionOutcome::LocationNotFound { query }),
            Err(e) => {
                log::warn!("Geocoder unavailable for '{}': {}", query, e);
                return Err(e.into());
            }
        };

        stage.set(InferenceStage::Encoding);
        let vector = features::encode(
            &request.state,
            coordinates.latitude,
            coordinates.longitude,
            &request.cause,
            &self.bundle,
        )
        .map_err(|e| {
            log::error!("Reference data and fitted encoders disagree: {}", e);
            InferenceFailure::from(e)
        })?;
        log::debug!("Encoded features: {}", vector.to_log_entry());

        stage.set(InferenceStage::Classifying);
        let risk_label = model::classify(&vector, &self.bundle).map_err(|e| {
            log::error!("Classification failed: {}", e);
            InferenceFailure::from(e)
        })?;

        log::info!("'{}' / {} → {}", query, request.cause, risk_label);

        Ok(PredictionOutcome::Predicted(PredictionResult {
            risk_label,
            coordinates,
            query,
        }))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

// ============================================================================
// PROCESS-WIDE ENTRY POINT
// ============================================================================

/// Resolver over the environment-configured geocoder
static DEFAULT_RESOLVER: Lazy<LocationResolver> =
    Lazy::new(|| LocationResolver::new(Arc::new(NominatimGeocoder::from_env())));

/// Predict with the process-wide bundle and the configured geocoder.
///
/// The first call loads the artifacts; if that fails every call returns
/// `ArtifactLoadFailure` without reloading.
pub fn predict(request: &RawRequest) -> Result<PredictionOutcome, InferenceFailure> {
    let bundle = artifacts::get_bundle()?;
    Predictor::new(bundle, DEFAULT_RESOLVER.clone()).predict(request)
}
