//! Shared fixtures for unit tests

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;

use super::artifacts::{
    ArtifactBundle, CoordinateScaler, LabelEncoder, CAUSE_ENCODER_FILE, LOGISTIC_MODEL_FILE,
    MANIFEST_FILE, SCALER_FILE, STATE_ENCODER_FILE,
};
use super::features::{EncodedFeatureVector, FEATURE_LAYOUT};
use super::location::{Coordinates, GeocodeError, Geocoder};
use super::model::{ClassProbabilities, Classifier, ClassifierError};
use super::reference;

// ============================================================================
// CLASSIFIER
// ============================================================================

enum Behavior {
    Fixed(Vec<f64>),
    Fail(String),
    Panic,
}

/// Classifier returning canned probabilities, ignoring its input
pub struct StubClassifier {
    classes: Vec<String>,
    behavior: Behavior,
}

impl StubClassifier {
    /// Classes ["High", "Low"] with P(Low) = `p_low`
    pub fn fixed_low(p_low: f64) -> Self {
        Self {
            classes: vec!["High".to_string(), "Low".to_string()],
            behavior: Behavior::Fixed(vec![1.0 - p_low, p_low]),
        }
    }

    /// Arbitrary classes with matching probabilities
    pub fn with_classes(classes: &[&str], probabilities: &[f64]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            behavior: Behavior::Fixed(probabilities.to_vec()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behavior: Behavior::Fail(message.to_string()),
            ..Self::fixed_low(0.5)
        }
    }

    pub fn panicking() -> Self {
        Self {
            behavior: Behavior::Panic,
            ..Self::fixed_low(0.5)
        }
    }
}

impl Classifier for StubClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_probability(
        &self,
        _vector: &EncodedFeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        match &self.behavior {
            Behavior::Fixed(p) => ClassProbabilities::new(self.classes.clone(), p.clone()),
            Behavior::Fail(message) => Err(ClassifierError::Inference(message.clone())),
            Behavior::Panic => panic!("stub classifier exploded"),
        }
    }

    fn backend_name(&self) -> &str {
        "stub"
    }
}

// ============================================================================
// GEOCODER
// ============================================================================

/// Geocoder answering from a fixed table and recording every query
pub struct StubGeocoder {
    places: HashMap<String, Coordinates>,
    unavailable: bool,
    queries: Mutex<Vec<String>>,
}

impl StubGeocoder {
    pub fn new() -> Self {
        Self {
            places: HashMap::new(),
            unavailable: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with(mut self, query: &str, latitude: f64, longitude: f64) -> Self {
        self.places
            .insert(query.to_string(), Coordinates::new(latitude, longitude));
        self
    }

    /// Every lookup fails as if the service were down
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::new()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        self.queries.lock().push(query.to_string());

        if self.unavailable {
            return Err(GeocodeError::Transport("connection refused".to_string()));
        }
        Ok(self.places.get(query).copied())
    }
}

// ============================================================================
// BUNDLES
// ============================================================================

fn sorted_abbreviations() -> Vec<String> {
    let mut abbreviations: Vec<String> = reference::US_STATES
        .iter()
        .map(|s| s.abbreviation.to_string())
        .collect();
    abbreviations.sort();
    abbreviations
}

fn causes() -> Vec<String> {
    reference::FIRE_CAUSES.iter().map(|c| c.to_string()).collect()
}

fn test_scaler() -> CoordinateScaler {
    CoordinateScaler::Standard {
        mean: vec![37.0, -95.0],
        scale: vec![5.0, 15.0],
    }
}

/// Encoders fitted on every reference state and cause
pub fn fitted_bundle(classifier: impl Classifier + 'static) -> ArtifactBundle {
    ArtifactBundle::new(
        Box::new(classifier),
        Box::new(LabelEncoder::new(sorted_abbreviations()).unwrap()),
        Box::new(LabelEncoder::new(causes()).unwrap()),
        Box::new(test_scaler()),
    )
}

/// State encoder fitted on `states` only
pub fn bundle_with_states(states: &[&str], classifier: impl Classifier + 'static) -> ArtifactBundle {
    ArtifactBundle::new(
        Box::new(classifier),
        Box::new(LabelEncoder::new(states.iter().map(|s| s.to_string()).collect()).unwrap()),
        Box::new(LabelEncoder::new(causes()).unwrap()),
        Box::new(test_scaler()),
    )
}

/// Write a complete logistic-backend artifact directory
pub fn write_logistic_artifacts(dir: &Path) {
    let write = |file: &str, value: serde_json::Value| {
        std::fs::write(dir.join(file), serde_json::to_string_pretty(&value).unwrap()).unwrap();
    };

    write(
        MANIFEST_FILE,
        serde_json::json!({
            "backend": "logistic",
            "classes": ["High", "Low"],
            "feature_names": FEATURE_LAYOUT,
        }),
    );
    write(
        LOGISTIC_MODEL_FILE,
        serde_json::json!({ "coef": [0.01, -0.8, 0.6, 0.05], "intercept": 2.5 }),
    );
    write(SCALER_FILE, serde_json::to_value(test_scaler()).unwrap());
    write(STATE_ENCODER_FILE, serde_json::json!({ "classes": sorted_abbreviations() }));
    write(CAUSE_ENCODER_FILE, serde_json::json!({ "classes": causes() }));
}
