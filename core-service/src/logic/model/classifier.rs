//! Classifier capability
//!
//! Backends (ONNX, logistic, test stubs) only have to produce a probability
//! per known class; the threshold logic lives above them.

use serde::Serialize;
use thiserror::Error;

use super::inference::EngineStats;
use crate::logic::features::EncodedFeatureVector;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClassifierError {
    /// The classifier does not know the class the decision rule tests.
    /// The bundle is incompatible with this pipeline.
    #[error("classifier has no class '{class}' (classes: {available:?})")]
    MissingClass { class: String, available: Vec<String> },

    #[error("classifier returned {actual} probabilities for {expected} classes")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("classifier returned invalid probability {value} for class '{class}'")]
    InvalidProbability { class: String, value: f64 },

    #[error("inference failed: {0}")]
    Inference(String),
}

// ============================================================================
// CLASS PROBABILITIES
// ============================================================================

/// float32 model outputs can overshoot [0, 1] by rounding
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// A probability at the precision its backend produced it.
///
/// Threshold tests run at this precision: an `f32` output of `0.97` compares
/// equal to the cutoff rather than to its widened `f64` value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Probability {
    Double(f64),
    Single(f32),
}

impl Probability {
    pub fn value(&self) -> f64 {
        match *self {
            Probability::Double(p) => p,
            Probability::Single(p) => p as f64,
        }
    }

    /// Strict `>` against `threshold`, narrowed to this probability's precision
    pub fn exceeds(&self, threshold: f64) -> bool {
        match *self {
            Probability::Double(p) => p > threshold,
            Probability::Single(p) => p > threshold as f32,
        }
    }
}

impl From<f64> for Probability {
    fn from(p: f64) -> Self {
        Probability::Double(p)
    }
}

impl From<f32> for Probability {
    fn from(p: f32) -> Self {
        Probability::Single(p)
    }
}

impl std::fmt::Display for Probability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Probability::Double(p) => write!(f, "{:.4}", p),
            Probability::Single(p) => write!(f, "{:.4}", p),
        }
    }
}

/// Probability distribution over the classifier's ordered classes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProbabilities {
    classes: Vec<String>,
    probabilities: Vec<Probability>,
}

impl ClassProbabilities {
    pub fn new(classes: Vec<String>, probabilities: Vec<f64>) -> Result<Self, ClassifierError> {
        Self::from_values(classes, probabilities.into_iter().map(Probability::from).collect())
    }

    /// Single-precision outputs, kept at single precision
    pub fn from_f32(classes: Vec<String>, probabilities: Vec<f32>) -> Result<Self, ClassifierError> {
        Self::from_values(classes, probabilities.into_iter().map(Probability::from).collect())
    }

    fn from_values(
        classes: Vec<String>,
        probabilities: Vec<Probability>,
    ) -> Result<Self, ClassifierError> {
        if classes.len() != probabilities.len() {
            return Err(ClassifierError::ShapeMismatch {
                expected: classes.len(),
                actual: probabilities.len(),
            });
        }

        for (class, probability) in classes.iter().zip(probabilities.iter()) {
            let value = probability.value();
            if !value.is_finite()
                || value < -PROBABILITY_TOLERANCE
                || value > 1.0 + PROBABILITY_TOLERANCE
            {
                return Err(ClassifierError::InvalidProbability {
                    class: class.clone(),
                    value,
                });
            }
        }

        Ok(Self { classes, probabilities })
    }

    pub fn probability_of(&self, label: &str) -> Option<Probability> {
        self.classes
            .iter()
            .position(|c| c == label)
            .map(|i| self.probabilities[i])
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Trait for classifier backends
pub trait Classifier: Send + Sync {
    /// Fixed, ordered class labels
    fn classes(&self) -> &[String];

    /// Class-probability distribution for one vector
    fn predict_probability(
        &self,
        vector: &EncodedFeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError>;

    /// Backend identifier for status output
    fn backend_name(&self) -> &str;

    /// Runtime statistics, for backends that track them
    fn stats(&self) -> Option<EngineStats> {
        None
    }

    /// Probability of one class. Fails before running the model when the
    /// class is unknown.
    fn probability_of(
        &self,
        label: &str,
        vector: &EncodedFeatureVector,
    ) -> Result<Probability, ClassifierError> {
        ensure_class(self.classes(), label)?;

        let distribution = self.predict_probability(vector)?;
        distribution
            .probability_of(label)
            .ok_or_else(|| ClassifierError::MissingClass {
                class: label.to_string(),
                available: distribution.classes().to_vec(),
            })
    }
}

/// Check that `label` is one of `classes`
pub fn ensure_class(classes: &[String], label: &str) -> Result<(), ClassifierError> {
    if classes.iter().any(|c| c == label) {
        Ok(())
    } else {
        Err(ClassifierError::MissingClass {
            class: label.to_string(),
            available: classes.to_vec(),
        })
    }
}
