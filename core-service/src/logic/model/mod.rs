//! Model Module - Risk Classifier
//!
//! Backends produce class probabilities; `classify` turns them into a
//! `RiskLabel` with the fixed decision rule from `threshold`.

pub mod classifier;
pub mod inference;
pub mod logistic;
pub mod risk;
pub mod threshold;

// Re-export common types
pub use classifier::{ClassProbabilities, Classifier, ClassifierError, Probability};
pub use inference::{EngineStats, OnnxClassifier};
pub use logistic::LogisticClassifier;
pub use risk::RiskLabel;
pub use threshold::{DecisionRule, TARGET_CLASS, RISK_THRESHOLD};

use crate::logic::artifacts::ArtifactBundle;
use crate::logic::features::EncodedFeatureVector;

/// Classify one encoded vector.
///
/// A classifier without a "Low" class is a configuration mismatch and fails
/// with `ClassifierError::MissingClass`; there is no fallback label.
pub fn classify(
    vector: &EncodedFeatureVector,
    bundle: &ArtifactBundle,
) -> Result<RiskLabel, ClassifierError> {
    let probability = bundle.classifier().probability_of(TARGET_CLASS, vector)?;
    let label = threshold::label_for(probability);

    log::debug!(
        "P({}) = {} (threshold {}) → {}",
        TARGET_CLASS,
        probability,
        RISK_THRESHOLD,
        label
    );

    Ok(label)
}
