//! Decision Threshold
//!
//! The model is not read with the default 0.5 boundary. The probability of the
//! "Low" class is tested against 0.97 and a value strictly above it is reported
//! as **High** risk. The label returned is the opposite of the class tested;
//! this calibration is tied to the model's class balance and must stay as is.

use serde::{Deserialize, Serialize};

use super::classifier::Probability;
use super::risk::RiskLabel;

/// Class whose probability is tested
pub const TARGET_CLASS: &str = "Low";

/// Cutoff applied to the target class probability (strict `>`)
pub const RISK_THRESHOLD: f64 = 0.97;

/// Decision rule, as reported in model status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRule {
    pub target_class: String,
    pub threshold: f64,
    pub label_above: RiskLabel,
    pub label_otherwise: RiskLabel,
}

impl Default for DecisionRule {
    fn default() -> Self {
        Self {
            target_class: TARGET_CLASS.to_string(),
            threshold: RISK_THRESHOLD,
            label_above: RiskLabel::High,
            label_otherwise: RiskLabel::Low,
        }
    }
}

/// Map the target class probability to a risk label.
///
/// The comparison runs at the probability's own precision, so a single
/// precision `0.97` from an ONNX model stays at the boundary (Low).
pub fn label_for(probability: impl Into<Probability>) -> RiskLabel {
    if probability.into().exceeds(RISK_THRESHOLD) {
        RiskLabel::High
    } else {
        RiskLabel::Low
    }
}
