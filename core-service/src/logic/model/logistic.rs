//! Logistic regression backend
//!
//! Pure-Rust alternative to the ONNX engine for binary models exported as
//! coefficients: `{"coef": [w0, w1, w2, w3], "intercept": b}`.
//! As in scikit-learn, the positive score belongs to the second class.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::{ClassProbabilities, Classifier, ClassifierError};
use crate::logic::artifacts::{read_json, ArtifactError};
use crate::logic::features::{EncodedFeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LogisticFile {
    coef: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    classes: Vec<String>,
    coef: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LogisticClassifier {
    pub fn new(
        classes: Vec<String>,
        coef: [f64; FEATURE_COUNT],
        intercept: f64,
    ) -> Result<Self, String> {
        if classes.len() != 2 {
            return Err(format!(
                "logistic backend is binary, got {} classes",
                classes.len()
            ));
        }
        if coef.iter().any(|w| !w.is_finite()) || !intercept.is_finite() {
            return Err("coefficients must be finite".to_string());
        }

        Ok(Self { classes, coef, intercept })
    }

    pub fn from_json_file(path: &Path, classes: Vec<String>) -> Result<Self, ArtifactError> {
        let file: LogisticFile = read_json(path)?;
        let invalid = |message: String| ArtifactError::Invalid {
            artifact: path.display().to_string(),
            message,
        };

        let coef: [f64; FEATURE_COUNT] = file.coef.try_into().map_err(|c: Vec<f64>| {
            invalid(format!("expected {} coefficients, got {}", FEATURE_COUNT, c.len()))
        })?;

        Self::new(classes, coef, file.intercept).map_err(invalid)
    }

    fn decision_function(&self, vector: &EncodedFeatureVector) -> f64 {
        let x = vector.to_f64_array();
        self.coef.iter().zip(x.iter()).map(|(w, v)| w * v).sum::<f64>() + self.intercept
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

impl Classifier for LogisticClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_probability(
        &self,
        vector: &EncodedFeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        let positive = sigmoid(self.decision_function(vector));
        ClassProbabilities::new(self.classes.clone(), vec![1.0 - positive, positive])
    }

    fn backend_name(&self) -> &str {
        "logistic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn classes() -> Vec<String> {
        vec!["High".to_string(), "Low".to_string()]
    }

    #[test]
    fn test_zero_weights_split_evenly() {
        let model = LogisticClassifier::new(classes(), [0.0; FEATURE_COUNT], 0.0).unwrap();
        let dist = model
            .predict_probability(&EncodedFeatureVector::new(3, 0.1, 0.2, 4))
            .unwrap();
        assert!((dist.probability_of("Low").unwrap().value() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_positive_score_goes_to_second_class() {
        let model = LogisticClassifier::new(classes(), [0.0; FEATURE_COUNT], 5.0).unwrap();
        let p_low = model
            .probability_of("Low", &EncodedFeatureVector::new(0, 0.0, 0.0, 0))
            .unwrap()
            .value();
        assert!(p_low > 0.99);
    }

    #[test]
    fn test_uses_layout_order() {
        // Only the cause weight is non-zero
        let model = LogisticClassifier::new(classes(), [0.0, 0.0, 0.0, 1.0], 0.0).unwrap();
        let vector = EncodedFeatureVector::new(0, 0.0, 0.0, 2);
        let expected = sigmoid(2.0);
        let p_low = model.probability_of("Low", &vector).unwrap().value();
        assert!((p_low - expected).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_binary() {
        let three = vec!["High".to_string(), "Low".to_string(), "Medium".to_string()];
        assert!(LogisticClassifier::new(three, [0.0; FEATURE_COUNT], 0.0).is_err());
    }

    #[test]
    fn test_from_json_file_wrong_coef_count() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"coef": [0.1, 0.2], "intercept": 0.0}}"#).unwrap();

        let err = LogisticClassifier::from_json_file(file.path(), classes()).unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
    }
}
