//! Inference Engine - ONNX Runtime Integration
//!
//! Runs the exported wildfire classifier. The model is expected as a
//! scikit-learn → ONNX export with a float input of shape `[N, 4]` and a
//! probability tensor of shape `[N, n_classes]` (exported without ZipMap).

use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::classifier::{ClassProbabilities, Classifier, ClassifierError};
use crate::logic::artifacts::ArtifactError;
use crate::logic::features::{EncodedFeatureVector, FEATURE_COUNT};

/// Probability output name produced by skl2onnx
pub const DEFAULT_PROBABILITY_OUTPUT: &str = "output_probability";

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Engine statistics for status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub model_path: String,
    pub probability_output: String,
    pub avg_latency_ms: f32,
    pub inference_count: u64,
}

// ============================================================================
// ONNX CLASSIFIER
// ============================================================================

pub struct OnnxClassifier {
    /// `Session::run` needs exclusive access
    session: Mutex<Session>,
    classes: Vec<String>,
    probability_output: String,
    model_path: String,
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(
        model_path: &Path,
        classes: Vec<String>,
        probability_output: Option<String>,
    ) -> Result<Self, ArtifactError> {
        let display = model_path.display().to_string();
        log::info!("Loading ONNX model from: {}", display);

        if !model_path.exists() {
            return Err(ArtifactError::Missing { path: display });
        }

        let model_error = |message: String| ArtifactError::Model {
            path: display.clone(),
            message,
        };

        let session = Session::builder()
            .map_err(|e| model_error(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| model_error(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| model_error(format!("Failed to load model: {}", e)))?;

        let probability_output =
            probability_output.unwrap_or_else(|| DEFAULT_PROBABILITY_OUTPUT.to_string());

        if !session.outputs().iter().any(|o| o.name() == probability_output) {
            let available: Vec<&str> = session.outputs().iter().map(|o| o.name()).collect();
            return Err(ArtifactError::Model {
                path: display,
                message: format!(
                    "model has no output '{}' (outputs: {:?})",
                    probability_output, available
                ),
            });
        }

        log::info!("ONNX model loaded successfully ({} classes)", classes.len());

        Ok(Self {
            session: Mutex::new(session),
            classes,
            probability_output,
            model_path: display,
            latency_sum_us: AtomicU64::new(0),
            inference_count: AtomicU64::new(0),
        })
    }

    pub fn engine_stats(&self) -> EngineStats {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 { (sum as f32 / count as f32) / 1000.0 } else { 0.0 };

        EngineStats {
            model_path: self.model_path.clone(),
            probability_output: self.probability_output.clone(),
            avg_latency_ms: avg,
            inference_count: count,
        }
    }

    fn run(&self, vector: &EncodedFeatureVector) -> Result<ClassProbabilities, ClassifierError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), vector.to_array().to_vec())
            .map_err(|e| ClassifierError::Inference(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| ClassifierError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| ClassifierError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs.get(self.probability_output.as_str()).ok_or_else(|| {
            ClassifierError::Inference(format!("No output '{}'", self.probability_output))
        })?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("Extract error: {}", e)))?;

        probabilities_from_output(&self.classes, data)
    }
}

/// Probability row of a single-input run, kept at the tensor's f32 precision
pub(crate) fn probabilities_from_output(
    classes: &[String],
    data: &[f32],
) -> Result<ClassProbabilities, ClassifierError> {
    // One input row → exactly one probability per class
    if data.len() != classes.len() {
        return Err(ClassifierError::ShapeMismatch {
            expected: classes.len(),
            actual: data.len(),
        });
    }

    ClassProbabilities::from_f32(classes.to_vec(), data.to_vec())
}

impl Classifier for OnnxClassifier {
    fn classes(&self) -> &[String] {
        &self.classes
    }

    fn predict_probability(
        &self,
        vector: &EncodedFeatureVector,
    ) -> Result<ClassProbabilities, ClassifierError> {
        let start_time = std::time::Instant::now();

        let probabilities = self.run(vector)?;

        self.latency_sum_us
            .fetch_add(start_time.elapsed().as_micros() as u64, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);

        Ok(probabilities)
    }

    fn backend_name(&self) -> &str {
        "onnx"
    }

    fn stats(&self) -> Option<EngineStats> {
        Some(self.engine_stats())
    }
}
