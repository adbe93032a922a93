//! Artifact Bundle - fitted model and transformers
//!
//! Loaded once per process and shared read-only afterwards. The bundle is
//! never mutated after load; the only synchronization is the one-time-init
//! guard around [`get_bundle`].
//!
//! ## Directory layout
//! ```text
//! artifacts/
//! ├── manifest.json          classes, feature names, backend, checksums
//! ├── wildfire_model.onnx    (backend "onnx")
//! ├── wildfire_model.json    (backend "logistic")
//! ├── scaler.json            coordinate scaler
//! ├── state_encoder.json     state abbreviation label encoder
//! └── cause_encoder.json     fire cause label encoder
//! ```

pub mod encoder;
pub mod scaler;

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::constants;
use crate::logic::features::layout::{self, LayoutInfo, LayoutMismatchError};
use crate::logic::model::{classifier, Classifier, LogisticClassifier, OnnxClassifier, TARGET_CLASS};

pub use encoder::{CategoricalEncoder, LabelEncoder};
pub use scaler::{CoordinateScaler, Scaler};

// ============================================================================
// FILE NAMES
// ============================================================================

pub const MANIFEST_FILE: &str = "manifest.json";
pub const ONNX_MODEL_FILE: &str = "wildfire_model.onnx";
pub const LOGISTIC_MODEL_FILE: &str = "wildfire_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const STATE_ENCODER_FILE: &str = "state_encoder.json";
pub const CAUSE_ENCODER_FILE: &str = "cause_encoder.json";

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Fatal for the process: no prediction can be served without the bundle
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ArtifactError {
    #[error("artifact not found: {path}")]
    Missing { path: String },

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("corrupt artifact {path}: {message}")]
    Corrupt { path: String, message: String },

    #[error("invalid artifact {artifact}: {message}")]
    Invalid { artifact: String, message: String },

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    Checksum {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("failed to load model {path}: {message}")]
    Model { path: String, message: String },

    #[error(transparent)]
    Layout(#[from] LayoutMismatchError),
}

/// Read and deserialize a JSON artifact
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(ArtifactError::Missing { path: display });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ArtifactError::Io {
        path: display.clone(),
        message: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ArtifactError::Corrupt {
        path: display,
        message: e.to_string(),
    })
}

/// Compute SHA256 hash of file
fn compute_file_hash(path: &Path) -> Result<String, std::io::Error> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher)?;
    Ok(hex::encode(hasher.finalize()))
}

// ============================================================================
// MANIFEST
// ============================================================================

/// Which classifier implementation the model file is for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelBackend {
    #[default]
    Onnx,
    Logistic,
}

impl ModelBackend {
    pub fn model_file(&self) -> &'static str {
        match self {
            ModelBackend::Onnx => ONNX_MODEL_FILE,
            ModelBackend::Logistic => LOGISTIC_MODEL_FILE,
        }
    }
}

/// `manifest.json`, written next to the artifacts at export time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    #[serde(default)]
    pub backend: ModelBackend,

    /// Classifier classes, in the order its probabilities come out
    pub classes: Vec<String>,

    /// Columns the model was fitted on, in order
    pub feature_names: Vec<String>,

    #[serde(default)]
    pub feature_version: Option<u8>,

    #[serde(default)]
    pub layout_hash: Option<u32>,

    /// ONNX output holding the probability tensor
    #[serde(default)]
    pub probability_output: Option<String>,

    /// File name → lowercase hex SHA-256
    #[serde(default)]
    pub checksums: BTreeMap<String, String>,
}

impl ArtifactManifest {
    pub fn validate(&self) -> Result<(), ArtifactError> {
        layout::validate_feature_names(self.feature_names.as_slice())?;

        match (self.feature_version, self.layout_hash) {
            (Some(version), Some(hash)) => layout::validate_layout(version, hash)?,
            (None, None) => {}
            _ => {
                return Err(invalid_manifest(
                    "feature_version and layout_hash must be given together",
                ))
            }
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.classes.iter().find(|c| !seen.insert(c.as_str())) {
            return Err(invalid_manifest(format!("duplicate class '{}'", dup)));
        }

        classifier::ensure_class(&self.classes, TARGET_CLASS)
            .map_err(|e| invalid_manifest(e.to_string()))?;

        Ok(())
    }

    /// Check every listed checksum against the files in `dir`
    pub fn verify_checksums(&self, dir: &Path) -> Result<(), ArtifactError> {
        for (file, expected) in &self.checksums {
            let path = dir.join(file);
            let display = path.display().to_string();

            if !path.exists() {
                return Err(ArtifactError::Missing { path: display });
            }

            let actual = compute_file_hash(&path).map_err(|e| ArtifactError::Io {
                path: display.clone(),
                message: e.to_string(),
            })?;

            if !actual.eq_ignore_ascii_case(expected.trim()) {
                return Err(ArtifactError::Checksum {
                    path: display,
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        Ok(())
    }
}

fn invalid_manifest(message: impl Into<String>) -> ArtifactError {
    ArtifactError::Invalid {
        artifact: MANIFEST_FILE.to_string(),
        message: message.into(),
    }
}

// ============================================================================
// BUNDLE
// ============================================================================

/// Where a bundle came from, for status output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleInfo {
    pub source: String,
    pub backend: String,
    pub classes: Vec<String>,
    pub layout: LayoutInfo,
    pub loaded_at: DateTime<Utc>,
}

pub struct ArtifactBundle {
    classifier: Box<dyn Classifier>,
    state_encoder: Box<dyn CategoricalEncoder>,
    cause_encoder: Box<dyn CategoricalEncoder>,
    coordinate_scaler: Box<dyn Scaler>,
    info: BundleInfo,
}

impl ArtifactBundle {
    /// Assemble a bundle from already-built components
    pub fn new(
        classifier: Box<dyn Classifier>,
        state_encoder: Box<dyn CategoricalEncoder>,
        cause_encoder: Box<dyn CategoricalEncoder>,
        coordinate_scaler: Box<dyn Scaler>,
    ) -> Self {
        let info = BundleInfo {
            source: "<memory>".to_string(),
            backend: classifier.backend_name().to_string(),
            classes: classifier.classes().to_vec(),
            layout: LayoutInfo::current(),
            loaded_at: Utc::now(),
        };

        Self {
            classifier,
            state_encoder,
            cause_encoder,
            coordinate_scaler,
            info,
        }
    }

    /// Load all four artifacts from `dir`
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        log::info!("Loading artifacts from: {}", dir.display());

        if !dir.is_dir() {
            return Err(ArtifactError::Missing {
                path: dir.display().to_string(),
            });
        }

        let manifest: ArtifactManifest = read_json(&dir.join(MANIFEST_FILE))?;
        manifest.verify_checksums(dir)?;
        manifest.validate()?;

        let state_encoder = LabelEncoder::from_json_file(&dir.join(STATE_ENCODER_FILE))?;
        let cause_encoder = LabelEncoder::from_json_file(&dir.join(CAUSE_ENCODER_FILE))?;
        let coordinate_scaler = CoordinateScaler::from_json_file(&dir.join(SCALER_FILE))?;

        let model_path = dir.join(manifest.backend.model_file());
        let classifier: Box<dyn Classifier> = match manifest.backend {
            ModelBackend::Onnx => Box::new(OnnxClassifier::load(
                &model_path,
                manifest.classes.clone(),
                manifest.probability_output.clone(),
            )?),
            ModelBackend::Logistic => Box::new(LogisticClassifier::from_json_file(
                &model_path,
                manifest.classes.clone(),
            )?),
        };

        log::info!(
            "Artifacts loaded: backend={}, classes={:?}, {} states, {} causes",
            classifier.backend_name(),
            classifier.classes(),
            state_encoder.categories().len(),
            cause_encoder.categories().len()
        );

        let mut bundle = Self::new(
            classifier,
            Box::new(state_encoder),
            Box::new(cause_encoder),
            Box::new(coordinate_scaler),
        );
        bundle.info.source = dir.display().to_string();

        Ok(bundle)
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }

    pub fn state_encoder(&self) -> &dyn CategoricalEncoder {
        self.state_encoder.as_ref()
    }

    pub fn cause_encoder(&self) -> &dyn CategoricalEncoder {
        self.cause_encoder.as_ref()
    }

    pub fn coordinate_scaler(&self) -> &dyn Scaler {
        self.coordinate_scaler.as_ref()
    }

    pub fn info(&self) -> &BundleInfo {
        &self.info
    }
}

impl fmt::Debug for ArtifactBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactBundle")
            .field("source", &self.info.source)
            .field("backend", &self.info.backend)
            .field("classes", &self.info.classes)
            .field("states", &self.state_encoder.categories().len())
            .field("causes", &self.cause_encoder.categories().len())
            .finish()
    }
}

// ============================================================================
// PROCESS-WIDE BUNDLE
// ============================================================================

/// Load result, success or failure, kept for the process lifetime
static BUNDLE: OnceCell<Result<Arc<ArtifactBundle>, ArtifactError>> = OnceCell::new();

/// Shared bundle from the configured artifact directory
pub fn get_bundle() -> Result<Arc<ArtifactBundle>, ArtifactError> {
    init_bundle(constants::get_artifacts_dir())
}

/// Shared bundle, loading it from `dir` on first call.
///
/// Only the first call loads; later calls return the cached result whatever
/// `dir` they pass. A failed load is cached too and never retried.
pub fn init_bundle(dir: impl Into<PathBuf>) -> Result<Arc<ArtifactBundle>, ArtifactError> {
    load_once(&BUNDLE, || {
        ArtifactBundle::load(&dir.into()).map_err(|e| {
            log::error!("Artifact load failed, predictions disabled: {}", e);
            e
        })
    })
}

/// Run `loader` at most once per `cell`; concurrent callers block until the
/// first load finishes and then share its result.
fn load_once<T, E: Clone>(
    cell: &OnceCell<Result<Arc<T>, E>>,
    loader: impl FnOnce() -> Result<T, E>,
) -> Result<Arc<T>, E> {
    cell.get_or_init(|| loader().map(Arc::new)).clone()
}

// ============================================================================
// TESTS
// ============================================================================
