//! Categorical encoders
//!
//! Label encoders as fitted by scikit-learn: the code of a category is its
//! position in the fitted `classes` list.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_json, ArtifactError};

/// Maps a fixed, known set of string categories to integer codes
pub trait CategoricalEncoder: Send + Sync {
    /// `None` when the value was not seen at fit time
    fn encode(&self, value: &str) -> Option<i64>;

    /// Fitted categories, in code order
    fn categories(&self) -> &[String];
}

/// On-disk form: `{"classes": ["AK", "AL", ...]}`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct LabelEncoderFile {
    classes: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, i64>,
}

impl LabelEncoder {
    /// Build from the fitted class list. Classes must be non-empty and unique.
    pub fn new(classes: Vec<String>) -> Result<Self, String> {
        if classes.is_empty() {
            return Err("encoder has no fitted classes".to_string());
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if index.insert(class.clone(), code as i64).is_some() {
                return Err(format!("duplicate class '{}'", class));
            }
        }

        Ok(Self { classes, index })
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ArtifactError> {
        let file: LabelEncoderFile = read_json(path)?;
        Self::new(file.classes).map_err(|message| ArtifactError::Invalid {
            artifact: path.display().to_string(),
            message,
        })
    }
}

impl CategoricalEncoder for LabelEncoder {
    fn encode(&self, value: &str) -> Option<i64> {
        self.index.get(value).copied()
    }

    fn categories(&self) -> &[String] {
        &self.classes
    }
}
