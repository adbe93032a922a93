//! Coordinate scaler
//!
//! Fitted on the (LATITUDE, LONGITUDE) column pair, so it always transforms
//! both coordinates in a single call.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{read_json, ArtifactError};

/// Normalizes a coordinate pair with statistics captured at fit time
pub trait Scaler: Send + Sync {
    fn transform(&self, pair: [f64; 2]) -> [f64; 2];
}

/// Fitted scaler parameters, using scikit-learn attribute names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoordinateScaler {
    /// `StandardScaler`: `(x - mean) / scale`
    Standard { mean: Vec<f64>, scale: Vec<f64> },
    /// `MinMaxScaler`: `x * scale + min`
    MinMax { min: Vec<f64>, scale: Vec<f64> },
}

impl CoordinateScaler {
    pub fn from_json_file(path: &Path) -> Result<Self, ArtifactError> {
        let scaler: CoordinateScaler = read_json(path)?;
        scaler.validate().map_err(|message| ArtifactError::Invalid {
            artifact: path.display().to_string(),
            message,
        })?;
        Ok(scaler)
    }

    /// Both parameter vectors must cover exactly (lat, lon)
    pub fn validate(&self) -> Result<(), String> {
        let (offset, scale) = match self {
            CoordinateScaler::Standard { mean, scale } => (mean, scale),
            CoordinateScaler::MinMax { min, scale } => (min, scale),
        };

        if offset.len() != 2 || scale.len() != 2 {
            return Err(format!(
                "scaler must be fitted on 2 features, got {} offsets and {} scales",
                offset.len(),
                scale.len()
            ));
        }
        if offset.iter().chain(scale.iter()).any(|v| !v.is_finite()) {
            return Err("scaler parameters must be finite".to_string());
        }
        if matches!(self, CoordinateScaler::Standard { .. }) && scale.iter().any(|s| *s == 0.0) {
            return Err("standard scaler has a zero scale".to_string());
        }

        Ok(())
    }
}

impl Scaler for CoordinateScaler {
    fn transform(&self, pair: [f64; 2]) -> [f64; 2] {
        match self {
            CoordinateScaler::Standard { mean, scale } => [
                (pair[0] - mean[0]) / scale[0],
                (pair[1] - mean[1]) / scale[1],
            ],
            CoordinateScaler::MinMax { min, scale } => [
                pair[0] * scale[0] + min[0],
                pair[1] * scale[1] + min[1],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_standard_transform() {
        let scaler = CoordinateScaler::Standard {
            mean: vec![36.0, -95.0],
            scale: vec![6.0, 15.0],
        };
        let [lat, lon] = scaler.transform([42.0, -110.0]);
        assert!((lat - 1.0).abs() < 1e-12);
        assert!((lon + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_min_max_transform() {
        // Fitted on lat in [20, 70], lon in [-170, -60]
        let scaler = CoordinateScaler::MinMax {
            min: vec![-20.0 / 50.0, 170.0 / 110.0],
            scale: vec![1.0 / 50.0, 1.0 / 110.0],
        };
        let [lat, lon] = scaler.transform([70.0, -60.0]);
        assert!((lat - 1.0).abs() < 1e-12);
        assert!((lon - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_rejects_wrong_shape() {
        let scaler = CoordinateScaler::Standard {
            mean: vec![0.0],
            scale: vec![1.0, 1.0],
        };
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let scaler = CoordinateScaler::Standard {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 0.0],
        };
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"kind": "standard", "mean": [37.0, -96.0], "scale": [5.0, 17.0]}}"#).unwrap();

        let scaler = CoordinateScaler::from_json_file(file.path()).unwrap();
        assert_eq!(
            scaler,
            CoordinateScaler::Standard { mean: vec![37.0, -96.0], scale: vec![5.0, 17.0] }
        );
    }

    #[test]
    fn test_from_json_file_unknown_kind() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"kind": "robust", "center": [0, 0]}}"#).unwrap();

        assert!(matches!(
            CoordinateScaler::from_json_file(file.path()),
            Err(ArtifactError::Corrupt { .. })
        ));
    }
}
