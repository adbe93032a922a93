//! Encoded Feature Vector - the classifier input
//!
//! Named fields instead of a bare `[f32; 4]`: the only place the fields are
//! flattened into positional form is [`EncodedFeatureVector::to_array`], which
//! follows `FEATURE_LAYOUT`.

use serde::{Deserialize, Serialize};

use super::layout::{
    layout_hash, CAUSE_INDEX, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION, LATITUDE_INDEX,
    LONGITUDE_INDEX, STATE_INDEX,
};

// ============================================================================
// ENCODED FEATURE VECTOR
// ============================================================================

/// One request, encoded exactly as the model was trained on it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodedFeatureVector {
    /// Label-encoded state abbreviation
    pub state_code: i64,
    /// Latitude after the joint coordinate scaler
    pub latitude_scaled: f64,
    /// Longitude after the joint coordinate scaler
    pub longitude_scaled: f64,
    /// Label-encoded fire cause
    pub cause_code: i64,
}

impl EncodedFeatureVector {
    pub fn new(state_code: i64, latitude_scaled: f64, longitude_scaled: f64, cause_code: i64) -> Self {
        Self {
            state_code,
            latitude_scaled,
            longitude_scaled,
            cause_code,
        }
    }

    /// Flatten into model input order
    pub fn to_array(&self) -> [f32; FEATURE_COUNT] {
        let mut values = [0.0f32; FEATURE_COUNT];
        values[STATE_INDEX] = self.state_code as f32;
        values[LATITUDE_INDEX] = self.latitude_scaled as f32;
        values[LONGITUDE_INDEX] = self.longitude_scaled as f32;
        values[CAUSE_INDEX] = self.cause_code as f32;
        values
    }

    /// Same as [`to_array`](Self::to_array) at full precision
    pub fn to_f64_array(&self) -> [f64; FEATURE_COUNT] {
        let mut values = [0.0f64; FEATURE_COUNT];
        values[STATE_INDEX] = self.state_code as f64;
        values[LATITUDE_INDEX] = self.latitude_scaled;
        values[LONGITUDE_INDEX] = self.longitude_scaled;
        values[CAUSE_INDEX] = self.cause_code as f64;
        values
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": FEATURE_VERSION,
            "layout_hash": layout_hash(),
            "values": self.to_array(),
            "named_values": FEATURE_LAYOUT.iter()
                .zip(self.to_f64_array().iter())
                .map(|(name, value)| (name.to_string(), *value))
                .collect::<std::collections::HashMap<_, _>>(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_array_follows_layout() {
        let vector = EncodedFeatureVector::new(4, 0.25, -1.5, 3);
        assert_eq!(vector.to_array(), [4.0, 0.25, -1.5, 3.0]);
    }

    #[test]
    fn test_to_log_entry() {
        let vector = EncodedFeatureVector::new(1, 0.5, 0.5, 2);
        let log = vector.to_log_entry();
        assert_eq!(log["feature_version"], FEATURE_VERSION);
        assert_eq!(log["named_values"]["STAT_CAUSE_DESCR"], 2.0);
        assert!(log["layout_hash"].as_u64().is_some());
    }
}
