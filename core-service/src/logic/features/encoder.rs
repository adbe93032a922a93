//! Feature Encoder
//!
//! Raw request fields → [`EncodedFeatureVector`]. The steps run in a fixed
//! order against the bundle's fitted transformers; the function is pure.

use thiserror::Error;

use super::vector::EncodedFeatureVector;
use crate::logic::artifacts::ArtifactBundle;
use crate::logic::reference;

/// Which raw field failed to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    State,
    Cause,
}

impl std::fmt::Display for CategoryField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryField::State => f.write_str("state"),
            CategoryField::Cause => f.write_str("cause"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EncodeError {
    /// The value is not among the categories the encoder was fitted on,
    /// or (for states) has no abbreviation in the reference table.
    #[error("unknown {field} category '{value}'")]
    UnknownCategory { field: CategoryField, value: String },
}

/// Encode one request.
///
/// 1. state name → abbreviation (reference table)
/// 2. abbreviation → state code
/// 3. cause → cause code
/// 4. (lat, lon) → scaled pair, in one scaler call
/// 5. assemble in layout order
pub fn encode(
    state: &str,
    latitude: f64,
    longitude: f64,
    cause: &str,
    bundle: &ArtifactBundle,
) -> Result<EncodedFeatureVector, EncodeError> {
    let unknown = |field: CategoryField, value: &str| EncodeError::UnknownCategory {
        field,
        value: value.to_string(),
    };

    let abbreviation =
        reference::state_abbreviation(state).ok_or_else(|| unknown(CategoryField::State, state))?;

    let state_code = bundle
        .state_encoder()
        .encode(abbreviation)
        .ok_or_else(|| unknown(CategoryField::State, abbreviation))?;

    let cause_code = bundle
        .cause_encoder()
        .encode(cause)
        .ok_or_else(|| unknown(CategoryField::Cause, cause))?;

    let [latitude_scaled, longitude_scaled] =
        bundle.coordinate_scaler().transform([latitude, longitude]);

    Ok(EncodedFeatureVector::new(
        state_code,
        latitude_scaled,
        longitude_scaled,
        cause_code,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::test_support::{fitted_bundle, StubClassifier};

    #[test]
    fn test_encode_field_order() {
        let bundle = fitted_bundle(StubClassifier::fixed_low(0.5));
        let vector = encode("California", 34.05, -118.24, "Debris Burning", &bundle).unwrap();

        // Sorted abbreviations: AK, AL, AR, AZ, CA
        assert_eq!(vector.state_code, 4);
        assert_eq!(vector.cause_code, 3);
        // scaler in fitted_bundle: mean (37, -95), scale (5, 15)
        assert!((vector.latitude_scaled - (34.05 - 37.0) / 5.0).abs() < 1e-12);
        assert!((vector.longitude_scaled - (-118.24 + 95.0) / 15.0).abs() < 1e-12);

        let array = vector.to_array();
        assert_eq!(array[0], 4.0);
        assert_eq!(array[3], 3.0);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let bundle = fitted_bundle(StubClassifier::fixed_low(0.5));
        let a = encode("Oregon", 44.05, -121.31, "Lightning", &bundle).unwrap();
        let b = encode("Oregon", 44.05, -121.31, "Lightning", &bundle).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_reference_pair_encodes() {
        let bundle = fitted_bundle(StubClassifier::fixed_low(0.5));
        for state in reference::US_STATES {
            for cause in reference::FIRE_CAUSES {
                let vector = encode(state.name, 40.0, -100.0, cause, &bundle);
                assert!(vector.is_ok(), "{} / {} failed: {:?}", state.name, cause, vector);
            }
        }
    }

    #[test]
    fn test_unknown_cause() {
        let bundle = fitted_bundle(StubClassifier::fixed_low(0.5));
        let err = encode("California", 34.0, -118.0, "NotARealCause", &bundle).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                field: CategoryField::Cause,
                value: "NotARealCause".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_state_name() {
        let bundle = fitted_bundle(StubClassifier::fixed_low(0.5));
        let err = encode("Atlantis", 34.0, -118.0, "Arson", &bundle).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::UnknownCategory { field: CategoryField::State, .. }
        ));
    }

    #[test]
    fn test_state_missing_from_fitted_encoder() {
        // Reference data knows Puerto Rico, this encoder was fitted without it
        let bundle = crate::logic::test_support::bundle_with_states(
            &["AZ", "CA"],
            StubClassifier::fixed_low(0.5),
        );
        let err = encode("Puerto Rico", 18.4, -66.1, "Arson", &bundle).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                field: CategoryField::State,
                value: "PR".to_string()
            }
        );
    }
}
