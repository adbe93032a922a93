//! End-to-end pipeline tests: request → resolver → encoder → classifier

use std::sync::Arc;

use super::artifacts::ArtifactBundle;
use super::location::LocationResolver;
use super::model::RiskLabel;
use super::predictor::{
    FailureKind, InferenceStage, PredictionOutcome, Predictor, RawRequest,
};
use super::test_support::{fitted_bundle, write_logistic_artifacts, StubClassifier, StubGeocoder};

fn geocoder() -> StubGeocoder {
    StubGeocoder::new()
        .with("Los Angeles, California", 34.0536909, -118.242766)
        .with("California", 36.7014631, -118.755997)
        .with("Bend, Oregon", 44.0581728, -121.3153096)
}

fn predictor(bundle: ArtifactBundle, geocoder: StubGeocoder) -> (Predictor, Arc<StubGeocoder>) {
    let geocoder = Arc::new(geocoder);
    let resolver = LocationResolver::new(geocoder.clone());
    (Predictor::new(Arc::new(bundle), resolver), geocoder)
}

fn predicted(outcome: PredictionOutcome) -> super::predictor::PredictionResult {
    match outcome {
        PredictionOutcome::Predicted(result) => result,
        other => panic!("expected a prediction, got {:?}", other),
    }
}

#[test]
fn test_los_angeles_debris_burning() {
    let (predictor, _) = predictor(fitted_bundle(StubClassifier::fixed_low(0.99)), geocoder());
    let request = RawRequest::new("California", "Los Angeles", "Debris Burning");

    let result = predicted(predictor.predict(&request).unwrap());

    // Inside California's bounding box
    assert!((32.5..=42.0).contains(&result.coordinates.latitude));
    assert!((-124.5..=-114.1).contains(&result.coordinates.longitude));
    assert_eq!(result.query, "Los Angeles, California");
    assert_eq!(result.risk_label, RiskLabel::High);

    // Same input, same answer
    let again = predicted(predictor.predict(&request).unwrap());
    assert_eq!(result, again);
}

#[test]
fn test_inverted_threshold() {
    let request = RawRequest::new("Oregon", "Bend", "Lightning");

    let cases = [
        (0.99, RiskLabel::High),
        (0.9700001, RiskLabel::High),
        (0.97, RiskLabel::Low),
        (0.5, RiskLabel::Low),
        (0.01, RiskLabel::Low),
    ];

    for (p_low, expected) in cases {
        let (predictor, _) = predictor(fitted_bundle(StubClassifier::fixed_low(p_low)), geocoder());
        let result = predicted(predictor.predict(&request).unwrap());
        assert_eq!(result.risk_label, expected, "P(Low) = {}", p_low);
    }
}

#[test]
fn test_empty_city_uses_state_only() {
    let (predictor, geocoder) =
        predictor(fitted_bundle(StubClassifier::fixed_low(0.5)), geocoder());

    let result = predicted(
        predictor
            .predict(&RawRequest::new("California", "", "Arson"))
            .unwrap(),
    );

    assert_eq!(result.query, "California");
    assert_eq!(geocoder.queries(), vec!["California"]);
}

#[test]
fn test_location_not_found_is_not_a_failure() {
    let (predictor, _) = predictor(fitted_bundle(StubClassifier::fixed_low(0.5)), geocoder());

    let outcome = predictor
        .predict(&RawRequest::new("Nevada", "Qwxzville", "Arson"))
        .unwrap();

    assert_eq!(
        outcome,
        PredictionOutcome::LocationNotFound {
            query: "Qwxzville, Nevada".to_string()
        }
    );
}

#[test]
fn test_geocoder_down_is_distinct_from_not_found() {
    let (predictor, _) = predictor(
        fitted_bundle(StubClassifier::fixed_low(0.5)),
        StubGeocoder::unavailable(),
    );

    let failure = predictor
        .predict(&RawRequest::new("Nevada", "Reno", "Arson"))
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::ResolverUnavailable);
    assert_eq!(failure.stage, InferenceStage::Resolving);
    assert!(failure.kind.is_retryable());
}

#[test]
fn test_unknown_cause_is_reported() {
    let (predictor, _) = predictor(fitted_bundle(StubClassifier::fixed_low(0.5)), geocoder());

    let failure = predictor
        .predict(&RawRequest::new("California", "Los Angeles", "NotARealCause"))
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::UnknownCategory);
    assert_eq!(failure.stage, InferenceStage::Encoding);
    assert!(failure.message.contains("NotARealCause"));
    assert!(!failure.kind.is_retryable());
}

#[test]
fn test_classifier_without_low_class() {
    let classifier = StubClassifier::with_classes(&["0", "1"], &[0.2, 0.8]);
    let (predictor, _) = predictor(fitted_bundle(classifier), geocoder());

    let failure = predictor
        .predict(&RawRequest::new("California", "Los Angeles", "Arson"))
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::ModelMismatch);
    assert_eq!(failure.stage, InferenceStage::Classifying);
}

#[test]
fn test_backend_error_is_internal() {
    let (predictor, _) = predictor(
        fitted_bundle(StubClassifier::failing("session poisoned")),
        geocoder(),
    );

    let failure = predictor
        .predict(&RawRequest::new("California", "Los Angeles", "Arson"))
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::Internal);
    assert!(failure.message.contains("session poisoned"));
}

#[test]
fn test_panic_becomes_internal_failure() {
    let (predictor, _) = predictor(fitted_bundle(StubClassifier::panicking()), geocoder());

    let failure = predictor
        .predict(&RawRequest::new("California", "Los Angeles", "Arson"))
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::Internal);
    assert_eq!(failure.stage, InferenceStage::Classifying);
    assert!(failure.message.contains("stub classifier exploded"));

    // The predictor stays usable
    let failure = predictor
        .predict(&RawRequest::new("California", "Los Angeles", "Arson"))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::Internal);
}

#[test]
fn test_logistic_bundle_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_logistic_artifacts(dir.path());
    let bundle = ArtifactBundle::load(dir.path()).unwrap();

    let (predictor, _) = predictor(bundle, geocoder());
    let result = predicted(
        predictor
            .predict(&RawRequest::new("California", "Los Angeles", "Debris Burning"))
            .unwrap(),
    );

    // z ≈ 2.23, P(Low) ≈ 0.90: below the cutoff
    assert_eq!(result.risk_label, RiskLabel::Low);
}
