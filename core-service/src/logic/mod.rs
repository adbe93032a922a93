//! Logic Module - Inference Pipeline
//!
//! ## Layout
//! - `reference` - state/city/cause tables offered to users
//! - `artifacts/` - fitted model, encoders and scaler, loaded once
//! - `location/` - (state, city) → coordinates via a geocoder
//! - `features/` - request → encoded feature vector
//! - `model/` - classifier backends and the risk decision rule
//! - `predictor` - runs the stages for one request

pub mod artifacts;
pub mod features;
pub mod location;
pub mod model;
pub mod predictor;
pub mod reference;

#[cfg(test)]
pub(crate) mod test_support;

#[cfg(test)]
mod tests;
