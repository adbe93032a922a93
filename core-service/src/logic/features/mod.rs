//! Features Module - Feature Encoding
//!
//! Turns a resolved request into the numeric vector the classifier was
//! trained on. `layout` is the single source of truth for field order.

pub mod encoder;
pub mod layout;
pub mod vector;

// Re-export common types
pub use encoder::{encode, CategoryField, EncodeError};
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::EncodedFeatureVector;
