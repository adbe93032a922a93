//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the order the classifier reads its inputs in**
//!
//! The model was fitted on a frame with columns
//! `STATE, LATITUDE, LONGITUDE, STAT_CAUSE_DESCR`. A vector assembled in any
//! other order is still four numbers, so the model would silently score garbage.
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! The artifact manifest records the feature names (and optionally version and
//! hash) it was exported with; the bundle refuses to load on any mismatch.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "STATE",            // 0: state abbreviation, label-encoded
    "LATITUDE",         // 1: latitude, scaled jointly with longitude
    "LONGITUDE",        // 2: longitude, scaled jointly with latitude
    "STAT_CAUSE_DESCR", // 3: fire cause, label-encoded
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 4;

pub const STATE_INDEX: usize = 0;
pub const LATITUDE_INDEX: usize = 1;
pub const LONGITUDE_INDEX: usize = 2;
pub const CAUSE_INDEX: usize = 3;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when an artifact was exported against a different feature layout
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LayoutMismatchError {
    #[error(
        "Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), \
         got v{actual_version} (hash: {actual_hash:08x})"
    )]
    Version {
        expected_version: u8,
        expected_hash: u32,
        actual_version: u8,
        actual_hash: u32,
    },

    #[error("Feature order mismatch: expected {expected:?}, got {actual:?}")]
    Names {
        expected: Vec<String>,
        actual: Vec<String>,
    },
}

/// Validate a (version, hash) pair against the current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError::Version {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Validate an ordered list of feature names against the current layout
pub fn validate_feature_names<S: AsRef<str>>(names: &[S]) -> Result<(), LayoutMismatchError> {
    let matches = names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_LAYOUT).all(|(a, b)| a.as_ref() == *b);

    if !matches {
        return Err(LayoutMismatchError::Names {
            expected: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
            actual: names.iter().map(|s| s.as_ref().to_string()).collect(),
        });
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
