//! Location Resolver
//!
//! (state, city) → coordinates through a geocoding collaborator.
//! "No match" is a normal answer (`Ok(None)`); a geocoder that cannot be
//! reached or answers garbage is a `GeocodeError` and is never folded into
//! "no match".

pub mod nominatim;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use nominatim::{GeocoderConfig, NominatimGeocoder};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// The geocoding service could not answer. Retryable by the user.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeocodeError {
    #[error("geocoder unreachable: {0}")]
    Transport(String),

    #[error("geocoder returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("geocoder returned an unreadable response: {0}")]
    InvalidResponse(String),
}

// ============================================================================
// GEOCODER TRAIT
// ============================================================================

/// Free-text place query → optional coordinates
pub trait Geocoder: Send + Sync {
    fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError>;
}

// ============================================================================
// RESOLVER
// ============================================================================

/// `"{city}, {state}"`, or just the state when the city is blank
pub fn build_query(state: &str, city: &str) -> String {
    let city = city.trim();
    if city.is_empty() {
        state.to_string()
    } else {
        format!("{}, {}", city, state)
    }
}

#[derive(Clone)]
pub struct LocationResolver {
    geocoder: Arc<dyn Geocoder>,
}

impl LocationResolver {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self { geocoder }
    }

    /// Resolve one location. Every call hits the geocoder; nothing is cached.
    pub fn resolve(&self, state: &str, city: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let query = build_query(state, city);
        log::debug!("Geocoding '{}'", query);

        let result = self.geocoder.geocode(&query)?;
        match &result {
            Some(c) => log::debug!("'{}' → ({:.4}, {:.4})", query, c.latitude, c.longitude),
            None => log::info!("No location found for '{}'", query),
        }

        Ok(result)
    }
}

// ============================================================================
// TESTS
// ============================================================================
