//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every default can be overridden from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Default directory holding the fitted artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Default geocoding endpoint (Nominatim search API)
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/search";

/// User agent sent to the geocoder. Nominatim rejects anonymous clients.
pub const DEFAULT_GEOCODER_USER_AGENT: &str = "wildfire_predictor";

/// Default geocoder timeout (seconds)
pub const DEFAULT_GEOCODER_TIMEOUT_SECS: u64 = 10;

/// Restrict geocoding to the United States by default
pub const DEFAULT_GEOCODER_COUNTRY_CODES: &str = "us";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Wildfire Risk Predictor";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get artifact directory from environment or use default
pub fn get_artifacts_dir() -> PathBuf {
    std::env::var("WILDFIRE_ARTIFACTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_ARTIFACTS_DIR))
}

/// Get geocoder URL from environment or use default
pub fn get_geocoder_url() -> String {
    std::env::var("GEOCODER_URL")
        .unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string())
}

/// Get geocoder user agent from environment or use default
pub fn get_geocoder_user_agent() -> String {
    std::env::var("GEOCODER_USER_AGENT")
        .unwrap_or_else(|_| DEFAULT_GEOCODER_USER_AGENT.to_string())
}

/// Get geocoder timeout from environment or use default
pub fn get_geocoder_timeout() -> Duration {
    let secs = std::env::var("GEOCODER_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GEOCODER_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Get geocoder country filter. Empty string disables the filter.
pub fn get_geocoder_country_codes() -> Option<String> {
    let codes = std::env::var("GEOCODER_COUNTRY_CODES")
        .unwrap_or_else(|_| DEFAULT_GEOCODER_COUNTRY_CODES.to_string());
    let codes = codes.trim();
    if codes.is_empty() {
        None
    } else {
        Some(codes.to_string())
    }
}
