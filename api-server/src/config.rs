//! Configuration module

use std::env;
use std::path::PathBuf;

use wildfire_core::constants;
use wildfire_core::logic::location::GeocoderConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding manifest, model, encoders and scaler
    pub artifacts_dir: PathBuf,

    /// Geocoding service settings
    pub geocoder: GeocoderConfig,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),

            artifacts_dir: constants::get_artifacts_dir(),

            geocoder: GeocoderConfig::from_env(),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            artifacts_dir: PathBuf::from(constants::DEFAULT_ARTIFACTS_DIR),
            geocoder: GeocoderConfig::default(),
            environment: "development".to_string(),
        }
    }
}
