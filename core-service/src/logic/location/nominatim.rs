//! Nominatim geocoder
//!
//! Blocking lookups against a Nominatim-compatible `/search` endpoint.
//! Only the first match is used.

use std::time::Duration;

use serde::Deserialize;

use super::{Coordinates, GeocodeError, Geocoder};
use crate::constants;

/// Geocoder connection settings
#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub country_codes: Option<String>,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_GEOCODER_URL.to_string(),
            user_agent: constants::DEFAULT_GEOCODER_USER_AGENT.to_string(),
            timeout: Duration::from_secs(constants::DEFAULT_GEOCODER_TIMEOUT_SECS),
            country_codes: Some(constants::DEFAULT_GEOCODER_COUNTRY_CODES.to_string()),
        }
    }
}

impl GeocoderConfig {
    pub fn from_env() -> Self {
        Self {
            url: constants::get_geocoder_url(),
            user_agent: constants::get_geocoder_user_agent(),
            timeout: constants::get_geocoder_timeout(),
            country_codes: constants::get_geocoder_country_codes(),
        }
    }
}

/// One search hit. Nominatim sends coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: Option<String>,
}

pub struct NominatimGeocoder {
    agent: ureq::Agent,
    config: GeocoderConfig,
}

impl NominatimGeocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Self { agent, config }
    }

    pub fn from_env() -> Self {
        Self::new(GeocoderConfig::from_env())
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Option<Coordinates>, GeocodeError> {
        let mut request = self
            .agent
            .get(&self.config.url)
            .query("q", query)
            .query("format", "json")
            .query("limit", "1");

        if let Some(codes) = &self.config.country_codes {
            request = request.query("countrycodes", codes);
        }

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let message = response.status_text().to_string();
                return Err(GeocodeError::HttpStatus { status, message });
            }
            Err(e) => return Err(GeocodeError::Transport(e.to_string())),
        };

        let body = response
            .into_string()
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;

        parse_search_response(&body)
    }
}

/// Parse a `format=json` search body into the first hit's coordinates
pub fn parse_search_response(body: &str) -> Result<Option<Coordinates>, GeocodeError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)
        .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

    let Some(place) = places.into_iter().next() else {
        return Ok(None);
    };

    let parse = |field: &str, value: &str| {
        value.trim().parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
            GeocodeError::InvalidResponse(format!("bad {} '{}'", field, value))
        })
    };

    let latitude = parse("lat", &place.lat)?;
    let longitude = parse("lon", &place.lon)?;

    if let Some(name) = &place.display_name {
        log::debug!("Geocoder matched '{}'", name);
    }

    Ok(Some(Coordinates::new(latitude, longitude)))
}
