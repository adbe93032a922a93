//! Reference Data - States, Cities, Fire Causes
//!
//! Static enumerations the form is built from. Versioned together with the
//! artifacts: a state or cause added here without re-fitting the encoders
//! fails with `UnknownCategory` at encode time.

use serde::Serialize;

use super::model::RiskLabel;

// ============================================================================
// STATES
// ============================================================================

/// A selectable US state (or territory) with its postal abbreviation
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StateInfo {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub cities: &'static [&'static str],
}

const fn state(
    name: &'static str,
    abbreviation: &'static str,
    cities: &'static [&'static str],
) -> StateInfo {
    StateInfo { name, abbreviation, cities }
}

/// All states, sorted by name
pub const US_STATES: &[StateInfo] = &[
    state("Alabama", "AL", &["Birmingham", "Montgomery", "Mobile", "Huntsville", "Tuscaloosa"]),
    state("Alaska", "AK", &["Anchorage", "Fairbanks", "Juneau", "Wasilla", "Sitka"]),
    state("Arizona", "AZ", &["Phoenix", "Tucson", "Flagstaff", "Prescott", "Payson"]),
    state("Arkansas", "AR", &["Little Rock", "Fayetteville", "Fort Smith", "Hot Springs", "Jonesboro"]),
    state("California", "CA", &["Los Angeles", "San Diego", "Sacramento", "Redding", "Fresno", "Santa Rosa", "Paradise"]),
    state("Colorado", "CO", &["Denver", "Colorado Springs", "Boulder", "Fort Collins", "Durango"]),
    state("Connecticut", "CT", &["Hartford", "New Haven", "Stamford", "Bridgeport", "Waterbury"]),
    state("Delaware", "DE", &["Wilmington", "Dover", "Newark", "Georgetown", "Lewes"]),
    state("District of Columbia", "DC", &["Washington"]),
    state("Florida", "FL", &["Miami", "Orlando", "Tampa", "Jacksonville", "Tallahassee", "Naples"]),
    state("Georgia", "GA", &["Atlanta", "Savannah", "Augusta", "Macon", "Valdosta"]),
    state("Hawaii", "HI", &["Honolulu", "Hilo", "Kailua-Kona", "Lahaina", "Lihue"]),
    state("Idaho", "ID", &["Boise", "Idaho Falls", "Pocatello", "Coeur d'Alene", "Twin Falls"]),
    state("Illinois", "IL", &["Chicago", "Springfield", "Peoria", "Rockford", "Carbondale"]),
    state("Indiana", "IN", &["Indianapolis", "Fort Wayne", "Evansville", "Bloomington", "South Bend"]),
    state("Iowa", "IA", &["Des Moines", "Cedar Rapids", "Davenport", "Iowa City", "Sioux City"]),
    state("Kansas", "KS", &["Wichita", "Topeka", "Kansas City", "Dodge City", "Manhattan"]),
    state("Kentucky", "KY", &["Louisville", "Lexington", "Frankfort", "Bowling Green", "Pikeville"]),
    state("Louisiana", "LA", &["New Orleans", "Baton Rouge", "Shreveport", "Lafayette", "Alexandria"]),
    state("Maine", "ME", &["Portland", "Augusta", "Bangor", "Lewiston", "Presque Isle"]),
    state("Maryland", "MD", &["Baltimore", "Annapolis", "Frederick", "Salisbury", "Cumberland"]),
    state("Massachusetts", "MA", &["Boston", "Worcester", "Springfield", "Plymouth", "Pittsfield"]),
    state("Michigan", "MI", &["Detroit", "Grand Rapids", "Lansing", "Marquette", "Traverse City"]),
    state("Minnesota", "MN", &["Minneapolis", "Saint Paul", "Duluth", "Rochester", "Bemidji"]),
    state("Mississippi", "MS", &["Jackson", "Gulfport", "Hattiesburg", "Tupelo", "Meridian"]),
    state("Missouri", "MO", &["Kansas City", "St. Louis", "Springfield", "Jefferson City", "Rolla"]),
    state("Montana", "MT", &["Billings", "Missoula", "Helena", "Bozeman", "Kalispell"]),
    state("Nebraska", "NE", &["Omaha", "Lincoln", "North Platte", "Scottsbluff", "Kearney"]),
    state("Nevada", "NV", &["Las Vegas", "Reno", "Carson City", "Elko", "Winnemucca"]),
    state("New Hampshire", "NH", &["Manchester", "Concord", "Nashua", "Keene", "Berlin"]),
    state("New Jersey", "NJ", &["Newark", "Trenton", "Jersey City", "Atlantic City", "Toms River"]),
    state("New Mexico", "NM", &["Albuquerque", "Santa Fe", "Las Cruces", "Roswell", "Ruidoso"]),
    state("New York", "NY", &["New York", "Buffalo", "Albany", "Rochester", "Syracuse"]),
    state("North Carolina", "NC", &["Charlotte", "Raleigh", "Asheville", "Wilmington", "Fayetteville"]),
    state("North Dakota", "ND", &["Fargo", "Bismarck", "Grand Forks", "Minot", "Dickinson"]),
    state("Ohio", "OH", &["Columbus", "Cleveland", "Cincinnati", "Toledo", "Athens"]),
    state("Oklahoma", "OK", &["Oklahoma City", "Tulsa", "Norman", "Lawton", "Woodward"]),
    state("Oregon", "OR", &["Portland", "Eugene", "Salem", "Bend", "Medford"]),
    state("Pennsylvania", "PA", &["Philadelphia", "Pittsburgh", "Harrisburg", "Scranton", "Erie"]),
    state("Puerto Rico", "PR", &["San Juan", "Ponce", "Mayaguez", "Arecibo", "Caguas"]),
    state("Rhode Island", "RI", &["Providence", "Warwick", "Newport", "Cranston", "Westerly"]),
    state("South Carolina", "SC", &["Columbia", "Charleston", "Greenville", "Myrtle Beach", "Florence"]),
    state("South Dakota", "SD", &["Sioux Falls", "Rapid City", "Pierre", "Aberdeen", "Custer"]),
    state("Tennessee", "TN", &["Nashville", "Memphis", "Knoxville", "Chattanooga", "Gatlinburg"]),
    state("Texas", "TX", &["Houston", "Dallas", "Austin", "San Antonio", "El Paso", "Lubbock"]),
    state("Utah", "UT", &["Salt Lake City", "Provo", "St. George", "Ogden", "Moab"]),
    state("Vermont", "VT", &["Burlington", "Montpelier", "Rutland", "Brattleboro", "Bennington"]),
    state("Virginia", "VA", &["Richmond", "Virginia Beach", "Roanoke", "Charlottesville", "Norfolk"]),
    state("Washington", "WA", &["Seattle", "Spokane", "Olympia", "Wenatchee", "Yakima"]),
    state("West Virginia", "WV", &["Charleston", "Morgantown", "Huntington", "Beckley", "Elkins"]),
    state("Wisconsin", "WI", &["Milwaukee", "Madison", "Green Bay", "Eau Claire", "Wausau"]),
    state("Wyoming", "WY", &["Cheyenne", "Casper", "Jackson", "Laramie", "Cody"]),
];

/// Look up a state by its full name
pub fn find_state(name: &str) -> Option<&'static StateInfo> {
    US_STATES.iter().find(|s| s.name == name)
}

/// Full state name → two-letter abbreviation
pub fn state_abbreviation(name: &str) -> Option<&'static str> {
    find_state(name).map(|s| s.abbreviation)
}

/// Cities offered for a state
pub fn cities(state: &str) -> Option<&'static [&'static str]> {
    find_state(state).map(|s| s.cities)
}

// ============================================================================
// FIRE CAUSES
// ============================================================================

/// Causes recorded in the US wildfire records the model was fitted on
pub const FIRE_CAUSES: &[&str] = &[
    "Arson",
    "Campfire",
    "Children",
    "Debris Burning",
    "Equipment Use",
    "Fireworks",
    "Lightning",
    "Miscellaneous",
    "Missing/Undefined",
    "Powerline",
    "Railroad",
    "Smoking",
    "Structure",
];

/// Most frequent cause in the training data
pub const DEFAULT_CAUSE: &str = "Debris Burning";

pub fn is_known_cause(cause: &str) -> bool {
    FIRE_CAUSES.contains(&cause)
}

// ============================================================================
// RISK LABELS
// ============================================================================

/// Friendly text shown for a risk label
pub fn risk_text(label: RiskLabel) -> &'static str {
    match label {
        RiskLabel::High => "🔥 High wildfire risk",
        RiskLabel::Low => "🌲 Low wildfire risk",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_states_sorted_and_unique() {
        let names: Vec<&str> = US_STATES.iter().map(|s| s.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let abbrs: HashSet<&str> = US_STATES.iter().map(|s| s.abbreviation).collect();
        assert_eq!(abbrs.len(), US_STATES.len());
    }

    #[test]
    fn test_every_state_has_cities() {
        for state in US_STATES {
            assert!(!state.cities.is_empty(), "{} has no cities", state.name);
            assert_eq!(state.abbreviation.len(), 2);
        }
    }

    #[test]
    fn test_state_abbreviation() {
        assert_eq!(state_abbreviation("California"), Some("CA"));
        assert_eq!(state_abbreviation("District of Columbia"), Some("DC"));
        assert_eq!(state_abbreviation("california"), None);
        assert_eq!(state_abbreviation("Atlantis"), None);
    }

    #[test]
    fn test_cities_lookup() {
        assert!(cities("California").unwrap().contains(&"Los Angeles"));
        assert_eq!(cities("Atlantis"), None);
    }

    #[test]
    fn test_default_cause_is_known() {
        assert!(is_known_cause(DEFAULT_CAUSE));
        assert!(!is_known_cause("NotARealCause"));
    }

    #[test]
    fn test_risk_text_distinct() {
        assert_ne!(risk_text(RiskLabel::High), risk_text(RiskLabel::Low));
    }
}
