use serde::Deserialize;
use crate::errors::ConfigError;

/// The ways a location to show weather for can be given
///
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Location {
    Name { name: String },
    Zip { zip: String, country: String },
    Coordinates { lat: f64, lon: f64 },
}

impl Location {
    /// Checks that the location is usable for a lookup
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Location::Name { name } => {
                if name.trim().is_empty() {
                    return Err(ConfigError::from("Location name is required"));
                }
            },
            Location::Zip { zip, country } => {
                let zip = zip.trim();
                if zip.is_empty() {
                    return Err(ConfigError::from("ZIP code is required"));
                }
                if !(4..=10).contains(&zip.len()) || !zip.chars().all(|c| c.is_ascii_digit()) {
                    return Err(ConfigError::from("Enter a valid ZIP code"));
                }
                if country.trim().is_empty() {
                    return Err(ConfigError::from("Please select a country"));
                }
            },
            Location::Coordinates { lat, lon } => {
                if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lon) {
                    return Err(ConfigError::from("Coordinates out of range"));
                }
            },
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(zip: &str, country: &str) -> Location {
        Location::Zip { zip: zip.to_string(), country: country.to_string() }
    }

    fn message(location: Location) -> Option<String> {
        location.validate().err().map(|e| e.0)
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(message(Location::Name { name: "  ".to_string() }).as_deref(), Some("Location name is required"));
        assert!(Location::Name { name: "Pune".to_string() }.validate().is_ok());
    }

    #[test]
    fn zip_rules() {
        assert_eq!(message(zip("", "SE")).as_deref(), Some("ZIP code is required"));
        assert_eq!(message(zip("123", "SE")).as_deref(), Some("Enter a valid ZIP code"));
        assert_eq!(message(zip("12345678901", "SE")).as_deref(), Some("Enter a valid ZIP code"));
        assert_eq!(message(zip("12a45", "SE")).as_deref(), Some("Enter a valid ZIP code"));
        assert_eq!(message(zip("11122", "")).as_deref(), Some("Please select a country"));
        assert!(zip(" 411001 ", "IN").validate().is_ok());
    }

    #[test]
    fn coordinates_range() {
        assert!(Location::Coordinates { lat: 59.3, lon: 18.1 }.validate().is_ok());
        assert!(Location::Coordinates { lat: 91.0, lon: 0.0 }.validate().is_err());
        assert!(Location::Coordinates { lat: 0.0, lon: -181.0 }.validate().is_err());
    }

    #[test]
    fn reads_tagged_toml() {
        let location: Location = toml::from_str("type = \"zip\"\nzip = \"11122\"\ncountry = \"SE\"").unwrap();

        assert_eq!(location, zip("11122", "SE"));
    }
}
