pub mod errors;
mod models;

use std::time::Duration;
use log::info;
use reqwest::Client;
use crate::manager_geocode::errors::GeocodeError;
use crate::manager_geocode::models::{Address, ReverseResponse};
use crate::models::Coordinates;

const USER_AGENT: &str = concat!("weatherdash/", env!("CARGO_PKG_VERSION"));

/// Struct for turning coordinates into place names using Nominatim
pub struct Geocoder {
    client: Client,
    base_url: String,
}

impl Geocoder {
    /// Returns a Geocoder ready for reverse lookups
    ///
    /// # Arguments
    ///
    /// * 'base_url' - scheme and host of the Nominatim service
    pub fn new(base_url: &str) -> Result<Geocoder, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Returns a place name for the given coordinates, or None if the address has no usable part
    ///
    /// # Arguments
    ///
    /// * 'coord' - latitude and longitude
    pub async fn reverse(&self, coord: Coordinates) -> Result<Option<String>, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);

        let req = self.client
            .get(url)
            .query(&[("lat", coord.lat.to_string()), ("lon", coord.lon.to_string()), ("format", "json".to_string())])
            .header("Accept-Language", "en")
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(GeocodeError(format!("reverse lookup failed: {}", status)));
        }

        let json = req.text().await?;
        let res: ReverseResponse = serde_json::from_str(&json)?;

        let name = res.address.and_then(place_name);
        if let Some(n) = &name {
            info!("reverse geocoded {},{} to {}", coord.lat, coord.lon, n);
        }

        Ok(name)
    }
}

/// Suburb first, then the first word of the state district, then city, town or village
///
fn place_name(address: Address) -> Option<String> {
    let non_empty = |s: &String| !s.trim().is_empty();

    address.suburb.filter(non_empty)
        .or_else(|| address.state_district
            .and_then(|d| d.split_whitespace().next().map(str::to_string)))
        .or(address.city.filter(non_empty))
        .or(address.town.filter(non_empty))
        .or(address.village.filter(non_empty))
}
