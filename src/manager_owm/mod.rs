pub mod errors;
mod models;

use std::time::Duration;
use log::info;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::models::{AirPollutionResponse, CurrentResponse, ForecastResponse, UvResponse, WeatherDescription};
use crate::models::{AirQuality, Condition, Coordinates, CurrentWeather, ForecastSample};

/// Struct for managing weather data from OpenWeatherMap
pub struct OWM {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OWM {
    /// Returns an OWM struct ready for fetching weather data
    ///
    /// # Arguments
    ///
    /// * 'base_url' - scheme and host of the API, e.g. https://api.openweathermap.org
    /// * 'api_key' - the API key to send with each request
    pub fn new(base_url: &str, api_key: &str) -> Result<OWM, OWMError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Retrieves current weather for a location name, e.g. a city
    ///
    /// # Arguments
    ///
    /// * 'name' - location name
    pub async fn current_by_name(&self, name: &str) -> Result<CurrentWeather, OWMError> {
        let res: CurrentResponse = self.get("/data/2.5/weather", &[("q", name.to_string())]).await?;

        Ok(to_current(res))
    }

    /// Retrieves current weather for a postal code within a country
    ///
    /// # Arguments
    ///
    /// * 'zip' - postal code
    /// * 'country' - ISO 3166 country code
    pub async fn current_by_zip(&self, zip: &str, country: &str) -> Result<CurrentWeather, OWMError> {
        let res: CurrentResponse = self.get("/data/2.5/weather", &[("zip", format!("{},{}", zip, country))]).await?;

        Ok(to_current(res))
    }

    /// Retrieves current weather for a coordinate pair
    ///
    /// # Arguments
    ///
    /// * 'coord' - latitude and longitude
    pub async fn current_by_coordinates(&self, coord: Coordinates) -> Result<CurrentWeather, OWMError> {
        let res: CurrentResponse = self.get("/data/2.5/weather", &lat_lon(coord)).await?;

        Ok(to_current(res))
    }

    /// Retrieves the 5 day forecast in 3 hour steps, in the order given by the API
    ///
    /// # Arguments
    ///
    /// * 'coord' - latitude and longitude
    pub async fn forecast(&self, coord: Coordinates) -> Result<Vec<ForecastSample>, OWMError> {
        let res: ForecastResponse = self.get("/data/2.5/forecast", &lat_lon(coord)).await?;

        let forecast = res.list
            .into_iter()
            .map(|item| {
                let (condition, icon, description) = describe(&item.weather);
                ForecastSample {
                    timestamp: item.dt_txt,
                    temperature: item.main.temp,
                    humidity: item.main.humidity,
                    visibility: item.visibility,
                    condition,
                    icon,
                    description,
                    wind_speed: item.wind.speed,
                    wind_direction: item.wind.deg,
                }
            })
            .collect::<Vec<ForecastSample>>();

        info!("received {} forecast samples", forecast.len());

        Ok(forecast)
    }

    /// Retrieves the current air quality index and pollutant concentrations
    ///
    /// # Arguments
    ///
    /// * 'coord' - latitude and longitude
    pub async fn air_quality(&self, coord: Coordinates) -> Result<AirQuality, OWMError> {
        let res: AirPollutionResponse = self.get("/data/2.5/air_pollution", &lat_lon(coord)).await?;

        let item = res.list
            .into_iter()
            .next()
            .ok_or_else(|| OWMError::Document("no air quality data in response".to_string()))?;

        Ok(AirQuality { aqi: item.main.aqi, components: item.components })
    }

    /// Retrieves the current UV index
    ///
    /// # Arguments
    ///
    /// * 'coord' - latitude and longitude
    pub async fn uv_index(&self, coord: Coordinates) -> Result<f64, OWMError> {
        let res: UvResponse = self.get("/data/2.5/uvi", &lat_lon(coord)).await?;

        Ok(res.value)
    }

    /// Makes a GET request and parses the returned document
    ///
    /// # Arguments
    ///
    /// * 'path' - endpoint path
    /// * 'query' - query parameters besides api key and units
    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, OWMError> {
        let url = format!("{}{}", self.base_url, path);

        let req = self.client
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OWMError::OWM(format!("Error while fetching {} from OpenWeatherMap: {}", path, status)));
        }

        let json = req.text().await?;

        Ok(serde_json::from_str(&json)?)
    }
}

fn lat_lon(coord: Coordinates) -> [(&'static str, String); 2] {
    [("lat", coord.lat.to_string()), ("lon", coord.lon.to_string())]
}

/// Picks condition, icon and description from the first weather entry, if any
///
fn describe(weather: &[WeatherDescription]) -> (Condition, String, String) {
    match weather.first() {
        Some(w) => (w.main.clone(), w.icon.clone(), w.description.clone()),
        None => (Condition::Unknown(String::new()), String::new(), String::new()),
    }
}

fn to_current(res: CurrentResponse) -> CurrentWeather {
    let (condition, icon, description) = describe(&res.weather);

    CurrentWeather {
        name: res.name,
        coord: Coordinates { lat: res.coord.lat, lon: res.coord.lon },
        observed_at: res.dt,
        temperature: res.main.temp,
        feels_like: res.main.feels_like,
        temp_min: res.main.temp_min,
        temp_max: res.main.temp_max,
        humidity: res.main.humidity,
        wind_speed: res.wind.speed,
        condition,
        icon,
        description,
        sunrise: res.sys.sunrise,
        sunset: res.sys.sunset,
    }
}
