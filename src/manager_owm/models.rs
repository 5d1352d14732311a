use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, TimestampSeconds};
use crate::models::{Condition, Pollutants};
use crate::serialize_dt_txt;

#[derive(Deserialize)]
pub struct MainValues {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
}

#[serde_as]
#[derive(Deserialize)]
pub struct WeatherDescription {
    #[serde_as(as = "DisplayFromStr")]
    pub main: Condition,
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize)]
pub struct Wind {
    pub speed: f64,
    #[serde(default)]
    pub deg: u16,
}

#[derive(Deserialize)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[serde_as]
#[derive(Deserialize)]
pub struct Sys {
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunrise: DateTime<Utc>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunset: DateTime<Utc>,
}

#[serde_as]
#[derive(Deserialize)]
pub struct CurrentResponse {
    pub name: String,
    pub coord: Coord,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub dt: DateTime<Utc>,
    pub main: MainValues,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    pub wind: Wind,
    pub sys: Sys,
}

#[derive(Deserialize)]
pub struct ForecastItem {
    #[serde(with = "serialize_dt_txt")]
    pub dt_txt: NaiveDateTime,
    pub main: MainValues,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    pub wind: Wind,
    pub visibility: Option<u32>,
}

#[derive(Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

#[derive(Deserialize)]
pub struct AqiValue {
    pub aqi: u8,
}

#[derive(Deserialize)]
pub struct AirPollutionItem {
    pub main: AqiValue,
    pub components: Pollutants,
}

#[derive(Deserialize)]
pub struct AirPollutionResponse {
    pub list: Vec<AirPollutionItem>,
}

#[derive(Deserialize)]
pub struct UvResponse {
    pub value: f64,
}
