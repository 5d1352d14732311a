use std::convert::Infallible;
use std::fmt;
use std::fmt::Formatter;
use std::str::FromStr;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, TimestampSeconds};
use crate::serialize_dt_txt;

/// Weather condition group as reported in the `main` field of the weather API.
/// Groups outside the known set keep their raw label.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Clear,
    Clouds,
    Mist,
    Smoke,
    Haze,
    Dust,
    Fog,
    Sand,
    Ash,
    Squall,
    Tornado,
    Unknown(String),
}

impl Condition {
    /// Returns true if the condition counts as rain when deciding whether to notify.
    /// Drizzle is grouped together with rain.
    pub fn is_wet(&self) -> bool {
        matches!(self, Condition::Rain | Condition::Drizzle)
    }

    /// Returns the background scene used when displaying the condition
    ///
    pub fn scene(&self) -> Option<Scene> {
        match self {
            Condition::Clear => Some(Scene::Sunny),
            Condition::Clouds => Some(Scene::Cloudy),
            Condition::Rain | Condition::Drizzle => Some(Scene::Rainy),
            Condition::Thunderstorm | Condition::Squall | Condition::Tornado => Some(Scene::Stormy),
            Condition::Snow => Some(Scene::Snowy),
            Condition::Mist | Condition::Fog | Condition::Haze | Condition::Smoke => Some(Scene::Foggy),
            Condition::Dust | Condition::Sand | Condition::Ash => Some(Scene::Dusty),
            Condition::Unknown(_) => None,
        }
    }
}

impl FromStr for Condition {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let condition = match label.to_lowercase().as_str() {
            "thunderstorm" => Condition::Thunderstorm,
            "drizzle" => Condition::Drizzle,
            "rain" => Condition::Rain,
            "snow" => Condition::Snow,
            "clear" => Condition::Clear,
            "clouds" => Condition::Clouds,
            "mist" => Condition::Mist,
            "smoke" => Condition::Smoke,
            "haze" => Condition::Haze,
            "dust" => Condition::Dust,
            "fog" => Condition::Fog,
            "sand" => Condition::Sand,
            "ash" => Condition::Ash,
            "squall" => Condition::Squall,
            "tornado" => Condition::Tornado,
            _ => Condition::Unknown(label.to_string()),
        };

        Ok(condition)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Condition::Thunderstorm => "Thunderstorm",
            Condition::Drizzle => "Drizzle",
            Condition::Rain => "Rain",
            Condition::Snow => "Snow",
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Mist => "Mist",
            Condition::Smoke => "Smoke",
            Condition::Haze => "Haze",
            Condition::Dust => "Dust",
            Condition::Fog => "Fog",
            Condition::Sand => "Sand",
            Condition::Ash => "Ash",
            Condition::Squall => "Squall",
            Condition::Tornado => "Tornado",
            Condition::Unknown(label) => label.as_str(),
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scene {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
    Dusty,
}

/// One 3-hour forecast reading
///
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSample {
    #[serde(with = "serialize_dt_txt")]
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: u8,
    pub visibility: Option<u32>,
    #[serde_as(as = "DisplayFromStr")]
    pub condition: Condition,
    pub icon: String,
    pub description: String,
    pub wind_speed: f64,
    pub wind_direction: u16,
}

/// A fixed 3-hour aligned point in time for the today strip, possibly bound to a sample
///
#[derive(Debug, Clone, PartialEq)]
pub struct DaySlot {
    pub time: NaiveDateTime,
    pub sample: Option<ForecastSample>,
}

impl DaySlot {
    /// Temperature rounded to whole degrees, or "N/A" for an empty slot
    ///
    pub fn temperature_label(&self) -> String {
        match &self.sample {
            Some(s) => format!("{}°C", s.temperature.round() as i64),
            None => "N/A".to_string(),
        }
    }

    pub fn icon(&self) -> &str {
        self.sample.as_ref().map(|s| s.icon.as_str()).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions at the resolved location
///
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub name: String,
    pub coord: Coordinates,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub observed_at: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    #[serde_as(as = "DisplayFromStr")]
    pub condition: Condition,
    pub icon: String,
    pub description: String,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunrise: DateTime<Utc>,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub sunset: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Pollutants {
    pub co: f64,
    pub no: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub nh3: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AirQuality {
    pub aqi: u8,
    pub components: Pollutants,
}

/// Raised when rain is forecast within the lookahead horizon
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainAlert {
    #[serde(with = "serialize_dt_txt")]
    pub expected_at: NaiveDateTime,
    #[serde(with = "serialize_dt_txt")]
    pub raised_at: NaiveDateTime,
}

/// Everything fetched in one refresh cycle. A new snapshot always replaces the old one whole.
///
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub current: Option<CurrentWeather>,
    pub forecast: Vec<ForecastSample>,
    pub air_quality: Option<AirQuality>,
    pub uv_index: Option<f64>,
    pub fetched_at: Option<NaiveDateTime>,
    pub rain_alert: Option<RainAlert>,
}
