use std::env;
use std::fs;
use std::time::Duration;
use log::info;
use serde::Deserialize;
use serde_with::{serde_as, DurationSeconds};
use crate::errors::ConfigError;
use crate::location::Location;
use crate::logging::setup_logger;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const API_KEY_ENV: &str = "OWM_API_KEY";

#[derive(Deserialize, Clone, Debug)]
pub struct WebServerParameters {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct OWMParameters {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_owm_url")]
    pub base_url: String,
}

#[derive(Deserialize, Clone, Debug)]
pub struct GeocodeParameters {
    #[serde(default = "default_geocode_url")]
    pub base_url: String,
}

impl Default for GeocodeParameters {
    fn default() -> Self {
        GeocodeParameters { base_url: default_geocode_url() }
    }
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct General {
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: Duration,
}

#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub web_server: WebServerParameters,
    pub owm: OWMParameters,
    #[serde(default)]
    pub geocode: GeocodeParameters,
    pub location: Location,
    pub general: General,
}

fn default_owm_url() -> String { "https://api.openweathermap.org".to_string() }
fn default_geocode_url() -> String { "https://nominatim.openstreetmap.org".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_refresh_interval() -> Duration { Duration::from_secs(600) }

/// Returns the application configuration with logging set up.
///
/// The path to the config file is given as the first program argument, defaulting to
/// config.toml in the working directory.
pub fn config() -> Result<Config, ConfigError> {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path, env::var(API_KEY_ENV).ok())?;

    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;
    info!("configuration loaded from {}", path);

    Ok(config)
}

/// Reads and validates the configuration file
///
/// # Arguments
///
/// * 'path' - path to the TOML config file
/// * 'api_key_override' - api key that takes precedence over the one in the file
pub fn load_config(path: &str, api_key_override: Option<String>) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(path)?;
    let mut config: Config = toml::from_str(&toml)?;

    if let Some(key) = api_key_override.filter(|k| !k.trim().is_empty()) {
        config.owm.api_key = key;
    }
    if config.owm.api_key.trim().is_empty() {
        return Err(ConfigError::from("missing OpenWeatherMap api key"));
    }
    if config.general.refresh_interval.is_zero() {
        return Err(ConfigError::from("refresh interval must be greater than zero"));
    }
    config.location.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use tempfile::NamedTempFile;
    use super::*;

    fn write_config(toml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();
        file
    }

    const FULL: &str = r#"
[web_server]
bind_address = "127.0.0.1"
bind_port = 8080

[owm]
api_key = "file-key"

[location]
type = "name"
name = "Pune"

[general]
log_path = "/tmp/weatherdash.log"
refresh_interval = 300
"#;

    #[test]
    fn reads_config_with_defaults() {
        let file = write_config(FULL);
        let config = load_config(file.path().to_str().unwrap(), None).unwrap();

        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.owm.api_key, "file-key");
        assert_eq!(config.owm.base_url, "https://api.openweathermap.org");
        assert_eq!(config.geocode.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.location, Location::Name { name: "Pune".to_string() });
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.general.refresh_interval, Duration::from_secs(300));
    }

    #[test]
    fn env_key_overrides_file_key() {
        let file = write_config(FULL);
        let config = load_config(file.path().to_str().unwrap(), Some("env-key".to_string())).unwrap();

        assert_eq!(config.owm.api_key, "env-key");
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let file = write_config(&FULL.replace("api_key = \"file-key\"", ""));
        let res = load_config(file.path().to_str().unwrap(), None);

        assert!(res.is_err());
    }

    #[test]
    fn invalid_location_is_rejected() {
        let file = write_config(&FULL.replace("name = \"Pune\"", "name = \"\""));
        let err = load_config(file.path().to_str().unwrap(), None).unwrap_err();

        assert_eq!(err.0, "Location name is required");
    }

    #[test]
    fn missing_file_is_error() {
        assert!(load_config("/nonexistent/weatherdash.toml", None).is_err());
    }
}
