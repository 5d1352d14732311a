use std::sync::Arc;
use std::time::Duration;
use log::{error, info, warn};
use tokio::sync::Mutex;
use crate::forecast_buckets::{imminent_rain, notify_imminent_rain, Clock};
use crate::location::Location;
use crate::manager_geocode::Geocoder;
use crate::manager_owm::errors::OWMError;
use crate::manager_owm::OWM;
use crate::models::{Coordinates, CurrentWeather, Dashboard, ForecastSample, RainAlert};

/// Receiver of weather alerts raised during a refresh
///
pub trait Notifier: Send + Sync {
    fn rain_expected(&self, sample: &ForecastSample);
    fn currently_raining(&self, current: &CurrentWeather);
}

/// Notifier that writes alerts to the log
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn rain_expected(&self, sample: &ForecastSample) {
        warn!("Rain is expected within the next few hours ({}, {})", sample.timestamp, sample.description);
    }

    fn currently_raining(&self, current: &CurrentWeather) {
        info!("It's currently raining in {}", current.name);
    }
}

/// Fetches weather data for one location and keeps the shared dashboard snapshot up to date
pub struct DashboardManager {
    owm: OWM,
    geocoder: Geocoder,
    location: Location,
    clock: Arc<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl DashboardManager {
    /// Returns a new DashboardManager
    ///
    /// # Arguments
    ///
    /// * 'owm' - weather data provider
    /// * 'geocoder' - used to name a location given by coordinates
    /// * 'location' - the location to show weather for
    /// * 'clock' - source of current time
    /// * 'notifier' - receiver of rain alerts
    pub fn new(owm: OWM, geocoder: Geocoder, location: Location, clock: Arc<dyn Clock>, notifier: Box<dyn Notifier>) -> Self {
        Self { owm, geocoder, location, clock, notifier }
    }

    /// Runs one fetch cycle and replaces the dashboard snapshot with the result.
    ///
    /// Current weather and forecast are required, if either fails the previous snapshot is
    /// left untouched. Air quality and UV index are optional and only logged on failure.
    /// The notifier is called after the new snapshot is in place.
    ///
    /// # Arguments
    ///
    /// * 'dashboard' - the shared snapshot to replace
    pub async fn refresh(&self, dashboard: &Mutex<Dashboard>) -> Result<(), OWMError> {
        let current = self.resolve_current().await?;
        let forecast = self.owm.forecast(current.coord).await?;

        let air_quality = match self.owm.air_quality(current.coord).await {
            Ok(aq) => Some(aq),
            Err(e) => {
                error!("failed to get air quality: {}", e);
                None
            }
        };
        let uv_index = match self.owm.uv_index(current.coord).await {
            Ok(uv) => Some(uv),
            Err(e) => {
                error!("failed to get uv index: {}", e);
                None
            }
        };

        let now = self.clock.now();
        let rain_alert = imminent_rain(&forecast, now)
            .map(|sample| RainAlert { expected_at: sample.timestamp, raised_at: now });

        let snapshot = Dashboard {
            current: Some(current.clone()),
            forecast: forecast.clone(),
            air_quality,
            uv_index,
            fetched_at: Some(now),
            rain_alert,
        };
        *dashboard.lock().await = snapshot;

        notify_imminent_rain(&forecast, now, |sample| self.notifier.rain_expected(sample));
        if current.condition.is_wet() {
            self.notifier.currently_raining(&current);
        }

        Ok(())
    }

    /// Gets current weather for the configured location.
    ///
    /// Coordinates are first turned into a place name and looked up by name, falling back to a
    /// lookup by coordinates if that doesn't work out.
    async fn resolve_current(&self) -> Result<CurrentWeather, OWMError> {
        match &self.location {
            Location::Name { name } => self.owm.current_by_name(name.trim()).await,
            Location::Zip { zip, country } => self.owm.current_by_zip(zip.trim(), country.trim()).await,
            Location::Coordinates { lat, lon } => {
                let coord = Coordinates { lat: *lat, lon: *lon };
                match self.geocoder.reverse(coord).await {
                    Ok(Some(name)) => match self.owm.current_by_name(&name).await {
                        Ok(current) => Ok(current),
                        Err(e) => {
                            warn!("no weather found for {}, using coordinates: {}", name, e);
                            self.owm.current_by_coordinates(coord).await
                        }
                    },
                    Ok(None) => self.owm.current_by_coordinates(coord).await,
                    Err(e) => {
                        warn!("reverse geocoding failed, using coordinates: {}", e);
                        self.owm.current_by_coordinates(coord).await
                    }
                }
            }
        }
    }
}

/// Dashboard refresh loop
///
/// Cycles run one after the other, a slow fetch delays the next cycle rather than overlapping it.
///
/// # Arguments
///
/// * 'dashboard' - the shared snapshot to keep up to date
/// * 'manager' - the manager doing the fetching
/// * 'interval' - time to wait between cycles
pub async fn run_dashboard(dashboard: Arc<Mutex<Dashboard>>, manager: DashboardManager, interval: Duration) {
    loop {
        match manager.refresh(&dashboard).await {
            Ok(()) => info!("dashboard refreshed"),
            Err(e) => error!("failed to refresh dashboard, keeping previous data: {}", e),
        }

        tokio::time::sleep(interval).await;
    }
}
