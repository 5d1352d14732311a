mod errors;
mod logging;
mod initialization;
mod handlers;
mod models;
mod forecast_buckets;
mod indices;
mod location;
mod manager_owm;
mod manager_geocode;
mod manager_dashboard;
mod serialize_dt_txt;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use log::info;
use tokio::sync::Mutex;
use crate::errors::UnrecoverableError;
use crate::forecast_buckets::{Clock, SystemClock};
use crate::handlers::{air_quality, alert, current, today, upcoming, uv};
use crate::initialization::config;
use crate::manager_dashboard::{run_dashboard, DashboardManager, LogNotifier};
use crate::manager_geocode::Geocoder;
use crate::manager_owm::OWM;
use crate::models::Dashboard;

struct AppState {
    dashboard: Arc<Mutex<Dashboard>>,
    clock: Arc<dyn Clock>,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let dashboard: Arc<Mutex<Dashboard>> = Arc::new(Mutex::new(Dashboard::default()));

    let manager = DashboardManager::new(
        OWM::new(&config.owm.base_url, &config.owm.api_key)?,
        Geocoder::new(&config.geocode.base_url)?,
        config.location.clone(),
        clock.clone(),
        Box::new(LogNotifier),
    );

    info!("refreshing dashboard every {} seconds", config.general.refresh_interval.as_secs());
    tokio::spawn(run_dashboard(dashboard.clone(), manager, config.general.refresh_interval));

    let web_data = web::Data::new(AppState { dashboard, clock });

    info!("starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(web_data.clone())
            .service(current)
            .service(today)
            .service(upcoming)
            .service(air_quality)
            .service(uv)
            .service(alert)
    })
        .bind((config.web_server.bind_address.as_str(), config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
