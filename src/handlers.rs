use actix_web::{get, web, HttpResponse, Responder};
use chrono::NaiveDateTime;
use log::error;
use serde::Serialize;
use crate::AppState;
use crate::forecast_buckets::{bind_today_slots, filter_upcoming};
use crate::indices::{air_quality_label, humidity_level, sun_progress, uv_index_level};
use crate::models::{CurrentWeather, Pollutants, Scene};

#[derive(Serialize)]
struct CurrentView<'a> {
    #[serde(flatten)]
    weather: &'a CurrentWeather,
    humidity_level: &'static str,
    sun_progress: f64,
    scene: Option<Scene>,
    #[serde(with = "crate::serialize_dt_txt::option")]
    fetched_at: Option<NaiveDateTime>,
}

#[derive(Serialize)]
struct SlotView<'a> {
    time: String,
    temp: String,
    icon: &'a str,
    main: String,
    description: &'a str,
}

#[derive(Serialize)]
struct AirQualityView {
    aqi: u8,
    label: &'static str,
    components: Pollutants,
}

#[derive(Serialize)]
struct UvView {
    value: f64,
    level: &'static str,
}

/// Serializes the value into a json response
///
/// # Arguments
///
/// * 'value' - the value to return
fn json_response<T: Serialize>(value: &T) -> HttpResponse {
    match serde_json::to_string_pretty(value) {
        Ok(json) => HttpResponse::Ok().content_type("application/json").body(json),
        Err(e) => {
            error!("failed to serialize response: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/current")]
pub async fn current(data: web::Data<AppState>) -> impl Responder {
    let dashboard = data.dashboard.lock().await;

    match &dashboard.current {
        Some(weather) => json_response(&CurrentView {
            weather,
            humidity_level: humidity_level(weather.humidity),
            sun_progress: sun_progress(data.clock.now_utc(), weather.sunrise, weather.sunset),
            scene: weather.condition.scene(),
            fetched_at: dashboard.fetched_at,
        }),
        None => HttpResponse::ServiceUnavailable().finish(),
    }
}

#[get("/today")]
pub async fn today(data: web::Data<AppState>) -> impl Responder {
    let dashboard = data.dashboard.lock().await;
    let slots = bind_today_slots(&dashboard.forecast, data.clock.now());

    let view = slots
        .iter()
        .map(|slot| SlotView {
            time: slot.time.format("%H:%M").to_string(),
            temp: slot.temperature_label(),
            icon: slot.icon(),
            main: slot.sample.as_ref().map(|s| s.condition.to_string()).unwrap_or_default(),
            description: slot.sample.as_ref().map(|s| s.description.as_str()).unwrap_or(""),
        })
        .collect::<Vec<SlotView>>();

    json_response(&view)
}

#[get("/upcoming")]
pub async fn upcoming(data: web::Data<AppState>) -> impl Responder {
    let dashboard = data.dashboard.lock().await;

    json_response(&filter_upcoming(&dashboard.forecast, data.clock.now()))
}

#[get("/air_quality")]
pub async fn air_quality(data: web::Data<AppState>) -> impl Responder {
    let dashboard = data.dashboard.lock().await;

    match &dashboard.air_quality {
        Some(aq) => json_response(&AirQualityView {
            aqi: aq.aqi,
            label: air_quality_label(aq.aqi),
            components: aq.components,
        }),
        None => HttpResponse::ServiceUnavailable().finish(),
    }
}

#[get("/uv")]
pub async fn uv(data: web::Data<AppState>) -> impl Responder {
    let dashboard = data.dashboard.lock().await;

    match dashboard.uv_index {
        Some(value) => json_response(&UvView { value, level: uv_index_level(value) }),
        None => HttpResponse::ServiceUnavailable().finish(),
    }
}

#[get("/alert")]
pub async fn alert(data: web::Data<AppState>) -> impl Responder {
    let dashboard = data.dashboard.lock().await;

    json_response(&dashboard.rain_alert)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde_json::Value;
    use tokio::sync::Mutex;
    use crate::forecast_buckets::Clock;
    use crate::models::{AirQuality, Condition, Coordinates, Dashboard, ForecastSample, RainAlert};
    use super::*;

    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn now(&self) -> NaiveDateTime {
            self.0
        }

        fn now_utc(&self) -> DateTime<Utc> {
            self.0.and_utc()
        }
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn sample(hour: u32, temperature: f64, condition: Condition) -> ForecastSample {
        ForecastSample {
            timestamp: at(hour),
            temperature,
            humidity: 55,
            visibility: Some(10000),
            condition,
            icon: "04d".to_string(),
            description: "broken clouds".to_string(),
            wind_speed: 2.2,
            wind_direction: 90,
        }
    }

    fn current_weather() -> CurrentWeather {
        CurrentWeather {
            name: "Pune".to_string(),
            coord: Coordinates { lat: 18.52, lon: 73.86 },
            observed_at: Utc.with_ymd_and_hms(2025, 6, 1, 6, 30, 0).unwrap(),
            temperature: 27.4,
            feels_like: 29.0,
            temp_min: 26.0,
            temp_max: 28.1,
            humidity: 72,
            wind_speed: 5.3,
            condition: Condition::Clouds,
            icon: "04d".to_string(),
            description: "broken clouds".to_string(),
            sunrise: Utc.with_ymd_and_hms(2025, 6, 1, 0, 30, 0).unwrap(),
            sunset: Utc.with_ymd_and_hms(2025, 6, 1, 13, 40, 0).unwrap(),
        }
    }

    fn state(dashboard: Dashboard) -> web::Data<AppState> {
        web::Data::new(AppState {
            dashboard: Arc::new(Mutex::new(dashboard)),
            clock: Arc::new(FixedClock(at(12))),
        })
    }

    fn filled() -> Dashboard {
        Dashboard {
            current: Some(current_weather()),
            forecast: vec![
                sample(0, 10.0, Condition::Clear),
                sample(3, 12.0, Condition::Clear),
                sample(6, 15.0, Condition::Clouds),
                sample(9, 18.0, Condition::Clouds),
                sample(15, 21.0, Condition::Rain),
            ],
            air_quality: Some(AirQuality { aqi: 4, components: Pollutants::default() }),
            uv_index: Some(8.2),
            fetched_at: Some(at(12)),
            rain_alert: Some(RainAlert { expected_at: at(15), raised_at: at(12) }),
        }
    }

    #[actix_web::test]
    async fn today_always_has_eight_slots() {
        let app = test::init_service(App::new().app_data(state(filled())).service(today)).await;
        let req = test::TestRequest::get().uri("/today").to_request();
        let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 8);
        assert_eq!(body[0]["time"], "00:00");
        assert_eq!(body[0]["temp"], "10°C");
        assert_eq!(body[2]["main"], "Clouds");
        assert_eq!(body[4]["temp"], "N/A");
        assert_eq!(body[4]["icon"], "");
        assert_eq!(body[5]["temp"], "21°C");
        assert_eq!(body[7]["time"], "21:00");
    }

    #[actix_web::test]
    async fn upcoming_hides_past_samples() {
        let app = test::init_service(App::new().app_data(state(filled())).service(upcoming)).await;
        let req = test::TestRequest::get().uri("/upcoming").to_request();
        let body: Vec<Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 1);
        assert_eq!(body[0]["timestamp"], "2025-06-01 15:00:00");
        assert_eq!(body[0]["condition"], "Rain");
    }

    #[actix_web::test]
    async fn current_includes_derived_labels() {
        let app = test::init_service(App::new().app_data(state(filled())).service(current)).await;
        let req = test::TestRequest::get().uri("/current").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["name"], "Pune");
        assert_eq!(body["humidity_level"], "High");
        assert_eq!(body["scene"], "cloudy");
        assert_eq!(body["sunrise"], 1748737800);
        assert_eq!(body["fetched_at"], "2025-06-01 12:00:00");
    }

    #[actix_web::test]
    async fn sun_progress_follows_injected_clock() {
        let app = test::init_service(App::new().app_data(state(filled())).service(current)).await;
        let req = test::TestRequest::get().uri("/current").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        // 11h30m of a 13h10m day at 12:00 UTC
        let progress = body["sun_progress"].as_f64().unwrap();
        assert!((progress - 41400.0 / 47400.0 * 100.0).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn today_shows_unlisted_condition_verbatim() {
        let mut dashboard = filled();
        dashboard.forecast.push(sample(18, 19.0, "Volcano".parse().unwrap()));
        let app = test::init_service(App::new().app_data(state(dashboard)).service(today).service(upcoming)).await;

        let body: Vec<Value> = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/today").to_request()).await;
        assert_eq!(body[6]["main"], "Volcano");
        assert_eq!(body[4]["main"], "");

        let body: Vec<Value> = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/upcoming").to_request()).await;
        assert_eq!(body[1]["condition"], "Volcano");
    }

    #[actix_web::test]
    async fn air_quality_and_uv_are_labelled() {
        let app = test::init_service(App::new().app_data(state(filled())).service(air_quality).service(uv)).await;

        let req = test::TestRequest::get().uri("/air_quality").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["label"], "Poor");

        let req = test::TestRequest::get().uri("/uv").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["level"], "Very High");
    }

    #[actix_web::test]
    async fn alert_reports_last_rain_alert() {
        let app = test::init_service(App::new().app_data(state(filled())).service(alert)).await;
        let req = test::TestRequest::get().uri("/alert").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["expected_at"], "2025-06-01 15:00:00");
        assert_eq!(body["raised_at"], "2025-06-01 12:00:00");
    }

    #[actix_web::test]
    async fn empty_dashboard_before_first_fetch() {
        let app = test::init_service(
            App::new()
                .app_data(state(Dashboard::default()))
                .service(current)
                .service(today)
                .service(upcoming)
                .service(air_quality)
                .service(uv)
                .service(alert)
        ).await;

        for uri in ["/current", "/air_quality", "/uv"] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        }

        let body: Vec<Value> = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/today").to_request()).await;
        assert!(body.iter().all(|slot| slot["temp"] == "N/A"));

        let body: Vec<Value> = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/upcoming").to_request()).await;
        assert!(body.is_empty());

        let body: Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/alert").to_request()).await;
        assert!(body.is_null());
    }
}
