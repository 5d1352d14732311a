use chrono::{DateTime, Utc};

/// Returns a humidity level label
///
/// # Arguments
///
/// * 'humidity' - relative humidity in percentage
pub fn humidity_level(humidity: u8) -> &'static str {
    if humidity < 30 {
        "Low"
    } else if humidity <= 60 {
        "Moderate"
    } else {
        "High"
    }
}

/// Returns the label for an air quality index on the 1-5 scale
///
/// # Arguments
///
/// * 'aqi' - air quality index
pub fn air_quality_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "N/A",
    }
}

/// Returns the exposure level for a UV index
///
/// # Arguments
///
/// * 'uv' - UV index
pub fn uv_index_level(uv: f64) -> &'static str {
    if uv.is_nan() || uv < 0.0 {
        "N/A"
    } else if uv <= 2.0 {
        "Low"
    } else if uv <= 5.0 {
        "Moderate"
    } else if uv <= 7.0 {
        "High"
    } else if uv <= 10.0 {
        "Very High"
    } else {
        "Extreme"
    }
}

/// Calculates how far the sun has travelled between sunrise and sunset, in percent
///
/// # Arguments
///
/// * 'now' - point in time to calculate for
/// * 'sunrise' - time of sunrise
/// * 'sunset' - time of sunset
pub fn sun_progress(now: DateTime<Utc>, sunrise: DateTime<Utc>, sunset: DateTime<Utc>) -> f64 {
    if now < sunrise {
        0.0
    } else if now > sunset {
        100.0
    } else {
        let day = (sunset - sunrise).num_seconds();
        if day == 0 {
            return 100.0;
        }
        (now - sunrise).num_seconds() as f64 / day as f64 * 100.0
    }
}
