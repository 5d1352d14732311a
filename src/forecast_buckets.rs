use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use crate::models::{DaySlot, ForecastSample};

/// Number of synthetic slots in the today strip
pub const SLOT_COUNT: usize = 8;

/// Distance between two consecutive slots
pub const SLOT_SPACING: TimeDelta = TimeDelta::hours(3);

/// How far ahead of now a forecast of rain triggers a notification
pub const RAIN_LOOKAHEAD: TimeDelta = TimeDelta::hours(3);

/// Source of the current wall clock time
///
/// Forecast timestamps carry no timezone, so now is given as local civil time as well.
/// Instants from the API such as sunrise and sunset are compared against `now_utc`.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
    fn now_utc(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Binds forecast samples to the eight 3-hour slots of the reference day
///
/// Slot `i` is at local midnight of the reference day plus `i * 3` hours. Each slot takes the
/// first sample in the given order that has the same calendar date and the same hour of day,
/// any minutes or seconds are not considered. Slots without an exact match stay empty, which
/// is also the result for every slot if the samples don't cover the reference day at all.
///
/// # Arguments
///
/// * 'samples' - forecast samples, ascending by time
/// * 'reference' - any point in time on the day to bind slots for
pub fn bind_today_slots(samples: &[ForecastSample], reference: NaiveDateTime) -> [DaySlot; SLOT_COUNT] {
    let midnight = reference.date().and_time(NaiveTime::MIN);

    std::array::from_fn(|i| {
        let time = midnight + SLOT_SPACING * i as i32;
        let sample = samples
            .iter()
            .find(|s| s.timestamp.date() == time.date() && s.timestamp.hour() == time.hour())
            .cloned();

        DaySlot { time, sample }
    })
}

/// Returns the samples at or after now, in their original order
///
/// # Arguments
///
/// * 'samples' - forecast samples
/// * 'now' - current local time
pub fn filter_upcoming(samples: &[ForecastSample], now: NaiveDateTime) -> Vec<&ForecastSample> {
    samples.iter().filter(|s| s.timestamp >= now).collect()
}

/// Returns the first upcoming sample forecasting rain no later than now plus the lookahead
///
/// # Arguments
///
/// * 'samples' - forecast samples, ascending by time
/// * 'now' - current local time
pub fn imminent_rain(samples: &[ForecastSample], now: NaiveDateTime) -> Option<&ForecastSample> {
    let horizon = now + RAIN_LOOKAHEAD;

    filter_upcoming(samples, now)
        .into_iter()
        .find(|s| s.condition.is_wet() && s.timestamp <= horizon)
}

/// Scans the samples for imminent rain and calls `notify` at most once with the first hit.
/// Returns whether a notification was made.
///
/// Nothing is remembered between calls, a later scan with a new now may notify about the
/// same sample again.
///
/// # Arguments
///
/// * 'samples' - forecast samples, ascending by time
/// * 'now' - current local time
/// * 'notify' - called with the sample that triggered the notification
pub fn notify_imminent_rain<F>(samples: &[ForecastSample], now: NaiveDateTime, notify: F) -> bool
where
    F: FnOnce(&ForecastSample),
{
    match imminent_rain(samples, now) {
        Some(sample) => {
            notify(sample);
            true
        },
        None => false,
    }
}
