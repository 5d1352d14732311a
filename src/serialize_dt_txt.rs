use chrono::NaiveDateTime;
use serde::{self, Deserialize, Deserializer, Serializer};
use serde::de::Error;

const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Serializer for serde with to serialize a chrono `NaiveDateTime` into the forecast
/// `dt_txt` format, i.e. `2025-06-01 15:00:00`.
/// This function is not used directly but rather from struct fields with a serde with attribute
/// pointing to this module
///
/// # Arguments
///
/// * 'date_time' - the date time object
/// * 'serializer' - serializer given from serde
pub fn serialize<S>(
    date_time: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date_time.format(FORMAT).to_string())
}

/// Deserializer for serde with to read a forecast `dt_txt` string into a `NaiveDateTime`.
/// The string carries no timezone and is kept as civil time.
///
/// # Arguments
///
/// * 'd' - deserializer given from serde
pub fn deserialize<'de, D>(d: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(d)?;

    NaiveDateTime::parse_from_str(&s, FORMAT)
        .map_err(|e| D::Error::custom(format!("unable to parse '{}' as dt_txt: {}", s, e)))
}

/// The same format for optional values, serializing `None` as null
pub mod option {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    /// Serializer for serde with for an optional `NaiveDateTime`
    ///
    /// # Arguments
    ///
    /// * 'date_time' - the optional date time object
    /// * 'serializer' - serializer given from serde
    pub fn serialize<S>(
        date_time: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date_time {
            Some(dt) => serializer.serialize_some(&dt.format(super::FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}
