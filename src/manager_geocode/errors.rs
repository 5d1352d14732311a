use std::fmt;
use std::fmt::Formatter;

#[derive(Debug)]
pub struct GeocodeError(pub String);

impl fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "GeocodeError: {}", self.0)
    }
}
impl From<reqwest::Error> for GeocodeError {
    fn from(e: reqwest::Error) -> Self { GeocodeError(e.to_string()) }
}
impl From<serde_json::Error> for GeocodeError {
    fn from(e: serde_json::Error) -> Self { GeocodeError(e.to_string()) }
}
