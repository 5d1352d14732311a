use serde::Deserialize;

#[derive(Deserialize)]
pub struct Address {
    pub suburb: Option<String>,
    pub state_district: Option<String>,
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
}

#[derive(Deserialize)]
pub struct ReverseResponse {
    pub address: Option<Address>,
}
