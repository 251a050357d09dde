use serde::{Deserialize, Serialize};

/// Listing projection of a station: the columns shown in paginated station
/// listings and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: i32,
    pub name_finnish: String,
    pub address_finnish: String,
    pub city_finnish: String,
    pub operator: String,
    pub capacity: i32,
}

/// Full multilingual station record as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetails {
    pub id: i32,
    pub name_finnish: String,
    pub name_swedish: String,
    pub name_english: String,
    pub address_finnish: String,
    pub address_swedish: String,
    pub city_finnish: String,
    pub city_swedish: String,
    pub operator: String,
    pub capacity: i32,
    pub longitude: f64,
    pub latitude: f64,
}

/// Minimal id/name pair, e.g. for populating selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationLimited {
    pub id: i32,
    pub name_finnish: String,
}

/// A station about to be inserted by the loader. `modified_at`/`created_at`
/// are assigned at insert time.
#[derive(Debug, Clone, PartialEq)]
pub struct StationNew {
    pub id: i32,
    pub name_finnish: String,
    pub name_swedish: String,
    pub name_english: String,
    pub address_finnish: String,
    pub address_swedish: String,
    pub city_finnish: String,
    pub city_swedish: String,
    pub operator: String,
    pub capacity: i32,
    pub longitude: f64,
    pub latitude: f64,
}
