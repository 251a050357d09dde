use model::station::{Station, StationDetails, StationLimited};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct StationDetailsRow {
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

impl StationDetailsRow {
    pub fn to_model(self) -> StationDetails {
        StationDetails {
            id: self.id,
            name_finnish: self.name_finnish,
            name_swedish: self.name_swedish,
            name_english: self.name_english,
            address_finnish: self.address_finnish,
            address_swedish: self.address_swedish,
            city_finnish: self.city_finnish,
            city_swedish: self.city_swedish,
            operator: self.operator,
            capacity: self.capacity,
            longitude: self.longitude,
            latitude: self.latitude,
        }
    }
}

/// Listing/search row. `total_count` is the window-function total over the
/// whole matching set, repeated on every row; `match_count` is only
/// meaningful on the search path and fixed to zero on the plain listing.
#[derive(Debug, Clone, FromRow)]
pub struct StationListRow {
    pub total_count: i64,
    pub match_count: i64,
    pub id: i32,
    pub name_finnish: String,
    pub address_finnish: String,
    pub city_finnish: String,
    pub operator: String,
    pub capacity: i32,
}

impl StationListRow {
    pub fn to_model(self) -> Station {
        Station {
            id: self.id,
            name_finnish: self.name_finnish,
            address_finnish: self.address_finnish,
            city_finnish: self.city_finnish,
            operator: self.operator,
            capacity: self.capacity,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct StationLimitedRow {
    pub id: i32,
    pub name_finnish: String,
}

impl StationLimitedRow {
    pub fn to_model(self) -> StationLimited {
        StationLimited {
            id: self.id,
            name_finnish: self.name_finnish,
        }
    }
}
