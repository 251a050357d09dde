use chrono::{DateTime, Utc};
use model::journey::Journey;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct JourneyRow {
    pub id: i64,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    pub distance: i32,
    pub duration: i32,
}

impl JourneyRow {
    pub fn to_model(self) -> Journey {
        Journey {
            id: self.id,
            departure_at: self.departure_at,
            arrival_at: self.arrival_at,
            departure_station_id: self.departure_station_id,
            arrival_station_id: self.arrival_station_id,
            distance: self.distance,
            duration: self.duration,
        }
    }
}
