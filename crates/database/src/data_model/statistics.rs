use model::statistics::{JourneyStatistics, TopStationsQueryResult};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct JourneyStatisticsRow {
    pub departure_count: i64,
    pub arrival_count: i64,
    pub departure_average_distance: f64,
    pub arrival_average_distance: f64,
}

impl JourneyStatisticsRow {
    pub fn to_model(self) -> JourneyStatistics {
        JourneyStatistics {
            departure_count: self.departure_count,
            arrival_count: self.arrival_count,
            departure_average_distance: self.departure_average_distance,
            arrival_average_distance: self.arrival_average_distance,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct TopStationsRow {
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    pub journey_count: i64,
}

impl TopStationsRow {
    pub fn to_model(self) -> TopStationsQueryResult {
        TopStationsQueryResult {
            departure_station_id: self.departure_station_id,
            arrival_station_id: self.arrival_station_id,
            journey_count: self.journey_count,
        }
    }
}
