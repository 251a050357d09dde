use serde::{Deserialize, Serialize};

/// Directional journey counts and average distances for one station,
/// computed in a single aggregate pass. Averages are 0.0 when no journeys
/// contribute, never null.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyStatistics {
    pub departure_count: i64,
    pub arrival_count: i64,
    pub departure_average_distance: f64,
    pub arrival_average_distance: f64,
}

/// One correspondent station and how many journeys connect it to the
/// queried station in the relevant direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStation {
    pub id: i32,
    pub journey_count: i64,
}

/// Raw grouped row from the top-correspondent query, before it is split
/// and relabeled relative to the queried station.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopStationsQueryResult {
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    pub journey_count: i64,
}

/// Computed-on-read aggregate for one station. Both top lists are bounded
/// by the configured per-direction limit and ordered by descending journey
/// count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStatistics {
    pub departure_count: i64,
    pub arrival_count: i64,
    pub departure_average_distance: f64,
    pub arrival_average_distance: f64,
    pub top_stations_for_arriving_here: Vec<TopStation>,
    pub top_stations_for_departing_to: Vec<TopStation>,
}
