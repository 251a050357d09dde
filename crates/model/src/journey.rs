use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single bike journey between two stations. Immutable after the bulk
/// load; `id` is assigned by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Journey {
    pub id: i64,
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    /// Meters.
    pub distance: i32,
    /// Seconds.
    pub duration: i32,
}

/// A journey about to be inserted, before an id exists. The full content
/// tuple is unique in storage, so re-loading the same rows is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyNew {
    pub departure_at: DateTime<Utc>,
    pub arrival_at: DateTime<Utc>,
    pub departure_station_id: i32,
    pub arrival_station_id: i32,
    pub distance: i32,
    pub duration: i32,
}
