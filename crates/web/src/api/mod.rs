pub mod journeys;
pub mod stations;
