pub mod journey;
pub mod station;
pub mod statistics;
