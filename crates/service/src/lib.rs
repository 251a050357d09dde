pub mod config;
pub mod error;
pub mod fields;
pub mod journey;
pub mod keyset;
pub mod station;
pub mod statistics;

pub use error::QueryError;
