use serde::{Deserialize, Serialize};

pub mod journey;
pub mod query;
pub mod station;
pub mod statistics;

/// Sort direction for listing queries. Serialized form matches the query
/// parameter values (`asc`/`desc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}
