use std::{error::Error, fmt};

use database::DatabaseError;
use model::query::KeysetValueKind;

/// Deterministic, input-derived query failures plus the store failure
/// escape hatch. Everything except `Database` is caller-caused and detected
/// before any query runs.
#[derive(Debug)]
pub enum QueryError {
    /// Unknown sort field name was requested.
    InvalidField(String),
    /// Cursor string is malformed: wrong token count or an empty token.
    InvalidCursor,
    /// Cursor's primary value could not be parsed to the resolved field's
    /// type. Keeps the raw value and target type for diagnostics.
    CursorValueType {
        value: String,
        expected: KeysetValueKind,
    },
    NotFound,
    BadRequest(String),
    Database(DatabaseError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidField(name) => {
                write!(f, "unknown orderBy field `{}`", name)
            }
            QueryError::InvalidCursor => write!(f, "invalid cursor"),
            QueryError::CursorValueType { value, expected } => {
                write!(
                    f,
                    "failed to parse cursor value `{}` as {}",
                    value,
                    expected.name()
                )
            }
            QueryError::NotFound => write!(f, "not found"),
            QueryError::BadRequest(message) => write!(f, "{}", message),
            QueryError::Database(why) => write!(f, "database error: {}", why),
        }
    }
}

impl Error for QueryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueryError::Database(why) => Some(why),
            _ => None,
        }
    }
}

impl From<DatabaseError> for QueryError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::NotFound => QueryError::NotFound,
            other => QueryError::Database(other),
        }
    }
}
