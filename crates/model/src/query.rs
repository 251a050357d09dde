use chrono::{DateTime, Utc};

/// Semantic type of a sortable column's value, used to pick how a cursor
/// token is parsed and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeysetValueKind {
    /// Encoded as epoch seconds.
    Timestamp,
    /// 64-bit integer, decimal string.
    BigInt,
    /// 32-bit integer, decimal string.
    Int,
}

impl KeysetValueKind {
    pub fn name(self) -> &'static str {
        match self {
            KeysetValueKind::Timestamp => "timestamp",
            KeysetValueKind::BigInt => "bigint",
            KeysetValueKind::Int => "integer",
        }
    }
}

/// A typed value of the column currently sorted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeysetValue {
    Timestamp(DateTime<Utc>),
    BigInt(i64),
    Int(i32),
}

/// Seek position carried between pages: the last seen primary sort value
/// and the last seen row id as the deterministic tie-break. Constructed
/// from a decoded cursor and consumed by exactly one listing query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaginationKeyset {
    pub value: KeysetValue,
    pub id: i64,
}
