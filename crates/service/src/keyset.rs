//! Opaque cursor codec for keyset pagination.
//!
//! A cursor is two `|`-separated tokens: the primary sort value followed by
//! the row id tie-break. Only the minimum needed to resume a seek is
//! encoded, never the full row, so cursors stay valid under concurrent
//! inserts (no offset drift).

use chrono::DateTime;
use model::query::{KeysetValue, KeysetValueKind, PaginationKeyset};

use crate::QueryError;

const SEPARATOR: char = '|';

/// Timestamps are collapsed to epoch seconds, integers to decimal strings.
pub fn encode(value: KeysetValue, id: i64) -> String {
    let value_token = match value {
        KeysetValue::Timestamp(at) => at.timestamp().to_string(),
        KeysetValue::BigInt(value) => value.to_string(),
        KeysetValue::Int(value) => value.to_string(),
    };
    format!("{}{}{}", value_token, SEPARATOR, id)
}

/// Parses a cursor back into a seek position. `kind` is the value type of
/// the field the caller resolved for `orderBy`, so the same cursor decodes
/// differently (or not at all) under a different sort field.
pub fn decode(cursor: &str, kind: KeysetValueKind) -> Result<PaginationKeyset, QueryError> {
    let tokens: Vec<&str> = cursor.split(SEPARATOR).collect();
    if tokens.len() != 2 || tokens[0].is_empty() || tokens[1].is_empty() {
        return Err(QueryError::InvalidCursor);
    }

    let value = parse_value(tokens[0], kind)?;
    // the tie-break id is always a row id, failure here means a mangled
    // cursor rather than a type mismatch
    let id = tokens[1]
        .parse::<i64>()
        .map_err(|_| QueryError::InvalidCursor)?;

    Ok(PaginationKeyset { value, id })
}

fn parse_value(token: &str, kind: KeysetValueKind) -> Result<KeysetValue, QueryError> {
    let parse_failure = || QueryError::CursorValueType {
        value: token.to_owned(),
        expected: kind,
    };

    match kind {
        KeysetValueKind::Timestamp => token
            .parse::<i64>()
            .ok()
            .and_then(|seconds| DateTime::from_timestamp(seconds, 0))
            .map(KeysetValue::Timestamp)
            .ok_or_else(parse_failure),
        KeysetValueKind::BigInt => token
            .parse::<i64>()
            .map(KeysetValue::BigInt)
            .map_err(|_| parse_failure()),
        KeysetValueKind::Int => token
            .parse::<i32>()
            .map(KeysetValue::Int)
            .map_err(|_| parse_failure()),
    }
}
