use std::fmt::Write as _;

use model::{
    journey::{Journey, JourneyNew},
    query::{KeysetValue, PaginationKeyset},
    Direction,
};
use sqlx::{Executor, Postgres};

use crate::{data_model::journey::JourneyRow, Result};

use super::convert_error;

const JOURNEY_COLUMNS: &str = "id, departure_at, arrival_at, departure_station_id, \
     arrival_station_id, distance, duration";

/// Keyset listing ordered by `(order_column, id)`, both in the requested
/// direction so the compound key is a total order. The seek predicate uses
/// Postgres row comparison: rows strictly after the keyset position.
pub(crate) fn build_list_sql(order_column: &str, direction: Direction, seek: bool) -> String {
    let dir = direction.as_sql();
    let mut sql = format!("SELECT {} FROM journey", JOURNEY_COLUMNS);
    if seek {
        let comparison = match direction {
            Direction::Asc => ">",
            Direction::Desc => "<",
        };
        let _ = write!(sql, " WHERE ({}, id) {} ($1, $2)", order_column, comparison);
        let _ = write!(sql, " ORDER BY {} {}, id {} LIMIT $3;", order_column, dir, dir);
    } else {
        let _ = write!(sql, " ORDER BY {} {}, id {} LIMIT $1;", order_column, dir, dir);
    }
    sql
}

/// `order_column` is interpolated into the statement and must come from the
/// resolved closed set of sortable journey columns, never from raw input.
pub async fn list<'c, E>(
    executor: E,
    order_column: &str,
    direction: Direction,
    limit: i64,
    keyset: Option<PaginationKeyset>,
) -> Result<Vec<Journey>>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = build_list_sql(order_column, direction, keyset.is_some());

    let mut query = sqlx::query_as::<_, JourneyRow>(&sql);
    if let Some(keyset) = keyset {
        query = match keyset.value {
            KeysetValue::Timestamp(value) => query.bind(value),
            KeysetValue::BigInt(value) => query.bind(value),
            KeysetValue::Int(value) => query.bind(value),
        };
        query = query.bind(keyset.id);
    }

    query
        .bind(limit)
        .fetch_all(executor)
        .await
        .map(|rows| rows.into_iter().map(JourneyRow::to_model).collect())
        .map_err(convert_error)
}

/// Multi-row insert of one loader batch. Duplicate content tuples hit the
/// uniqueness constraint and are skipped; returns the number of rows
/// actually written.
pub async fn insert_all<'c, E>(executor: E, journeys: &[JourneyNew]) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if journeys.is_empty() {
        return Ok(0);
    }

    let mut sql = String::from(
        "INSERT INTO journey (departure_at, arrival_at, departure_station_id, \
         arrival_station_id, distance, duration) VALUES ",
    );
    let mut placeholder = 1;
    for i in 0..journeys.len() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for j in 0..6 {
            if j > 0 {
                sql.push_str(", ");
            }
            let _ = write!(sql, "${}", placeholder);
            placeholder += 1;
        }
        sql.push(')');
    }
    sql.push_str(" ON CONFLICT DO NOTHING;");

    let mut query = sqlx::query(&sql);
    for journey in journeys {
        query = query
            .bind(journey.departure_at)
            .bind(journey.arrival_at)
            .bind(journey.departure_station_id)
            .bind(journey.arrival_station_id)
            .bind(journey.distance)
            .bind(journey.duration);
    }

    query
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(convert_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_sql_without_seek_orders_and_limits() {
        let sql = build_list_sql("departure_at", Direction::Desc, false);
        assert_eq!(
            sql,
            "SELECT id, departure_at, arrival_at, departure_station_id, \
             arrival_station_id, distance, duration FROM journey \
             ORDER BY departure_at DESC, id DESC LIMIT $1;"
        );
    }

    #[test]
    fn list_sql_with_seek_uses_row_comparison() {
        let sql = build_list_sql("distance", Direction::Desc, true);
        assert!(sql.contains("WHERE (distance, id) < ($1, $2)"));
        assert!(sql.ends_with("ORDER BY distance DESC, id DESC LIMIT $3;"));
    }

    #[test]
    fn ascending_seek_mirrors_the_comparison() {
        let sql = build_list_sql("id", Direction::Asc, true);
        assert!(sql.contains("WHERE (id, id) > ($1, $2)"));
        assert!(sql.contains("ORDER BY id ASC, id ASC"));
    }
}
