use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use model::{
    station::{Station, StationDetails, StationLimited, StationNew},
    Direction,
};
use sqlx::{Executor, Postgres};

use crate::{
    data_model::station::{StationDetailsRow, StationLimitedRow, StationListRow},
    Result,
};

use super::convert_error;

const LIST_COLUMNS: &str = "id, name_finnish, address_finnish, city_finnish, operator, capacity";

/// All five searchable text fields joined with spaces, the haystack for
/// both the regex filter and the match count.
const SEARCH_TEXT: &str = "name_finnish || ' ' || address_finnish || ' ' || name_swedish \
     || ' ' || address_swedish || ' ' || name_english";

pub(crate) fn build_list_sql(order_column: &str, direction: Direction) -> String {
    format!(
        "SELECT count(*) OVER () AS total_count, 0::bigint AS match_count, {} \
         FROM station ORDER BY {} {}, id ASC LIMIT $1 OFFSET $2;",
        LIST_COLUMNS,
        order_column,
        direction.as_sql()
    )
}

/// Relevance search: match count per row via a LATERAL `regexp_matches`
/// over the concatenated text fields. No trigram index on purpose, the
/// station table is small enough that the planner would not use one, and
/// the match count depends on the pattern anyway.
pub(crate) fn build_search_sql(order_column: &str, direction: Direction) -> String {
    let mut sql = format!(
        "SELECT count(*) OVER () AS total_count, match_count, {} FROM station, LATERAL (",
        LIST_COLUMNS
    );
    let _ = write!(
        sql,
        "SELECT count(*) AS match_count FROM regexp_matches(lower({}), $1, 'g')",
        SEARCH_TEXT
    );
    let _ = write!(sql, ") AS match_counts WHERE {} ~* $1", SEARCH_TEXT);
    let _ = write!(
        sql,
        " ORDER BY match_count DESC, {} {}, id ASC LIMIT $2 OFFSET $3;",
        order_column,
        direction.as_sql()
    );
    sql
}

fn to_page(rows: Vec<StationListRow>) -> (Vec<Station>, i64) {
    let total_count = rows.first().map(|row| row.total_count).unwrap_or(0);
    let stations = rows.into_iter().map(StationListRow::to_model).collect();
    (stations, total_count)
}

/// Offset-paginated plain listing. Returns the page and the total row
/// count of the whole table, taken from the same statement.
pub async fn list<'c, E>(
    executor: E,
    order_column: &str,
    direction: Direction,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Station>, i64)>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = build_list_sql(order_column, direction);

    sqlx::query_as::<_, StationListRow>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
        .map(to_page)
        .map_err(convert_error)
}

/// Offset-paginated regex search ranked by match count. `pattern` is the
/// already escaped, lowercased alternation built by the caller. Returns the
/// page and the total matching row count, unaffected by limit/offset.
pub async fn search<'c, E>(
    executor: E,
    pattern: &str,
    order_column: &str,
    direction: Direction,
    limit: i64,
    offset: i64,
) -> Result<(Vec<Station>, i64)>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = build_search_sql(order_column, direction);

    sqlx::query_as::<_, StationListRow>(&sql)
        .bind(pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
        .map(to_page)
        .map_err(convert_error)
}

pub async fn get_details<'c, E>(executor: E, id: i32) -> Result<Option<StationDetails>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, StationDetailsRow>(
        "
        SELECT
            id, name_finnish, name_swedish, name_english, address_finnish,
            address_swedish, city_finnish, city_swedish, operator, capacity,
            longitude, latitude
        FROM station
        WHERE id = $1;
        ",
    )
    .bind(id)
    .fetch_optional(executor)
    .await
    .map(|row| row.map(StationDetailsRow::to_model))
    .map_err(convert_error)
}

pub async fn all_limited<'c, E>(executor: E) -> Result<Vec<StationLimited>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as::<_, StationLimitedRow>(
        "SELECT id, name_finnish FROM station ORDER BY id ASC;",
    )
    .fetch_all(executor)
    .await
    .map(|rows| rows.into_iter().map(StationLimitedRow::to_model).collect())
    .map_err(convert_error)
}

pub async fn all_ids<'c, E>(executor: E) -> Result<Vec<i32>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar::<_, i32>("SELECT id FROM station;")
        .fetch_all(executor)
        .await
        .map_err(convert_error)
}

/// Multi-row insert of one loader batch; existing ids are left untouched.
pub async fn insert_all<'c, E>(
    executor: E,
    stations: &[StationNew],
    now: DateTime<Utc>,
) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    if stations.is_empty() {
        return Ok(0);
    }

    let mut sql = String::from(
        "INSERT INTO station (id, name_finnish, name_swedish, name_english, \
         address_finnish, address_swedish, city_finnish, city_swedish, operator, \
         capacity, longitude, latitude, modified_at, created_at) VALUES ",
    );
    let mut placeholder = 1;
    for i in 0..stations.len() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for j in 0..14 {
            if j > 0 {
                sql.push_str(", ");
            }
            let _ = write!(sql, "${}", placeholder);
            placeholder += 1;
        }
        sql.push(')');
    }
    sql.push_str(" ON CONFLICT (id) DO NOTHING;");

    let mut query = sqlx::query(&sql);
    for station in stations {
        query = query
            .bind(station.id)
            .bind(&station.name_finnish)
            .bind(&station.name_swedish)
            .bind(&station.name_english)
            .bind(&station.address_finnish)
            .bind(&station.address_swedish)
            .bind(&station.city_finnish)
            .bind(&station.city_swedish)
            .bind(&station.operator)
            .bind(station.capacity)
            .bind(station.longitude)
            .bind(station.latitude)
            .bind(now)
            .bind(now);
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
    fn list_sql_keeps_id_ascending_tiebreak() {
        let sql = build_list_sql("capacity", Direction::Desc);
        assert!(sql.contains("ORDER BY capacity DESC, id ASC"));
        assert!(sql.starts_with("SELECT count(*) OVER () AS total_count"));
    }

    #[test]
    fn search_sql_ranks_by_match_count_first() {
        let sql = build_search_sql("name_finnish", Direction::Asc);
        assert!(sql.contains("regexp_matches(lower("));
        assert!(sql.contains("~* $1"));
        assert!(sql.contains("ORDER BY match_count DESC, name_finnish ASC, id ASC"));
        assert!(sql.contains("LIMIT $2 OFFSET $3"));
    }
}
