use chrono::{DateTime, Utc};
use model::statistics::{JourneyStatistics, TopStationsQueryResult};
use sqlx::{Executor, Postgres};

use crate::{
    data_model::statistics::{JourneyStatisticsRow, TopStationsRow},
    Result,
};

use super::{convert_error, departure_window_sql};

/// Directional counts and average distances in a single pass using filtered
/// aggregates. Averages coalesce to 0 so an empty direction never yields
/// null.
pub async fn journey_statistics<'c, E>(
    executor: E,
    station_id: i32,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<JourneyStatistics>
where
    E: Executor<'c, Database = Postgres>,
{
    let mut sql = String::from(
        "SELECT \
            count(*) FILTER (WHERE departure_station_id = $1) AS departure_count, \
            count(*) FILTER (WHERE arrival_station_id = $1) AS arrival_count, \
            coalesce(avg(distance) FILTER (WHERE departure_station_id = $1), 0)::float8 \
                AS departure_average_distance, \
            coalesce(avg(distance) FILTER (WHERE arrival_station_id = $1), 0)::float8 \
                AS arrival_average_distance \
         FROM journey \
         WHERE (departure_station_id = $1 OR arrival_station_id = $1)",
    );
    sql.push_str(&departure_window_sql(2, from.is_some(), to.is_some()));
    sql.push(';');

    let mut query = sqlx::query_as::<_, JourneyStatisticsRow>(&sql).bind(station_id);
    if let Some(from) = from {
        query = query.bind(from);
    }
    if let Some(to) = to {
        query = query.bind(to);
    }

    query
        .fetch_one(executor)
        .await
        .map(JourneyStatisticsRow::to_model)
        .map_err(convert_error)
}

/// Grouped correspondent counts for both directions in one unioned
/// statement. The LIMIT is applied inside each branch so a high-traffic
/// station never drags the full pair distribution over the wire. Ordering
/// within a branch is deterministic: count first, opposite station id as
/// tiebreak.
pub async fn top_correspondents<'c, E>(
    executor: E,
    station_id: i32,
    limit_per_direction: i64,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<Vec<TopStationsQueryResult>>
where
    E: Executor<'c, Database = Postgres>,
{
    let window = departure_window_sql(3, from.is_some(), to.is_some());
    let sql = format!(
        "(SELECT departure_station_id, arrival_station_id, count(*) AS journey_count \
          FROM journey WHERE arrival_station_id = $1{window} \
          GROUP BY departure_station_id, arrival_station_id \
          ORDER BY journey_count DESC, departure_station_id ASC LIMIT $2) \
         UNION \
         (SELECT departure_station_id, arrival_station_id, count(*) AS journey_count \
          FROM journey WHERE departure_station_id = $1{window} \
          GROUP BY departure_station_id, arrival_station_id \
          ORDER BY journey_count DESC, arrival_station_id ASC LIMIT $2);",
    );

    let mut query = sqlx::query_as::<_, TopStationsRow>(&sql)
        .bind(station_id)
        .bind(limit_per_direction);
    if let Some(from) = from {
        query = query.bind(from);
    }
    if let Some(to) = to {
        query = query.bind(to);
    }

    query
        .fetch_all(executor)
        .await
        .map(|rows| rows.into_iter().map(TopStationsRow::to_model).collect())
        .map_err(convert_error)
}
