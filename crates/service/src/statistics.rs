use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use database::queries;
use model::statistics::{StationStatistics, TopStation, TopStationsQueryResult};

use crate::{config::StatisticsConfig, QueryError};

/// The source exports carry local Helsinki timestamps, so calendar-date
/// query bounds are interpreted in the same zone.
pub const DATA_TIMEZONE: Tz = chrono_tz::Europe::Helsinki;

/// Per-station aggregate statistics from two concurrent queries.
#[derive(Clone)]
pub struct StatisticsService {
    pool: sqlx::PgPool,
    config: StatisticsConfig,
}

impl StatisticsService {
    pub fn new(pool: sqlx::PgPool, config: StatisticsConfig) -> Self {
        Self { pool, config }
    }

    /// The directional aggregate and the top-correspondent query are
    /// independent, so they run concurrently; a failure of either fails
    /// the whole request. `from` is inclusive, `to` exclusive, both on
    /// `departure_at`.
    pub async fn get_station_statistics(
        &self,
        station_id: i32,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<StationStatistics, QueryError> {
        let (statistics, top_stations) = tokio::try_join!(
            queries::statistics::journey_statistics(&self.pool, station_id, from, to),
            queries::statistics::top_correspondents(
                &self.pool,
                station_id,
                self.config.top_stations_limit,
                from,
                to,
            ),
        )?;

        let (arriving_here, departing_to) = split_by_direction(
            top_stations,
            station_id,
            self.config.top_stations_limit as usize,
        );

        Ok(StationStatistics {
            departure_count: statistics.departure_count,
            arrival_count: statistics.arrival_count,
            departure_average_distance: statistics.departure_average_distance,
            arrival_average_distance: statistics.arrival_average_distance,
            top_stations_for_arriving_here: arriving_here,
            top_stations_for_departing_to: departing_to,
        })
    }
}

/// Splits the unioned pair rows by which side is the queried station and
/// relabels each row as the opposite station. The per-direction limit is
/// re-applied after the split: a self-loop journey matches both filters and
/// must not push either list past the limit the query already promised.
fn split_by_direction(
    rows: Vec<TopStationsQueryResult>,
    station_id: i32,
    limit: usize,
) -> (Vec<TopStation>, Vec<TopStation>) {
    let mut arriving_here: Vec<TopStation> = rows
        .iter()
        .filter(|row| row.arrival_station_id == station_id)
        .map(|row| TopStation {
            id: row.departure_station_id,
            journey_count: row.journey_count,
        })
        .collect();
    let mut departing_to: Vec<TopStation> = rows
        .iter()
        .filter(|row| row.departure_station_id == station_id)
        .map(|row| TopStation {
            id: row.arrival_station_id,
            journey_count: row.journey_count,
        })
        .collect();

    for list in [&mut arriving_here, &mut departing_to] {
        list.sort_by(|a, b| b.journey_count.cmp(&a.journey_count).then(a.id.cmp(&b.id)));
        list.truncate(limit);
    }

    (arriving_here, departing_to)
}

/// Converts optional calendar-date bounds into the half-open instant window
/// `[from, to)`: start of `from_date` up to the start of the day after
/// `to_date`, both in the data timezone.
pub fn departure_window(
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>), QueryError> {
    if let (Some(from), Some(to)) = (from_date, to_date) {
        if from > to {
            return Err(QueryError::BadRequest(
                "query parameter `fromDate` cannot be after `toDate`".to_owned(),
            ));
        }
    }

    let from = from_date.map(start_of_day).transpose()?;
    let to = to_date
        .map(|date| {
            date.succ_opt()
                .ok_or_else(|| QueryError::BadRequest(format!("invalid date `{}`", date)))
                .and_then(start_of_day)
        })
        .transpose()?;

    Ok((from, to))
}

fn start_of_day(date: NaiveDate) -> Result<DateTime<Utc>, QueryError> {
    DATA_TIMEZONE
        .from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|at| at.with_timezone(&Utc))
        .ok_or_else(|| QueryError::BadRequest(format!("invalid date `{}`", date)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(departure: i32, arrival: i32, count: i64) -> TopStationsQueryResult {
        TopStationsQueryResult {
            departure_station_id: departure,
            arrival_station_id: arrival,
            journey_count: count,
        }
    }

    #[test]
    fn splits_and_relabels_relative_to_the_queried_station() {
        // station 10 departs to {A=1: 5, B=2: 7} and receives from
        // {C=3: 9, D=4: 13}
        let rows = vec![
            pair(10, 1, 5),
            pair(10, 2, 7),
            pair(3, 10, 9),
            pair(4, 10, 13),
        ];

        let (arriving_here, departing_to) = split_by_direction(rows, 10, 5);

        assert_eq!(
            arriving_here,
            vec![
                TopStation {
                    id: 4,
                    journey_count: 13
                },
                TopStation {
                    id: 3,
                    journey_count: 9
                },
            ]
        );
        assert_eq!(
            departing_to,
            vec![
                TopStation {
                    id: 2,
                    journey_count: 7
                },
                TopStation {
                    id: 1,
                    journey_count: 5
                },
            ]
        );
    }

    #[test]
    fn self_loop_appears_in_both_lists_without_exceeding_the_limit() {
        let rows = vec![
            pair(10, 10, 20),
            pair(10, 1, 5),
            pair(10, 2, 4),
            pair(3, 10, 3),
        ];

        let (arriving_here, departing_to) = split_by_direction(rows, 10, 2);

        assert_eq!(arriving_here.len(), 2);
        assert_eq!(departing_to.len(), 2);
        assert_eq!(arriving_here[0].id, 10);
        assert_eq!(departing_to[0].id, 10);
        assert_eq!(departing_to[1].id, 1);
    }

    #[test]
    fn equal_counts_break_ties_on_station_id() {
        let rows = vec![pair(5, 10, 3), pair(2, 10, 3), pair(9, 10, 3)];
        let (arriving_here, _) = split_by_direction(rows, 10, 5);
        let ids: Vec<i32> = arriving_here.iter().map(|top| top.id).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn window_converts_helsinki_days_to_utc_instants() {
        let from = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();
        let to = NaiveDate::from_ymd_opt(2021, 7, 2).unwrap();

        let (from_at, to_at) = departure_window(Some(from), Some(to)).unwrap();

        // Helsinki summer time is UTC+3; the upper bound is the start of
        // the following day, exclusive.
        assert_eq!(
            from_at.unwrap(),
            Utc.with_ymd_and_hms(2021, 6, 14, 21, 0, 0).unwrap()
        );
        assert_eq!(
            to_at.unwrap(),
            Utc.with_ymd_and_hms(2021, 7, 2, 21, 0, 0).unwrap()
        );
    }

    #[test]
    fn absent_bounds_stay_unbounded() {
        let (from_at, to_at) = departure_window(None, None).unwrap();
        assert_eq!(from_at, None);
        assert_eq!(to_at, None);
    }

    #[test]
    fn inverted_range_is_refused() {
        let from = NaiveDate::from_ymd_opt(2021, 7, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2021, 6, 15).unwrap();
        assert!(matches!(
            departure_window(Some(from), Some(to)),
            Err(QueryError::BadRequest(_))
        ));
    }
}
