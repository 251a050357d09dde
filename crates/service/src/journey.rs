use database::queries;
use model::{journey::Journey, Direction};

use crate::{config::PaginationConfig, fields::JourneySortField, keyset, QueryError};

pub const DEFAULT_ORDER: &str = "departureAt";

/// Raw journey listing parameters as they arrive from the caller.
#[derive(Debug, Clone, Default)]
pub struct JourneyQuery {
    pub order_by: Option<String>,
    pub direction: Option<Direction>,
    pub page_size: Option<i64>,
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone)]
pub struct JourneyPage {
    pub journeys: Vec<Journey>,
    pub next_cursor: Option<String>,
}

/// Seek-based journey listing over a dynamically selected sort column.
#[derive(Clone)]
pub struct JourneyService {
    pool: sqlx::PgPool,
    config: PaginationConfig,
}

impl JourneyService {
    pub fn new(pool: sqlx::PgPool, config: PaginationConfig) -> Self {
        Self { pool, config }
    }

    /// Orders by `(field, id)` with both components in the requested
    /// direction, resuming strictly after the cursor position when one is
    /// given. A cursor pointing past the end of data is not an error, the
    /// page just comes back empty.
    pub async fn list_journeys(&self, query: JourneyQuery) -> Result<JourneyPage, QueryError> {
        let field =
            JourneySortField::resolve(query.order_by.as_deref().unwrap_or(DEFAULT_ORDER))?;
        let keyset = match &query.next_cursor {
            Some(cursor) => Some(keyset::decode(cursor, field.value_kind())?),
            None => None,
        };
        let direction = query.direction.unwrap_or(Direction::Desc);
        let page_size = self.config.resolve_page_size(query.page_size)?;

        let journeys =
            queries::journey::list(&self.pool, field.column(), direction, page_size, keyset)
                .await?;
        let next_cursor = next_cursor(&journeys, page_size, field);

        Ok(JourneyPage {
            journeys,
            next_cursor,
        })
    }
}

/// A cursor is produced only when the page is exactly full. An exactly full
/// final page therefore still yields a cursor that resolves to an empty
/// page; clients stop on the empty response, not on cursor absence.
fn next_cursor(journeys: &[Journey], page_size: i64, field: JourneySortField) -> Option<String> {
    if journeys.len() as i64 != page_size {
        return None;
    }
    journeys
        .last()
        .map(|last| keyset::encode(field.value_of(last), last.id))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn journeys(count: i64) -> Vec<Journey> {
        let start = Utc.with_ymd_and_hms(2020, 2, 3, 11, 0, 0).unwrap();
        (0..count)
            .map(|i| Journey {
                id: i + 1,
                departure_at: start + Duration::seconds(10 * i),
                arrival_at: start + Duration::seconds(10 * i + 300),
                departure_station_id: 1,
                arrival_station_id: 2,
                distance: 1500,
                duration: 300,
            })
            .collect()
    }

    #[test]
    fn full_page_produces_cursor_from_last_row() {
        let rows = journeys(25);
        let cursor =
            next_cursor(&rows, 25, JourneySortField::resolve(DEFAULT_ORDER).unwrap()).unwrap();
        let last = rows.last().unwrap();
        assert_eq!(
            cursor,
            format!("{}|{}", last.departure_at.timestamp(), last.id)
        );
    }

    #[test]
    fn partial_page_produces_no_cursor() {
        let rows = journeys(10);
        assert_eq!(next_cursor(&rows, 25, JourneySortField::Id), None);
    }

    #[test]
    fn empty_page_produces_no_cursor() {
        assert_eq!(next_cursor(&[], 25, JourneySortField::Distance), None);
    }

    #[test]
    fn cursor_tracks_the_sorted_field() {
        let rows = journeys(2);
        let cursor = next_cursor(&rows, 2, JourneySortField::Distance).unwrap();
        assert_eq!(cursor, "1500|2");
    }
}
