use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use model::{journey::Journey, Direction};
use serde::{Deserialize, Serialize};
use service::journey::JourneyQuery;

use crate::{common::RouteResult, WebState};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new().route("/", get(list_journeys)).with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JourneyListParams {
    order_by: Option<String>,
    direction: Option<Direction>,
    page_size: Option<i64>,
    /// Opaque resumption cursor from the previous page's `meta`. Only
    /// meaningful together with the same `orderBy`/`direction`.
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CursorMeta {
    next_cursor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JourneysResponse {
    journeys: Vec<Journey>,
    meta: CursorMeta,
}

async fn list_journeys(
    State(state): State<WebState>,
    Query(params): Query<JourneyListParams>,
) -> RouteResult<Json<JourneysResponse>> {
    let page = state
        .journey_service
        .list_journeys(JourneyQuery {
            order_by: params.order_by,
            direction: params.direction,
            page_size: params.page_size,
            next_cursor: params.next_cursor,
        })
        .await?;

    Ok(Json(JourneysResponse {
        journeys: page.journeys,
        meta: CursorMeta {
            next_cursor: page.next_cursor,
        },
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn response_serializes_in_camel_case() {
        let response = JourneysResponse {
            journeys: vec![Journey {
                id: 1,
                departure_at: Utc.with_ymd_and_hms(2020, 2, 3, 11, 0, 0).unwrap(),
                arrival_at: Utc.with_ymd_and_hms(2020, 2, 3, 11, 5, 0).unwrap(),
                departure_station_id: 1,
                arrival_station_id: 2,
                distance: 1500,
                duration: 300,
            }],
            meta: CursorMeta {
                next_cursor: Some("1580727600|1".to_owned()),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["meta"]["nextCursor"], "1580727600|1");
        assert_eq!(json["journeys"][0]["departureStationId"], 1);
        assert!(json["journeys"][0].get("departureAt").is_some());
    }

    #[test]
    fn params_accept_the_documented_query_names() {
        let params: JourneyListParams = serde_json::from_str(
            r#"{"orderBy":"distance","direction":"asc","pageSize":10,"nextCursor":"5|7"}"#,
        )
        .unwrap();
        assert_eq!(params.order_by.as_deref(), Some("distance"));
        assert_eq!(params.direction, Some(Direction::Asc));
        assert_eq!(params.page_size, Some(10));
        assert_eq!(params.next_cursor.as_deref(), Some("5|7"));
    }
}
