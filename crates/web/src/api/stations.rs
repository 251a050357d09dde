use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use model::{
    station::{Station, StationDetails, StationLimited},
    statistics::StationStatistics,
    Direction,
};
use serde::{Deserialize, Serialize};
use service::{config::SearchConfig, station::StationQuery, statistics, QueryError};

use crate::{common::RouteResult, WebState};

pub(crate) fn routes(state: WebState) -> Router {
    Router::new()
        .route("/", get(list_stations))
        .route("/limited", get(list_stations_limited))
        .route("/:id", get(station_details))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StationListParams {
    /// Whitespace-separated free-text search terms.
    search: Option<String>,
    order_by: Option<String>,
    direction: Option<Direction>,
    page: Option<i64>,
    page_size: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    total_pages: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StationsResponse {
    stations: Vec<Station>,
    meta: PageMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StationsLimitedResponse {
    stations: Vec<StationLimited>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatisticsParams {
    from_date: Option<NaiveDate>,
    to_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StationDetailsWithStatisticsResponse {
    station: StationDetails,
    statistics: StationStatistics,
}

async fn list_stations(
    State(state): State<WebState>,
    Query(params): Query<StationListParams>,
) -> RouteResult<Json<StationsResponse>> {
    let search_tokens = split_search_terms(params.search.as_deref(), &state.search_config)?;

    let page = state
        .station_service
        .get_stations(StationQuery {
            order_by: params.order_by,
            direction: params.direction,
            search_tokens,
            page: params.page,
            page_size: params.page_size,
        })
        .await?;

    Ok(Json(StationsResponse {
        stations: page.stations,
        meta: PageMeta {
            total_pages: page.total_pages,
        },
    }))
}

async fn list_stations_limited(
    State(state): State<WebState>,
) -> RouteResult<Json<StationsLimitedResponse>> {
    let stations = state.station_service.get_all_stations_limited().await?;
    Ok(Json(StationsLimitedResponse { stations }))
}

async fn station_details(
    State(state): State<WebState>,
    Path(id): Path<i32>,
    Query(params): Query<StatisticsParams>,
) -> RouteResult<Json<StationDetailsWithStatisticsResponse>> {
    let (from, to) = statistics::departure_window(params.from_date, params.to_date)?;

    let station = state.station_service.get_station_details(id).await?;
    let statistics = state
        .statistics_service
        .get_station_statistics(id, from, to)
        .await?;

    Ok(Json(StationDetailsWithStatisticsResponse {
        station,
        statistics,
    }))
}

/// Splits the raw `search` parameter into tokens and enforces the
/// configured bounds before anything reaches the search engine.
fn split_search_terms(
    search: Option<&str>,
    config: &SearchConfig,
) -> Result<Vec<String>, QueryError> {
    let Some(search) = search else {
        return Ok(Vec::new());
    };

    let tokens: Vec<String> = search.split_whitespace().map(str::to_owned).collect();
    if tokens.len() > config.max_search_term_count {
        return Err(QueryError::BadRequest(format!(
            "too many search terms, maximum is {}",
            config.max_search_term_count
        )));
    }
    if tokens
        .iter()
        .any(|token| token.chars().count() < config.min_search_term_length)
    {
        return Err(QueryError::BadRequest(format!(
            "search terms must be at least {} characters long",
            config.min_search_term_length
        )));
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_search_means_no_tokens() {
        let config = SearchConfig::default();
        assert!(split_search_terms(None, &config).unwrap().is_empty());
    }

    #[test]
    fn search_splits_on_whitespace() {
        let config = SearchConfig::default();
        let tokens = split_search_terms(Some("kaivopuisto  töölö"), &config).unwrap();
        assert_eq!(tokens, vec!["kaivopuisto", "töölö"]);
    }

    #[test]
    fn too_many_terms_are_refused() {
        let config = SearchConfig {
            max_search_term_count: 2,
            min_search_term_length: 1,
        };
        assert!(matches!(
            split_search_terms(Some("a b c"), &config),
            Err(QueryError::BadRequest(_))
        ));
    }

    #[test]
    fn too_short_terms_are_refused() {
        let config = SearchConfig {
            max_search_term_count: 10,
            min_search_term_length: 3,
        };
        assert!(matches!(
            split_search_terms(Some("abc xy"), &config),
            Err(QueryError::BadRequest(_))
        ));
    }

    #[test]
    fn stations_response_serializes_total_pages() {
        let response = StationsResponse {
            stations: vec![],
            meta: PageMeta { total_pages: 0 },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["meta"]["totalPages"], 0);
    }
}
