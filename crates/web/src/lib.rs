pub use crate::common::RouteResult;

use axum::Router;
use service::{
    config::SearchConfig, journey::JourneyService, station::StationService,
    statistics::StatisticsService,
};
use tokio::net::TcpListener;

pub mod api;
pub mod common;

#[derive(Clone)]
pub struct WebState {
    pub journey_service: JourneyService,
    pub station_service: StationService,
    pub statistics_service: StatisticsService,
    pub search_config: SearchConfig,
}

pub async fn start_web_server(state: WebState, port: u16) -> std::io::Result<()> {
    let routes = Router::new()
        .nest("/journey", api::journeys::routes(state.clone()))
        .nest("/station", api::stations::routes(state));

    let listener = TcpListener::bind(("0.0.0.0", port)).await?;
    log::info!("listening on port {}", port);
    axum::serve(listener, routes.into_make_service()).await?;

    Ok(())
}
