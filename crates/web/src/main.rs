use std::env;

use database::{DatabaseConnectionInfo, PgDatabase};
use service::{
    config::{PaginationConfig, SearchConfig, StatisticsConfig},
    journey::JourneyService,
    station::StationService,
    statistics::StatisticsService,
};
use web::{start_web_server, WebState};

#[tokio::main]
async fn main() {
    env_logger::init();

    // database
    let connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let database = PgDatabase::connect(connection_info)
        .await
        .expect("could not connect to database.");
    let pool = database.pool().clone();

    // services
    let pagination = PaginationConfig::from_env();
    let state = WebState {
        journey_service: JourneyService::new(pool.clone(), pagination),
        station_service: StationService::new(pool.clone(), pagination),
        statistics_service: StatisticsService::new(pool, StatisticsConfig::from_env()),
        search_config: SearchConfig::from_env(),
    };

    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8080);

    if let Err(why) = start_web_server(state, port).await {
        log::error!("web server failed: {}", why);
        std::process::exit(1);
    }
}
