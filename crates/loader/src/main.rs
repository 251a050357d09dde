use std::{collections::HashSet, error::Error, time::Instant};

use chrono::Utc;
use database::{queries, DatabaseConnectionInfo, PgDatabase};
use model::journey::JourneyNew;

use crate::{
    config::LoaderConfig,
    parse::{JourneyRecord, StationRecord},
};

mod config;
mod parse;

// log once every this many batches, just to show that loading is proceeding
const BATCH_LOGGING_INTERVAL: usize = 100;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = LoaderConfig::from_env().expect("expected loader source urls in env.");
    let connection_info = DatabaseConnectionInfo::from_env()
        .expect("expected database connection info in env.");
    let database = PgDatabase::connect(connection_info)
        .await
        .expect("could not connect to database.");

    if let Err(why) = run(&database, &config).await {
        log::error!("data load failed: {}", why);
        std::process::exit(1);
    }
}

async fn run(database: &PgDatabase, config: &LoaderConfig) -> Result<(), Box<dyn Error>> {
    log::info!("starting data load");
    let started = Instant::now();

    process_stations(database, config).await?;

    // journeys are filtered against the ids that actually made it into the
    // station table; the set is local to this batch run
    let valid_station_ids: HashSet<i32> = queries::station::all_ids(database.pool())
        .await?
        .into_iter()
        .collect();

    let mut total_rows = 0;
    let mut valid_rows = 0;
    log::info!("processing all journeys");
    for url in &config.journey_urls {
        let stats = process_journeys(database, config, url, &valid_station_ids).await?;
        total_rows += stats.total;
        valid_rows += stats.valid;
    }
    log::info!(
        "all journeys processed. total rows {}, valid rows {}",
        total_rows,
        valid_rows
    );

    log::info!("data load complete in {:.0?}", started.elapsed());
    Ok(())
}

async fn fetch(source: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source).await?;
        Ok(response.bytes().await?.to_vec())
    } else {
        Ok(std::fs::read(source)?)
    }
}

async fn process_stations(
    database: &PgDatabase,
    config: &LoaderConfig,
) -> Result<(), Box<dyn Error>> {
    log::info!("processing stations");
    let bytes = fetch(&config.station_url).await?;
    let mut reader = csv::Reader::from_reader(bytes.as_slice());

    let now = Utc::now();
    let mut batch = Vec::with_capacity(config.batch_size);
    for record in reader.deserialize::<StationRecord>() {
        // anything malformed in the input data is skipped, not fatal
        let Ok(record) = record else { continue };
        batch.push(record.into_station());
        if batch.len() == config.batch_size {
            queries::station::insert_all(database.pool(), &batch, now).await?;
            batch.clear();
        }
    }
    if !batch.is_empty() {
        queries::station::insert_all(database.pool(), &batch, now).await?;
    }

    log::info!("stations loaded");
    Ok(())
}

struct JourneyStats {
    total: usize,
    valid: usize,
}

async fn process_journeys(
    database: &PgDatabase,
    config: &LoaderConfig,
    source: &str,
    valid_station_ids: &HashSet<i32>,
) -> Result<JourneyStats, Box<dyn Error>> {
    log::info!("{}: starting processing", source);
    let bytes = fetch(source).await?;
    let mut reader = csv::Reader::from_reader(bytes.as_slice());

    let mut stats = JourneyStats { total: 0, valid: 0 };
    let mut batch_index = 0;
    let mut batch = Vec::with_capacity(config.batch_size);
    for record in reader.deserialize::<JourneyRecord>() {
        stats.total += 1;
        let Ok(record) = record else { continue };
        let Some(journey) = record.into_journey() else {
            continue;
        };
        if !is_journey_valid(&journey, config, valid_station_ids) {
            continue;
        }

        stats.valid += 1;
        batch.push(journey);
        if batch.len() == config.batch_size {
            queries::journey::insert_all(database.pool(), &batch).await?;
            batch.clear();
            if batch_index % BATCH_LOGGING_INTERVAL == 0 {
                log::info!("{}: batch index {} processed", source, batch_index);
            }
            batch_index += 1;
        }
    }
    if !batch.is_empty() {
        queries::journey::insert_all(database.pool(), &batch).await?;
    }

    log::info!(
        "{}: done. total rows {}, valid rows {}",
        source,
        stats.total,
        stats.valid
    );
    Ok(stats)
}

fn is_journey_valid(
    journey: &JourneyNew,
    config: &LoaderConfig,
    valid_station_ids: &HashSet<i32>,
) -> bool {
    journey.distance >= config.minimum_journey_distance
        && journey.duration >= config.minimum_journey_duration
        && valid_station_ids.contains(&journey.departure_station_id)
        && valid_station_ids.contains(&journey.arrival_station_id)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn config() -> LoaderConfig {
        LoaderConfig {
            station_url: String::new(),
            journey_urls: vec![],
            batch_size: 1000,
            minimum_journey_distance: 10,
            minimum_journey_duration: 10,
        }
    }

    fn journey(distance: i32, duration: i32, departure: i32, arrival: i32) -> JourneyNew {
        let at = Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap();
        JourneyNew {
            departure_at: at,
            arrival_at: at,
            departure_station_id: departure,
            arrival_station_id: arrival,
            distance,
            duration,
        }
    }

    #[test]
    fn journeys_below_minimums_are_invalid() {
        let ids: HashSet<i32> = [1, 2].into_iter().collect();
        assert!(is_journey_valid(&journey(10, 10, 1, 2), &config(), &ids));
        assert!(!is_journey_valid(&journey(9, 10, 1, 2), &config(), &ids));
        assert!(!is_journey_valid(&journey(10, 9, 1, 2), &config(), &ids));
    }

    #[test]
    fn journeys_to_unknown_stations_are_invalid() {
        let ids: HashSet<i32> = [1, 2].into_iter().collect();
        assert!(!is_journey_valid(&journey(100, 100, 1, 3), &config(), &ids));
        assert!(!is_journey_valid(&journey(100, 100, 3, 2), &config(), &ids));
    }
}
