use std::env;

/// Batch load settings from the environment. `LOADER_JOURNEY_URLS` is a
/// comma separated list; sources may be http(s) URLs or local paths.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub station_url: String,
    pub journey_urls: Vec<String>,
    pub batch_size: usize,
    pub minimum_journey_distance: i32,
    pub minimum_journey_duration: i32,
}

impl LoaderConfig {
    pub fn from_env() -> Option<Self> {
        let station_url = env::var("LOADER_STATION_URL").ok()?;
        let journey_urls: Vec<String> = env::var("LOADER_JOURNEY_URLS")
            .ok()?
            .split(',')
            .map(|url| url.trim().to_owned())
            .filter(|url| !url.is_empty())
            .collect();

        Some(Self {
            station_url,
            journey_urls,
            batch_size: env_or("LOADER_BATCH_SIZE", 1000),
            minimum_journey_distance: env_or("LOADER_MIN_JOURNEY_DISTANCE", 10),
            minimum_journey_duration: env_or("LOADER_MIN_JOURNEY_DURATION", 10),
        })
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
