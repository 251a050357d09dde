use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::QueryError;

fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or(default),
        Err(_) => default,
    }
}

/// Page size bounds shared by the journey and station listing paths.
#[derive(Debug, Clone, Copy)]
pub struct PaginationConfig {
    pub default_page_size: i64,
    pub max_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: 25,
            max_page_size: 100,
        }
    }
}

impl PaginationConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_page_size: env_or("PAGE_SIZE_DEFAULT", defaults.default_page_size),
            max_page_size: env_or("PAGE_SIZE_MAX", defaults.max_page_size),
        }
    }

    /// Missing size falls back to the default, an oversized request is
    /// clamped to the maximum, a non-positive request is refused.
    pub fn resolve_page_size(&self, requested: Option<i64>) -> Result<i64, QueryError> {
        match requested {
            None => Ok(self.default_page_size),
            Some(size) if size < 1 => Err(QueryError::BadRequest(
                "pageSize must be positive".to_owned(),
            )),
            Some(size) => Ok(size.min(self.max_page_size)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatisticsConfig {
    /// Top correspondent stations returned per direction.
    pub top_stations_limit: i64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            top_stations_limit: 5,
        }
    }
}

impl StatisticsConfig {
    pub fn from_env() -> Self {
        Self {
            top_stations_limit: env_or(
                "TOP_STATIONS_LIMIT",
                Self::default().top_stations_limit,
            ),
        }
    }
}

/// Bounds for free-text search terms, enforced by the HTTP layer before the
/// token list reaches the search engine.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    pub max_search_term_count: usize,
    pub min_search_term_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_search_term_count: 10,
            min_search_term_length: 2,
        }
    }
}

impl SearchConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_search_term_count: env_or(
                "MAX_SEARCH_TERM_COUNT",
                defaults.max_search_term_count,
            ),
            min_search_term_length: env_or(
                "MIN_SEARCH_TERM_LENGTH",
                defaults.min_search_term_length,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_page_size_uses_default() {
        let config = PaginationConfig::default();
        assert_eq!(config.resolve_page_size(None).unwrap(), 25);
    }

    #[test]
    fn oversized_page_size_clamps_to_max() {
        let config = PaginationConfig::default();
        assert_eq!(config.resolve_page_size(Some(500)).unwrap(), 100);
        assert_eq!(config.resolve_page_size(Some(40)).unwrap(), 40);
    }

    #[test]
    fn non_positive_page_size_is_refused() {
        let config = PaginationConfig::default();
        assert!(matches!(
            config.resolve_page_size(Some(0)),
            Err(QueryError::BadRequest(_))
        ));
        assert!(matches!(
            config.resolve_page_size(Some(-5)),
            Err(QueryError::BadRequest(_))
        ));
    }
}
