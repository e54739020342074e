use std::net::SocketAddr;
use std::path::PathBuf;

use chrono::{Duration, FixedOffset, Offset, Utc};
use thiserror::Error;
use url::Url;

use crate::models::DEFAULT_PAGE_SIZE;

/// India Standard Time, the dashboard's home calendar.
pub const DEFAULT_TZ_OFFSET_MINUTES: i32 = 330;

pub const DEFAULT_CACHE_TTL_SECS: i64 = 300;
/// One week.
pub const MAX_CACHE_TTL_SECS: i64 = 7 * 24 * 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {0}: {1}")]
    Invalid(&'static str, String),
    #[error("either REALTIME_DB_URL or RECORDS_FILE must be set")]
    NoSource,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub realtime_db_url: Option<Url>,
    pub graph_path: String,
    pub statements_path: String,
    pub records_file: Option<PathBuf>,
    pub statements_file: Option<PathBuf>,
    pub tz_offset_minutes: i32,
    pub page_size: usize,
    pub cache_ttl_secs: i64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            realtime_db_url: None,
            graph_path: "pnlGraph".to_string(),
            statements_path: "pnlsudokutrader".to_string(),
            records_file: None,
            statements_file: None,
            tz_offset_minutes: DEFAULT_TZ_OFFSET_MINUTES,
            page_size: DEFAULT_PAGE_SIZE,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env_opt(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::Invalid(key, e.to_string())),
        None => Ok(default),
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let realtime_db_url = env_opt("REALTIME_DB_URL")
            .map(|raw| {
                Url::parse(&raw)
                    .map_err(|e| ConfigError::Invalid("REALTIME_DB_URL", e.to_string()))
            })
            .transpose()?;

        let config = Self {
            bind_addr: parse_env("BIND_ADDR", defaults.bind_addr)?,
            realtime_db_url,
            graph_path: env_opt("GRAPH_PATH").unwrap_or(defaults.graph_path),
            statements_path: env_opt("STATEMENTS_PATH").unwrap_or(defaults.statements_path),
            records_file: env_opt("RECORDS_FILE").map(PathBuf::from),
            statements_file: env_opt("STATEMENTS_FILE").map(PathBuf::from),
            tz_offset_minutes: parse_env("TZ_OFFSET_MINUTES", defaults.tz_offset_minutes)?,
            page_size: parse_env("PAGE_SIZE", defaults.page_size)?,
            cache_ttl_secs: parse_env("CACHE_TTL_SECS", defaults.cache_ttl_secs)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.realtime_db_url.is_none() && self.records_file.is_none() {
            return Err(ConfigError::NoSource);
        }
        if tz_offset(self.tz_offset_minutes).is_none() {
            return Err(ConfigError::Invalid(
                "TZ_OFFSET_MINUTES",
                format!("{} is outside -1439..=1439", self.tz_offset_minutes),
            ));
        }
        if self.page_size == 0 {
            return Err(ConfigError::Invalid("PAGE_SIZE", "must be at least 1".to_string()));
        }
        if !(0..=MAX_CACHE_TTL_SECS).contains(&self.cache_ttl_secs) {
            return Err(ConfigError::Invalid(
                "CACHE_TTL_SECS",
                format!("{} is outside 0..={}", self.cache_ttl_secs, MAX_CACHE_TTL_SECS),
            ));
        }
        Ok(())
    }

    /// Validated offset; UTC if the config was never validated.
    pub fn offset(&self) -> FixedOffset {
        tz_offset(self.tz_offset_minutes).unwrap_or_else(|| Utc.fix())
    }

    /// Validated cache TTL; the default if the config was never validated.
    pub fn cache_ttl(&self) -> Duration {
        Some(self.cache_ttl_secs)
            .filter(|secs| (0..=MAX_CACHE_TTL_SECS).contains(secs))
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_CACHE_TTL_SECS))
    }
}

/// Offset east of UTC; `None` when a whole day or more.
pub fn tz_offset(minutes: i32) -> Option<FixedOffset> {
    minutes.checked_mul(60).and_then(FixedOffset::east_opt)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_file() -> AppConfig {
        AppConfig {
            records_file: Some(PathBuf::from("records.json")),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_requires_a_source() {
        assert!(matches!(AppConfig::default().validate(), Err(ConfigError::NoSource)));
        assert!(with_file().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_offset_and_page_size() {
        let mut config = with_file();
        config.tz_offset_minutes = 24 * 60;
        assert!(config.validate().is_err());

        let mut config = with_file();
        config.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_ttl_bounds() {
        let mut config = with_file();
        config.cache_ttl_secs = i64::MAX;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid("CACHE_TTL_SECS", _))));
        assert_eq!(config.cache_ttl(), Duration::seconds(DEFAULT_CACHE_TTL_SECS));

        config.cache_ttl_secs = -1;
        assert!(config.validate().is_err());

        config.cache_ttl_secs = MAX_CACHE_TTL_SECS;
        assert!(config.validate().is_ok());
        assert_eq!(config.cache_ttl(), Duration::seconds(MAX_CACHE_TTL_SECS));
    }

    #[test]
    fn test_default_offset_is_ist() {
        assert_eq!(with_file().offset().local_minus_utc(), 330 * 60);
        assert_eq!(tz_offset(-300).unwrap().local_minus_utc(), -300 * 60);
    }
}
