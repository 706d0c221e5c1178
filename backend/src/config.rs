use std::{net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use crate::error::AppError;

const DEFAULT_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);
const DEFAULT_WEATHER_URL: &str = "https://api.open-meteo.com";
const DEFAULT_CACHE_DIR: &str = "data/cache";
const DEFAULT_DIRECTIONS_TIMEOUT_SECS: u64 = 10;
const DEFAULT_OVERVIEW_THROTTLE_MS: u64 = 250;

/// Server settings, read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub addr: SocketAddr,
    /// OSRM-compatible router. `None` walks straight lines between stops.
    pub directions_url: Option<String>,
    pub directions_timeout: Duration,
    pub overview_throttle: Duration,
    pub weather_url: String,
    pub cache_dir: PathBuf,
    pub translation_latency: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            addr: parse_or(var("CAMINO_ADDR"), "CAMINO_ADDR", SocketAddr::from(DEFAULT_ADDR))?,
            directions_url: var("DIRECTIONS_URL"),
            directions_timeout: Duration::from_secs(parse_or(
                var("DIRECTIONS_TIMEOUT_SECS"),
                "DIRECTIONS_TIMEOUT_SECS",
                DEFAULT_DIRECTIONS_TIMEOUT_SECS,
            )?),
            overview_throttle: Duration::from_millis(parse_or(
                var("OVERVIEW_THROTTLE_MS"),
                "OVERVIEW_THROTTLE_MS",
                DEFAULT_OVERVIEW_THROTTLE_MS,
            )?),
            weather_url: var("WEATHER_URL").unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            cache_dir: var("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR)),
            translation_latency: Duration::from_millis(parse_or(
                var("TRANSLATION_LATENCY_MS"),
                "TRANSLATION_LATENCY_MS",
                0,
            )?),
        })
    }
}

fn parse_or<T>(raw: Option<String>, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw
            .parse()
            .map_err(|err| AppError::Config(format!("{key}={raw:?}: {err}"))),
        None => Ok(default),
    }
}
