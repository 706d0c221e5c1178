use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::kv_store::{FileStore, StoreError};
use crate::models::Coordinate;

pub const FRESHNESS_MINUTES: i64 = 15;
const CURRENT_FIELDS: &str = "temperature_2m,apparent_temperature,precipitation,weather_code,wind_speed_10m";

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("weather service returned status {0}")]
    Status(StatusCode),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Forecast payload as returned by the provider, plus when it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub data: serde_json::Value,
    pub fetched_at: DateTime<Utc>,
    /// Set when the provider could not be reached and an old report was served.
    #[serde(default)]
    pub stale: bool,
}

/// `true` while `last` is no older than `window` at `now`. Timestamps from the
/// future never count as fresh.
pub fn is_fresh(last: DateTime<Utc>, now: DateTime<Utc>, window: TimeDelta) -> bool {
    let age = now - last;
    age >= TimeDelta::zero() && age < window
}

/// Current conditions from an Open-Meteo compatible API, cached on disk per
/// location for [`FRESHNESS_MINUTES`].
pub struct WeatherService {
    client: reqwest::Client,
    base_url: String,
    store: FileStore,
    window: TimeDelta,
}

impl WeatherService {
    pub fn new(
        base_url: impl Into<String>,
        store: FileStore,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
            window: TimeDelta::minutes(FRESHNESS_MINUTES),
        })
    }

    pub async fn current(&self, coordinate: Coordinate) -> Result<WeatherReport, WeatherError> {
        self.current_at(coordinate, Utc::now()).await
    }

    pub async fn current_at(
        &self,
        coordinate: Coordinate,
        now: DateTime<Utc>,
    ) -> Result<WeatherReport, WeatherError> {
        let keys = CacheKeys::for_location(coordinate);
        let last_refresh: Option<DateTime<Utc>> = self.load(&keys.refreshed)?;
        let cached: Option<WeatherReport> = self.load(&keys.report)?;

        if let (Some(last), Some(report)) = (last_refresh, &cached) {
            if is_fresh(last, now, self.window) {
                tracing::debug!("weather cache hit for {}", keys.report);
                return Ok(report.clone());
            }
        }

        match self.fetch(coordinate).await {
            Ok(data) => {
                let report = WeatherReport {
                    data,
                    fetched_at: now,
                    stale: false,
                };
                self.store.put_json(&keys.report, &report)?;
                self.store.put_json(&keys.refreshed, &now)?;
                tracing::info!("weather refreshed for {:.2},{:.2}", coordinate.lat, coordinate.lon);
                Ok(report)
            }
            Err(err) => match cached {
                Some(report) => {
                    tracing::warn!(
                        "weather fetch failed, serving report from {}: {}",
                        report.fetched_at,
                        err
                    );
                    Ok(WeatherReport {
                        stale: true,
                        ..report
                    })
                }
                None => Err(err),
            },
        }
    }

    /// A corrupt entry reads as a miss so the next fetch overwrites it.
    fn load<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, WeatherError> {
        match self.store.get_json(key) {
            Err(StoreError::Serde(err)) => {
                tracing::warn!("discarding unreadable weather cache {}: {}", key, err);
                Ok(None)
            }
            other => Ok(other?),
        }
    }

    async fn fetch(&self, coordinate: Coordinate) -> Result<serde_json::Value, WeatherError> {
        let response = self
            .client
            .get(format!("{}/v1/forecast", self.base_url))
            .query(&[
                ("latitude", format!("{:.4}", coordinate.lat)),
                ("longitude", format!("{:.4}", coordinate.lon)),
                ("current", CURRENT_FIELDS.to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status(status));
        }
        Ok(response.json().await?)
    }
}

struct CacheKeys {
    report: String,
    refreshed: String,
}

impl CacheKeys {
    /// Two decimals is roughly a kilometre, close enough for a forecast.
    fn for_location(coordinate: Coordinate) -> Self {
        let location = format!(
            "{}_{}",
            sanitize_component(coordinate.lat),
            sanitize_component(coordinate.lon)
        );
        Self {
            report: format!("weather_{location}"),
            refreshed: format!("last_weather_refresh_{location}"),
        }
    }
}

fn sanitize_component(val: f64) -> String {
    format!("{val:.2}").replace('-', "m").replace('.', "p")
}
