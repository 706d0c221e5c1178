use std::{num::NonZeroUsize, sync::Mutex, time::Duration};

use async_trait::async_trait;
use lru::LruCache;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::models::Coordinate;
use crate::routing::interpolate_segment;

const SEGMENT_CACHE_SIZE: usize = 256;
const STRAIGHT_LINE_STEPS: usize = 16;

/// Source of walking paths between two points.
///
/// Implementations report a missing route as an error; callers decide whether
/// the segment is skippable. No implementation retries on its own.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    async fn walking_route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<Coordinate>, DirectionsError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectionsError {
    #[error("directions request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("directions service returned status {0}")]
    Status(StatusCode),
    #[error("no walking route: {0}")]
    NoRoute(String),
    #[error("invalid directions payload: {0}")]
    Decode(String),
}

/// Client for an OSRM-compatible `route` endpoint using the `foot` profile.
pub struct OsrmDirections {
    client: reqwest::Client,
    base_url: String,
    cache: Mutex<LruCache<SegmentKey, Vec<Coordinate>>>,
}

type SegmentKey = (i64, i64, i64, i64);

impl OsrmDirections {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectionsError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let capacity = NonZeroUsize::new(SEGMENT_CACHE_SIZE).unwrap_or(NonZeroUsize::MIN);
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache: Mutex::new(LruCache::new(capacity)),
        })
    }

    fn route_url(&self, from: Coordinate, to: Coordinate) -> String {
        format!(
            "{}/route/v1/foot/{:.6},{:.6};{:.6},{:.6}",
            self.base_url, from.lon, from.lat, to.lon, to.lat
        )
    }

    fn cached(&self, key: &SegmentKey) -> Option<Vec<Coordinate>> {
        self.cache.lock().ok()?.get(key).cloned()
    }

    fn remember(&self, key: SegmentKey, path: &[Coordinate]) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(key, path.to_vec());
        }
    }
}

#[async_trait]
impl DirectionsService for OsrmDirections {
    async fn walking_route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        let key = segment_key(from, to);
        if let Some(path) = self.cached(&key) {
            tracing::debug!("directions cache hit for {:?} -> {:?}", from, to);
            return Ok(path);
        }

        let response = self
            .client
            .get(self.route_url(from, to))
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        let path = decode_osrm(&body, status)?;

        tracing::debug!("directions returned {} points for {:?} -> {:?}", path.len(), from, to);
        self.remember(key, &path);
        Ok(path)
    }
}

/// Offline stand-in that walks the straight line between the two points.
#[derive(Debug, Clone)]
pub struct StraightLineDirections {
    steps: usize,
}

impl StraightLineDirections {
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }
}

impl Default for StraightLineDirections {
    fn default() -> Self {
        Self::new(STRAIGHT_LINE_STEPS)
    }
}

#[async_trait]
impl DirectionsService for StraightLineDirections {
    async fn walking_route(
        &self,
        from: Coordinate,
        to: Coordinate,
    ) -> Result<Vec<Coordinate>, DirectionsError> {
        Ok(interpolate_segment(from, to, self.steps))
    }
}

#[derive(Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
}

#[derive(Deserialize)]
struct OsrmGeometry {
    /// GeoJSON order: `[lon, lat]`.
    coordinates: Vec<[f64; 2]>,
}

fn decode_osrm(body: &[u8], status: StatusCode) -> Result<Vec<Coordinate>, DirectionsError> {
    let parsed: OsrmResponse = match serde_json::from_slice(body) {
        Ok(parsed) => parsed,
        Err(_) if !status.is_success() => return Err(DirectionsError::Status(status)),
        Err(err) => return Err(DirectionsError::Decode(err.to_string())),
    };

    if parsed.code != "Ok" {
        let reason = parsed.message.unwrap_or(parsed.code);
        return Err(DirectionsError::NoRoute(reason));
    }

    let route = parsed
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| DirectionsError::NoRoute("empty route list".into()))?;

    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lon, lat]| Coordinate { lat, lon })
        .collect())
}

fn segment_key(from: Coordinate, to: Coordinate) -> SegmentKey {
    let q = |v: f64| (v * 1e5).round() as i64;
    (q(from.lat), q(from.lon), q(to.lat), q(to.lon))
}
