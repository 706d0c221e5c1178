use std::{sync::Arc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    cancel::CancelToken,
    directions::DirectionsService,
    models::{Coordinate, LocationPoint, RouteBounds},
    routing::approximate_distance_km,
};

pub const DEFAULT_OVERVIEW_THROTTLE: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    /// One point per day across the whole itinerary.
    Overview,
    /// Start, waypoints and end of a single day.
    Detail,
}

/// Walking path between two consecutive input points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    /// Index of the segment's first point in the input slice.
    pub from_index: usize,
    pub to_index: usize,
    pub path: Vec<Coordinate>,
}

/// Stitched walking path. Always holds at least two coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub segments: Vec<RouteSegment>,
    pub coordinates: Vec<Coordinate>,
}

impl RoutePath {
    pub fn distance_km(&self) -> f64 {
        approximate_distance_km(&self.coordinates)
    }

    pub fn bounds(&self) -> Option<RouteBounds> {
        RouteBounds::enclosing(self.coordinates.iter().copied())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BuildOutcome {
    Path(RoutePath),
    /// Not enough usable points, or every segment failed.
    NoPath,
    Cancelled,
}

impl BuildOutcome {
    pub fn into_path(self) -> Option<RoutePath> {
        match self {
            BuildOutcome::Path(path) => Some(path),
            BuildOutcome::NoPath | BuildOutcome::Cancelled => None,
        }
    }
}

/// Turns an ordered list of points into one continuous walking path by asking
/// the directions service for each consecutive pair.
///
/// Segments are requested one after another so results always come back in
/// input order. A failed segment is logged and left out; the rest of the path
/// is still drawn.
#[derive(Clone)]
pub struct RouteBuilder {
    directions: Arc<dyn DirectionsService>,
    overview_throttle: Duration,
}

impl RouteBuilder {
    pub fn new(directions: Arc<dyn DirectionsService>) -> Self {
        Self {
            directions,
            overview_throttle: DEFAULT_OVERVIEW_THROTTLE,
        }
    }

    /// Delay between consecutive requests in overview mode.
    pub fn with_overview_throttle(mut self, throttle: Duration) -> Self {
        self.overview_throttle = throttle;
        self
    }

    pub async fn build(
        &self,
        points: &[LocationPoint],
        mode: RouteMode,
        cancel: &CancelToken,
    ) -> BuildOutcome {
        let stops: Vec<(usize, Coordinate)> = points
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| point.coordinate.map(|coord| (idx, coord)))
            .collect();

        if stops.len() < 2 {
            tracing::debug!(
                "{} of {} points have coordinates, nothing to route",
                stops.len(),
                points.len()
            );
            return BuildOutcome::NoPath;
        }

        let total = stops.len() - 1;
        let mut segments = Vec::with_capacity(total);

        for (n, pair) in stops.windows(2).enumerate() {
            if n > 0 && mode == RouteMode::Overview && !self.overview_throttle.is_zero() {
                tokio::time::sleep(self.overview_throttle).await;
            }
            if cancel.is_cancelled() {
                tracing::debug!("route build cancelled before segment {}/{}", n + 1, total);
                return BuildOutcome::Cancelled;
            }

            let (from_index, from) = pair[0];
            let (to_index, to) = pair[1];
            match self.directions.walking_route(from, to).await {
                Ok(path) if !path.is_empty() => {
                    tracing::debug!("segment {}/{}: {} points", n + 1, total, path.len());
                    segments.push(RouteSegment {
                        from_index,
                        to_index,
                        path,
                    });
                }
                Ok(_) => {
                    tracing::warn!(
                        "segment {}/{} ({} -> {}) came back empty, skipping",
                        n + 1,
                        total,
                        points[from_index].name,
                        points[to_index].name
                    );
                }
                Err(err) => {
                    tracing::warn!(
                        "segment {}/{} ({} -> {}) failed, skipping: {}",
                        n + 1,
                        total,
                        points[from_index].name,
                        points[to_index].name,
                        err
                    );
                }
            }
        }

        if cancel.is_cancelled() {
            tracing::debug!("route build cancelled after final segment");
            return BuildOutcome::Cancelled;
        }

        let coordinates: Vec<Coordinate> = segments
            .iter()
            .flat_map(|segment| segment.path.iter().copied())
            .collect();
        if coordinates.len() < 2 {
            tracing::info!("no segment of {} succeeded, no path drawn", total);
            return BuildOutcome::NoPath;
        }

        tracing::info!(
            "{:?} route stitched: {}/{} segments, {} points",
            mode,
            segments.len(),
            total,
            coordinates.len()
        );
        BuildOutcome::Path(RoutePath {
            segments,
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::cancel::Generation;
    use crate::directions::fakes::ScriptedDirections;

    fn point(name: &str, lat: f64, lon: f64) -> LocationPoint {
        LocationPoint {
            name: name.into(),
            coordinate: Some(Coordinate { lat, lon }),
            distance_from_start_km: None,
            details: None,
        }
    }

    fn unplaced(name: &str) -> LocationPoint {
        LocationPoint {
            name: name.into(),
            coordinate: None,
            distance_from_start_km: None,
            details: None,
        }
    }

    fn galicia() -> Vec<LocationPoint> {
        vec![
            point("Sarria", 42.7806, -7.4147),
            point("Portomarín", 42.8075, -7.6158),
            point("Palas de Rei", 42.8731, -7.8689),
            point("Arzúa", 42.9264, -8.1636),
            point("Santiago", 42.8806, -8.5446),
        ]
    }

    fn builder(directions: Arc<ScriptedDirections>) -> RouteBuilder {
        RouteBuilder::new(directions).with_overview_throttle(Duration::ZERO)
    }

    #[tokio::test]
    async fn fewer_than_two_located_points_is_no_path() {
        let directions = Arc::new(ScriptedDirections::default());
        let builder = builder(directions.clone());
        let token = CancelToken::never();

        assert_eq!(builder.build(&[], RouteMode::Detail, &token).await, BuildOutcome::NoPath);

        let points = vec![unplaced("Alto del Perdón"), point("Obanos", 42.6794, -1.7853)];
        assert_eq!(
            builder.build(&points, RouteMode::Detail, &token).await,
            BuildOutcome::NoPath
        );
        assert_eq!(directions.call_count(), 0);
    }

    #[tokio::test]
    async fn one_segment_per_consecutive_pair() {
        let directions = Arc::new(ScriptedDirections::default());
        let points = galicia();
        let path = builder(directions.clone())
            .build(&points, RouteMode::Detail, &CancelToken::never())
            .await
            .into_path()
            .expect("path");

        assert_eq!(path.segments.len(), points.len() - 1);
        assert_eq!(directions.call_count(), points.len() - 1);
        assert_eq!(path.coordinates.len(), 2 * (points.len() - 1));
        assert_eq!(path.coordinates.first(), points[0].coordinate.as_ref());
        assert_eq!(path.coordinates.last(), points[4].coordinate.as_ref());
        assert!(path.distance_km() > 0.0);
    }

    #[tokio::test]
    async fn failed_interior_segment_is_skipped() {
        let directions = Arc::new(ScriptedDirections::failing_on([1]));
        let points = galicia();
        let path = builder(directions.clone())
            .build(&points, RouteMode::Detail, &CancelToken::never())
            .await
            .into_path()
            .expect("partial path");

        assert_eq!(directions.call_count(), 4);
        let pairs: Vec<(usize, usize)> = path
            .segments
            .iter()
            .map(|s| (s.from_index, s.to_index))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (2, 3), (3, 4)]);

        let expected: Vec<Coordinate> = [0, 1, 2, 3, 3, 4]
            .into_iter()
            .map(|i| points[i].coordinate.unwrap())
            .collect();
        assert_eq!(path.coordinates, expected);
    }

    #[tokio::test]
    async fn every_segment_failing_is_no_path() {
        let directions = Arc::new(ScriptedDirections::failing_on([0, 1]));
        let points = galicia()[..3].to_vec();
        assert_eq!(
            builder(directions)
                .build(&points, RouteMode::Detail, &CancelToken::never())
                .await,
            BuildOutcome::NoPath
        );
    }

    #[tokio::test]
    async fn points_without_coordinates_are_dropped() {
        let directions = Arc::new(ScriptedDirections::default());
        let points = vec![
            point("Puente la Reina", 42.6722, -1.8144),
            unplaced("Mañeru"),
            point("Cirauqui", 42.6761, -1.8911),
            point("Estella", 42.6713, -2.0321),
        ];
        let path = builder(directions)
            .build(&points, RouteMode::Detail, &CancelToken::never())
            .await
            .into_path()
            .unwrap();
        let pairs: Vec<(usize, usize)> = path
            .segments
            .iter()
            .map(|s| (s.from_index, s.to_index))
            .collect();
        assert_eq!(pairs, vec![(0, 2), (2, 3)]);
    }

    #[tokio::test]
    async fn cancelled_before_start_requests_nothing() {
        let directions = Arc::new(ScriptedDirections::default());
        let generation = Generation::new();
        let token = generation.advance();
        generation.cancel_all();

        let outcome = builder(directions.clone())
            .build(&galicia(), RouteMode::Overview, &token)
            .await;
        assert_eq!(outcome, BuildOutcome::Cancelled);
        assert_eq!(directions.call_count(), 0);
    }

    #[tokio::test]
    async fn cancellation_mid_flight_stops_at_next_segment() {
        let generation = Generation::new();
        let token = generation.advance();
        let canceller = generation.clone();
        let directions = Arc::new(ScriptedDirections::default().on_call(move |n| {
            if n == 1 {
                canceller.cancel_all();
            }
        }));

        let outcome = builder(directions.clone())
            .build(&galicia(), RouteMode::Detail, &token)
            .await;
        assert_eq!(outcome, BuildOutcome::Cancelled);
        assert_eq!(directions.call_count(), 2);
    }

    #[tokio::test]
    async fn overview_requests_are_throttled() {
        let directions = Arc::new(ScriptedDirections::default());
        let builder = RouteBuilder::new(directions).with_overview_throttle(Duration::from_millis(20));
        let points = galicia()[..4].to_vec();

        let started = Instant::now();
        let outcome = builder
            .build(&points, RouteMode::Overview, &CancelToken::never())
            .await;
        assert!(matches!(outcome, BuildOutcome::Path(_)));
        // three segments, two pauses
        assert!(started.elapsed() >= Duration::from_millis(40));
    }

    #[tokio::test]
    async fn detail_requests_are_not_throttled() {
        let directions = Arc::new(ScriptedDirections::default());
        let builder = RouteBuilder::new(directions).with_overview_throttle(Duration::from_secs(5));

        let started = Instant::now();
        let outcome = builder
            .build(&galicia(), RouteMode::Detail, &CancelToken::never())
            .await;
        assert!(matches!(outcome, BuildOutcome::Path(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
