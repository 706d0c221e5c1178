//! Map display refresh: which annotations and which stitched path the map
//! should show for the currently focused day.
//!
//! Every refresh starts a new generation. Work belonging to an older
//! generation may still finish, but it is discarded instead of published, so
//! the visible state always reflects the most recent focus change.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::{
    cancel::{CancelToken, Generation},
    itinerary,
    models::{AnnotationRole, LocationPoint, MapAnnotation, RouteBounds},
    route_builder::{BuildOutcome, RouteBuilder, RouteMode, RoutePath},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "day", rename_all = "lowercase")]
pub enum Focus {
    Overview,
    Day(u32),
}

impl From<Option<u32>> for Focus {
    fn from(day: Option<u32>) -> Self {
        day.map_or(Focus::Overview, Focus::Day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Empty,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefreshOutcome {
    Success,
    Empty,
    Cancelled,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplaySnapshot {
    pub status: DisplayStatus,
    /// Focus of the published annotations and path, not of a refresh in flight.
    pub focus: Option<Focus>,
    pub generation: u64,
    pub annotations: Vec<MapAnnotation>,
    pub path: Option<RoutePath>,
    pub viewport: Option<RouteBounds>,
}

/// Padding added around content when fitting the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMargin {
    /// Share of the content span added on each side.
    pub fraction: f64,
    /// Lower bound for the padding, in degrees.
    pub min_degrees: f64,
}

impl Default for ViewportMargin {
    fn default() -> Self {
        Self {
            fraction: 0.1,
            min_degrees: 0.005,
        }
    }
}

pub struct MapDisplay {
    builder: RouteBuilder,
    margin: ViewportMargin,
    generation: Generation,
    state: Mutex<DisplaySnapshot>,
}

impl MapDisplay {
    pub fn new(builder: RouteBuilder, margin: ViewportMargin) -> Self {
        Self {
            builder,
            margin,
            generation: Generation::new(),
            state: Mutex::new(DisplaySnapshot::default()),
        }
    }

    pub fn snapshot(&self) -> DisplaySnapshot {
        self.lock().clone()
    }

    /// Abandon whatever refresh is in flight. Published state is kept.
    pub fn cancel(&self) {
        let mut state = self.lock();
        self.generation.cancel_all();
        if state.status == DisplayStatus::Loading {
            state.status = DisplayStatus::Cancelled;
        }
        state.generation = self.generation.current();
    }

    pub async fn refresh(&self, focus: Focus) -> RefreshOutcome {
        let token = {
            let mut state = self.lock();
            let token = self.generation.advance();
            state.status = DisplayStatus::Loading;
            state.generation = token.generation();
            token
        };
        tracing::debug!("display refresh {} for {:?}", token.generation(), focus);

        let (points, mode, annotations) = match focus {
            Focus::Overview => {
                let points = itinerary::overview_points();
                let annotations = overview_annotations();
                (points, RouteMode::Overview, annotations)
            }
            Focus::Day(day) => match itinerary::route_detail(day) {
                Some(detail) => {
                    let points = itinerary::detail_points(&detail);
                    let annotations = detail_annotations(day, &detail.start, &detail.waypoints, &detail.end);
                    (points, RouteMode::Detail, annotations)
                }
                None => {
                    tracing::info!("no route detail for day {day}");
                    (Vec::new(), RouteMode::Detail, Vec::new())
                }
            },
        };

        if usable_points(&points) < 2 {
            return self.publish_empty(&token, focus);
        }

        match self.builder.build(&points, mode, &token).await {
            BuildOutcome::Cancelled => {
                tracing::debug!("display refresh {} superseded", token.generation());
                RefreshOutcome::Cancelled
            }
            BuildOutcome::Path(path) => self.publish_success(&token, focus, annotations, Some(path)),
            BuildOutcome::NoPath => self.publish_success(&token, focus, annotations, None),
        }
    }

    fn publish_success(
        &self,
        token: &CancelToken,
        focus: Focus,
        annotations: Vec<MapAnnotation>,
        path: Option<RoutePath>,
    ) -> RefreshOutcome {
        let mut state = self.lock();
        if token.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }

        let content = match &path {
            Some(path) => path.bounds(),
            None => RouteBounds::enclosing(annotations.iter().map(|a| a.coordinate)),
        };
        if let Some(bounds) = content {
            state.viewport = Some(fit_viewport(bounds, self.margin));
        }
        state.focus = Some(focus);
        state.annotations = annotations;
        state.path = path;
        state.status = DisplayStatus::Success;
        RefreshOutcome::Success
    }

    fn publish_empty(&self, token: &CancelToken, focus: Focus) -> RefreshOutcome {
        let mut state = self.lock();
        if token.is_cancelled() {
            return RefreshOutcome::Cancelled;
        }
        state.focus = Some(focus);
        state.annotations.clear();
        state.path = None;
        state.status = DisplayStatus::Empty;
        RefreshOutcome::Empty
    }

    fn lock(&self) -> MutexGuard<'_, DisplaySnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn usable_points(points: &[LocationPoint]) -> usize {
    points.iter().filter(|p| p.coordinate.is_some()).count()
}

fn overview_annotations() -> Vec<MapAnnotation> {
    itinerary::itinerary()
        .iter()
        .map(|dest| MapAnnotation {
            name: dest.name.clone(),
            coordinate: dest.coordinate,
            role: AnnotationRole::Destination,
            day: Some(dest.day),
        })
        .collect()
}

fn detail_annotations(
    day: u32,
    start: &Option<LocationPoint>,
    waypoints: &[LocationPoint],
    end: &Option<LocationPoint>,
) -> Vec<MapAnnotation> {
    let tagged = start
        .iter()
        .map(|p| (p, AnnotationRole::Start))
        .chain(waypoints.iter().map(|p| (p, AnnotationRole::Waypoint)))
        .chain(end.iter().map(|p| (p, AnnotationRole::End)));

    tagged
        .filter_map(|(point, role)| {
            point.coordinate.map(|coordinate| MapAnnotation {
                name: point.name.clone(),
                coordinate,
                role,
                day: Some(day),
            })
        })
        .collect()
}

pub fn fit_viewport(bounds: RouteBounds, margin: ViewportMargin) -> RouteBounds {
    let lat_pad = ((bounds.max_lat - bounds.min_lat) * margin.fraction).max(margin.min_degrees);
    let lon_pad = ((bounds.max_lon - bounds.min_lon) * margin.fraction).max(margin.min_degrees);
    RouteBounds {
        min_lat: (bounds.min_lat - lat_pad).max(-90.0),
        max_lat: (bounds.max_lat + lat_pad).min(90.0),
        min_lon: (bounds.min_lon - lon_pad).max(-180.0),
        max_lon: (bounds.max_lon + lon_pad).min(180.0),
    }
}
