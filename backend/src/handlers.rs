// Handlers for the itinerary, map, translation, location and weather API

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::AppState;
use crate::cancel::CancelToken;
use crate::display::{DisplaySnapshot, Focus};
use crate::error::AppError;
use crate::gpx_export::encode_route_as_gpx;
use crate::itinerary;
use crate::location::{LocationEvent, LocationTracker};
use crate::models::{
    ApiError, Coordinate, DayResponse, Destination, FocusRequest, FocusResponse,
    NearestStageResponse, PositionQuery, RouteMetadata, RouteResponse, TranslateRequest,
    TranslateResponse,
};
use crate::route_builder::RouteMode;
use crate::translation::Language;
use crate::weather::WeatherReport;

pub type ApiFailure = (StatusCode, Json<ApiError>);

/// Device location report, as sent by the client.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LocationReport {
    Position { lat: f64, lon: f64 },
    PermissionDenied,
    Failed { reason: String },
}

/// GET /api/itinerary - All destinations in day order
pub async fn list_itinerary() -> Json<Vec<Destination>> {
    Json(itinerary::itinerary().to_vec())
}

/// GET /api/itinerary/:day - Destination plus start, waypoints and end of the day
pub async fn get_day(Path(day): Path<u32>) -> Result<Json<DayResponse>, ApiFailure> {
    let destination = itinerary::destination(day).ok_or_else(|| unknown_day(day))?;
    let detail = itinerary::route_detail(day).ok_or_else(|| unknown_day(day))?;
    Ok(Json(DayResponse {
        destination: destination.clone(),
        detail,
    }))
}

/// GET /api/itinerary/:day/route - Stitched walking path with GPX export
pub async fn get_day_route(
    State(state): State<AppState>,
    Path(day): Path<u32>,
) -> Result<Json<RouteResponse>, ApiFailure> {
    let detail = itinerary::route_detail(day).ok_or_else(|| unknown_day(day))?;
    let points = itinerary::detail_points(&detail);

    let path = state
        .builder
        .build(&points, RouteMode::Detail, &CancelToken::never())
        .await
        .into_path()
        .ok_or_else(|| api_error(AppError::NotFound(format!("no walking path for day {day}"))))?;

    let start = detail.start.as_ref().map_or("departure", |p| p.name.as_str());
    let end = detail.end.as_ref().map_or("arrival", |p| p.name.as_str());
    let name = format!("Day {day}: {start} to {end}");
    let gpx_base64 = encode_route_as_gpx(&name, &path.coordinates, &points).map_err(api_error)?;

    let metadata = match (path.bounds(), path.coordinates.first(), path.coordinates.last()) {
        (Some(bounds), Some(&first), Some(&last)) => Some(RouteMetadata {
            point_count: path.coordinates.len(),
            segment_count: path.segments.len(),
            bounds,
            start: first,
            end: last,
        }),
        _ => None,
    };

    Ok(Json(RouteResponse {
        distance_km: path.distance_km(),
        path: path.coordinates,
        gpx_base64,
        metadata,
    }))
}

/// POST /api/map/focus - Refocus the map on a day, or the whole itinerary when `day` is null
pub async fn focus_map(
    State(state): State<AppState>,
    Json(req): Json<FocusRequest>,
) -> Result<Json<FocusResponse>, ApiFailure> {
    let focus = Focus::from(req.day);
    let display = state.display.clone();
    // Run to completion even if the client goes away, so the display never
    // stays stuck in the loading state.
    let outcome = tokio::spawn(async move { display.refresh(focus).await })
        .await
        .map_err(|err| api_error(AppError::General(format!("refresh task failed: {err}"))))?;

    Ok(Json(FocusResponse {
        outcome,
        snapshot: state.display.snapshot(),
    }))
}

/// POST /api/map/cancel - Abandon the refresh in flight
pub async fn cancel_map(State(state): State<AppState>) -> Json<DisplaySnapshot> {
    state.display.cancel();
    Json(state.display.snapshot())
}

/// GET /api/map - What the map currently shows
pub async fn get_map(State(state): State<AppState>) -> Json<DisplaySnapshot> {
    Json(state.display.snapshot())
}

/// POST /api/translate - Phrasebook translation
pub async fn translate(
    State(state): State<AppState>,
    Json(req): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiFailure> {
    let source = parse_language(&req.source)?;
    let target = parse_language(&req.target)?;
    let translation = state.translation.translate(&req.text, source, target).await;
    Ok(Json(TranslateResponse {
        translation,
        source: source.code().to_string(),
        target: target.code().to_string(),
    }))
}

/// GET /api/nearest?lat=..&lon=.. - Closest end-of-day town
pub async fn nearest_stage(
    State(state): State<AppState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<NearestStageResponse>, ApiFailure> {
    let coordinate = checked_coordinate(query).map_err(api_error)?;
    let (destination, distance_km) = state
        .locator
        .nearest(coordinate)
        .ok_or_else(|| api_error(AppError::NotFound("no stages indexed".into())))?;
    Ok(Json(NearestStageResponse {
        destination: destination.clone(),
        distance_km,
    }))
}

/// GET /api/weather?lat=..&lon=.. - Current conditions, cached per location
pub async fn weather(
    State(state): State<AppState>,
    Query(query): Query<PositionQuery>,
) -> Result<Json<WeatherReport>, ApiFailure> {
    let coordinate = checked_coordinate(query).map_err(api_error)?;
    state
        .weather
        .current(coordinate)
        .await
        .map(Json)
        .map_err(|err| api_error(err.into()))
}

/// POST /api/location - Feed a device location event to the tracker
pub async fn report_location(
    State(state): State<AppState>,
    Json(report): Json<LocationReport>,
) -> Result<StatusCode, ApiFailure> {
    let event = match report {
        LocationReport::Position { lat, lon } => {
            LocationEvent::Position(checked_coordinate(PositionQuery { lat, lon }).map_err(api_error)?)
        }
        LocationReport::PermissionDenied => LocationEvent::PermissionDenied,
        LocationReport::Failed { reason } => LocationEvent::Failed(reason),
    };
    let delivered = state.location.publish(event);
    tracing::debug!("location event delivered to {} subscribers", delivered);
    Ok(StatusCode::ACCEPTED)
}

/// GET /api/location - Last known position and permission flags
pub async fn get_location(State(state): State<AppState>) -> Result<Json<LocationTracker>, ApiFailure> {
    let tracker = state
        .tracker
        .lock()
        .map_err(|_| api_error(AppError::General("location tracker lock poisoned".into())))?;
    Ok(Json(tracker.clone()))
}

fn parse_language(code: &str) -> Result<Language, ApiFailure> {
    Language::from_code(code)
        .ok_or_else(|| api_error(AppError::InvalidData(format!("unsupported language {code:?}"))))
}

fn checked_coordinate(query: PositionQuery) -> Result<Coordinate, AppError> {
    if !(-90.0..=90.0).contains(&query.lat) || !(-180.0..=180.0).contains(&query.lon) {
        return Err(AppError::InvalidData(format!(
            "coordinate out of range: {}, {}",
            query.lat, query.lon
        )));
    }
    Ok(query.into())
}

fn unknown_day(day: u32) -> ApiFailure {
    api_error(AppError::NotFound(format!(
        "day {day} is not part of the {}-day itinerary",
        itinerary::day_count()
    )))
}

/// Convert AppError to API error response
pub fn api_error(err: AppError) -> ApiFailure {
    let status = match &err {
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::InvalidData(_) => StatusCode::BAD_REQUEST,
        AppError::Authentication(_) => StatusCode::UNAUTHORIZED,
        AppError::Permission(_) => StatusCode::FORBIDDEN,
        AppError::Network(_) | AppError::Server(_) => StatusCode::BAD_GATEWAY,
        AppError::General(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("request failed: {}", err);
    } else {
        tracing::debug!("request rejected: {}", err);
    }

    (
        status,
        Json(ApiError {
            message: err.to_string(),
            user_message: err.user_message().to_string(),
            severity: err.severity().as_str().to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_status_mapping() {
        let (status, Json(body)) = api_error(AppError::NotFound("day 40".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.severity, "info");
        assert_eq!(body.message, "not found: day 40");

        let (status, _) = api_error(AppError::Network("timeout".into()));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (status, Json(body)) = api_error(AppError::Config("bad".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.severity, "critical");
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(checked_coordinate(PositionQuery { lat: 42.88, lon: -8.54 }).is_ok());
        assert!(checked_coordinate(PositionQuery { lat: 95.0, lon: 0.0 }).is_err());
        assert!(checked_coordinate(PositionQuery { lat: 0.0, lon: -181.0 }).is_err());
        assert!(checked_coordinate(PositionQuery { lat: f64::NAN, lon: 0.0 }).is_err());
    }

    #[test]
    fn location_reports_deserialize() {
        let report: LocationReport =
            serde_json::from_str(r#"{"kind":"position","lat":42.6,"lon":-5.57}"#).unwrap();
        assert!(matches!(report, LocationReport::Position { .. }));
        let report: LocationReport = serde_json::from_str(r#"{"kind":"permission_denied"}"#).unwrap();
        assert!(matches!(report, LocationReport::PermissionDenied));
    }
}
