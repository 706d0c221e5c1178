use serde::{Deserialize, Serialize};

pub use shared::{
    AnnotationRole, ApiError, Coordinate, Destination, LocationPoint, MapAnnotation, RouteBounds,
    RouteDetail, RouteMetadata, RouteResponse, TranslateRequest, TranslateResponse,
};

use crate::display::{DisplaySnapshot, RefreshOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayResponse {
    pub destination: Destination,
    pub detail: RouteDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FocusRequest {
    /// `None` focuses the whole itinerary.
    #[serde(default)]
    pub day: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusResponse {
    pub outcome: RefreshOutcome,
    pub snapshot: DisplaySnapshot,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PositionQuery {
    pub lat: f64,
    pub lon: f64,
}

impl From<PositionQuery> for Coordinate {
    fn from(query: PositionQuery) -> Self {
        Coordinate::new(query.lat, query.lon)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestStageResponse {
    pub destination: Destination,
    pub distance_km: f64,
}
