use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use geo_types::Point;
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};

use crate::error::AppError;
use crate::models::{Coordinate, LocationPoint};

const CREATOR: &str = "camino";

/// GPX 1.1 document with the path as one track and the located stops as
/// waypoints, base64 encoded.
pub fn encode_route_as_gpx(
    name: &str,
    path: &[Coordinate],
    stops: &[LocationPoint],
) -> Result<String, AppError> {
    let buffer = write_gpx(name, path, stops)?;
    Ok(BASE64.encode(buffer))
}

/// Raw GPX bytes, for writing straight to disk.
pub fn write_gpx(
    name: &str,
    path: &[Coordinate],
    stops: &[LocationPoint],
) -> Result<Vec<u8>, AppError> {
    let mut gpx = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.into()),
        ..Default::default()
    };

    gpx.waypoints = stops.iter().filter_map(stop_waypoint).collect();

    let mut track = Track {
        name: Some(name.into()),
        ..Default::default()
    };
    let mut segment = TrackSegment::new();
    segment.points.extend(path.iter().map(to_waypoint));
    track.segments.push(segment);
    gpx.tracks.push(track);

    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(buffer)
}

fn to_waypoint(coord: &Coordinate) -> Waypoint {
    Waypoint::new(Point::new(coord.lon, coord.lat))
}

fn stop_waypoint(stop: &LocationPoint) -> Option<Waypoint> {
    let mut waypoint = to_waypoint(&stop.coordinate?);
    waypoint.name = Some(stop.name.clone());
    waypoint.description = stop.details.clone();
    Some(waypoint)
}
