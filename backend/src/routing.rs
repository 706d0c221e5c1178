use crate::models::Coordinate;

const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Evenly spaced points from `start` to `end`, both included.
pub fn interpolate_segment(start: Coordinate, end: Coordinate, steps: usize) -> Vec<Coordinate> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| start.interpolate(end, i as f64 / steps as f64))
        .collect()
}

pub fn approximate_distance_km(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| haversine_km(w[0], w[1])).sum()
}

pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}
