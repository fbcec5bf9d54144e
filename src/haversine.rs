//! Great-circle distance on a spherical Earth.
//!
//! Used to measure route polylines. Ignores road curvature and elevation,
//! which is fine at the granularity of interval stops.

/// Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3958.7613;

/// Haversine distance in miles between two `(lng, lat)` points.
pub fn haversine_miles(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lng1, lat1) = from;
    let (lng2, lat2) = to;

    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = lat2_rad - lat1_rad;
    let delta_lng = (lng2 - lng1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_MILES * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_miles((-115.1, 36.1), (-115.1, 36.1));
        assert!(dist < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas (-115.14, 36.17) to Los Angeles (-118.24, 34.05)
        // Actual distance ~230 miles
        let dist = haversine_miles((-115.14, 36.17), (-118.24, 34.05));
        assert!(dist > 215.0 && dist < 245.0, "LV to LA should be ~230mi, got {}", dist);
    }

    #[test]
    fn test_haversine_symmetric() {
        let a = (-118.2437, 34.0522);
        let b = (-117.6006, 34.2417);
        assert!((haversine_miles(a, b) - haversine_miles(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let dist = haversine_miles((0.0, 0.0), (1.0, 0.0));
        assert!((dist - 69.09).abs() < 0.1, "got {}", dist);
    }
}
