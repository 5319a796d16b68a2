//! Great-circle distances between route points.

use crate::models::{Coordinate, Waypoint};

/// Mean Earth radius used by every distance in the route.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate distance between two points in meters using Haversine formula.
///
/// # Arguments
/// * `lat1`, `lon1` - First point coordinates in decimal degrees
/// * `lat2`, `lon2` - Second point coordinates in decimal degrees
///
/// Non-finite inputs propagate into the result.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // rounding can push antipodal points just past 1.0
    let a = a.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Distance in meters between two coordinates.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    haversine_distance(a.lat, a.lng, b.lat, b.lng)
}

/// Return a copy of `sequence` with every leg distance recomputed.
///
/// The first point loses its distance; each later point gets the distance to
/// its predecessor. Everything else is carried over untouched.
pub fn annotate_distances(sequence: &[Waypoint]) -> Vec<Waypoint> {
    let mut annotated = Vec::with_capacity(sequence.len());
    let mut previous: Option<Coordinate> = None;

    for waypoint in sequence {
        let mut point = waypoint.clone();
        point.distance_from_previous = previous.map(|prev| distance(prev, point.coordinates));
        previous = Some(point.coordinates);
        annotated.push(point);
    }

    annotated
}

/// Sum of the leg distances of an annotated route, in meters.
pub fn total_distance_m(route: &[Waypoint]) -> f64 {
    route
        .iter()
        .filter_map(|waypoint| waypoint.distance_from_previous)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WaypointKind;
    use uuid::Uuid;

    const ONE_DEGREE_M: f64 = 111_194.93;

    fn point(lat: f64, lng: f64) -> Waypoint {
        Waypoint::route_point(Coordinate::new(lat, lng))
    }

    #[test]
    fn haversine_one_degree_of_latitude() {
        // 1 degree of latitude on the mean sphere
        let dist = haversine_distance(0.0, 0.0, 1.0, 0.0);
        assert!((dist - ONE_DEGREE_M).abs() < 1.0);
    }

    #[test]
    fn same_point_is_zero() {
        let a = Coordinate::new(22.8456, 89.5466);
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(22.8456, 89.5466);
        let b = Coordinate::new(21.9, 91.2);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-6);
    }

    #[test]
    fn diagonal_degree_combines_both_axes() {
        let dist = distance(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0));
        assert!((dist - 157_249.0).abs() < 5.0, "got {dist}");
    }

    #[test]
    fn antipodal_points_stay_finite() {
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_M;
        for lat_step in -900..=900 {
            let lat = lat_step as f64 / 10.0;
            for lng in (0..360).step_by(7) {
                let lng = lng as f64;
                let dist = distance(Coordinate::new(lat, lng), Coordinate::new(-lat, lng - 180.0));
                assert!(dist.is_finite(), "NaN at ({lat}, {lng})");
                assert!((dist - half_circumference).abs() < 1.0, "got {dist} at ({lat}, {lng})");
            }
        }
    }

    #[test]
    fn antipodal_legs_keep_the_total_finite() {
        let route = annotate_distances(&[point(87.5, 359.3), point(-87.5, 179.3), point(0.0, 0.0)]);
        assert!(total_distance_m(&route).is_finite());
    }

    #[test]
    fn nan_input_propagates() {
        let dist = distance(Coordinate::new(f64::NAN, 0.0), Coordinate::new(0.0, 0.0));
        assert!(dist.is_nan());
    }

    #[test]
    fn annotate_clears_first_and_fills_the_rest() {
        let mut first = point(0.0, 0.0);
        first.distance_from_previous = Some(42.0);
        let sequence = vec![first, point(0.0, 1.0), point(1.0, 1.0)];

        let annotated = annotate_distances(&sequence);

        assert_eq!(annotated.len(), 3);
        assert!(annotated[0].distance_from_previous.is_none());
        for i in 1..annotated.len() {
            let expected = distance(sequence[i - 1].coordinates, sequence[i].coordinates);
            let actual = annotated[i].distance_from_previous.unwrap();
            assert!((actual - expected).abs() < 1e-9);
        }
        // input untouched
        assert_eq!(sequence[0].distance_from_previous, Some(42.0));
        assert!(sequence[1].distance_from_previous.is_none());
    }

    #[test]
    fn annotate_keeps_identity_and_tags() {
        let polygon_id = Uuid::new_v4();
        let mut tagged = Waypoint::polygon_vertex(Coordinate::new(1.0, 1.0), polygon_id);
        tagged.kind = WaypointKind::PolygonEnd;
        let sequence = vec![point(0.0, 0.0), tagged.clone()];

        let annotated = annotate_distances(&sequence);

        assert_eq!(annotated[1].id(), tagged.id());
        assert_eq!(annotated[1].kind, WaypointKind::PolygonEnd);
        assert_eq!(annotated[1].polygon_id, Some(polygon_id));
        assert_eq!(annotated[0].id(), sequence[0].id());
    }

    #[test]
    fn annotate_empty_sequence() {
        assert!(annotate_distances(&[]).is_empty());
    }

    #[test]
    fn total_distance_sums_legs() {
        let route = annotate_distances(&[point(0.0, 0.0), point(0.0, 1.0), point(1.0, 1.0)]);
        assert!((total_distance_m(&route) - 2.0 * ONE_DEGREE_M).abs() < 2.0);
    }
}
