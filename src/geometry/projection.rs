use crate::domain::{GeoPoint, Polygon};
use crate::geometry::bounding_box;
use geo::{Area, LineString};

/// Meters per degree of latitude (and of longitude at the equator)
const METERS_PER_DEGREE: f64 = 111320.0;

/// Equirectangular projection from WGS84 to local meters
///
/// - x = (lng - center_lng) * cos(center_lat) * 111320
/// - y = (lat - center_lat) * 111320
///
/// Good enough for parcel-sized areas; no geodesic correction.
#[derive(Debug, Clone)]
pub struct Projector {
    center: GeoPoint,
    cos_lat: f64,
}

impl Projector {
    pub fn new(center: GeoPoint) -> Self {
        Self {
            center,
            cos_lat: center.lat.to_radians().cos(),
        }
    }

    /// Project a point to (x, y) meters relative to the center
    pub fn project(&self, point: GeoPoint) -> (f64, f64) {
        let x = (point.lng - self.center.lng) * self.cos_lat * METERS_PER_DEGREE;
        let y = (point.lat - self.center.lat) * METERS_PER_DEGREE;
        (x, y)
    }

    pub fn project_points(&self, points: &[GeoPoint]) -> Vec<(f64, f64)> {
        points.iter().map(|&p| self.project(p)).collect()
    }
}

/// Approximate ground area of a ring in square meters
///
/// Projects about the center of the ring's bounding box. Degenerate rings
/// have zero area.
pub fn area_m2(polygon: &Polygon) -> f64 {
    let projector = Projector::new(bounding_box(polygon).center());
    let exterior: LineString<f64> = projector.project_points(polygon.vertices()).into();
    geo::Polygon::new(exterior, Vec::new()).unsigned_area()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projector_center() {
        let proj = Projector::new(GeoPoint::new(37.7749, -122.4194));
        let (x, y) = proj.project(GeoPoint::new(37.7749, -122.4194));
        assert!(x.abs() < 0.01);
        assert!(y.abs() < 0.01);
    }

    #[test]
    fn test_projector_1km() {
        let proj = Projector::new(GeoPoint::new(37.7749, -122.4194));

        // 0.009 degrees of latitude is roughly 1 km
        let (_, y) = proj.project(GeoPoint::new(37.7749 + 0.009, -122.4194));
        assert!((y - 1000.0).abs() < 50.0);
    }

    #[test]
    fn test_area_of_equatorial_square() {
        // 0.001 x 0.001 degrees at the equator is about 111.32 m on a side
        let poly = Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.001),
            GeoPoint::new(0.001, 0.001),
            GeoPoint::new(0.001, 0.0),
        ])
        .unwrap();
        let expected = 111.32 * 111.32;
        assert!((area_m2(&poly) - expected).abs() / expected < 0.001);
    }

    #[test]
    fn test_area_degenerate() {
        let pair =
            Polygon::from_vertices(vec![GeoPoint::new(1.0, 1.0), GeoPoint::new(2.0, 2.0)]).unwrap();
        assert_eq!(area_m2(&pair), 0.0);
    }
}
