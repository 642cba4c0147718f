use crate::domain::{GeoPoint, MIN_RING_VERTICES, Polygon};
use geo::{LineString, Simplify};

/// Ramer-Douglas-Peucker simplification of a ring, epsilon in degrees
///
/// Returns the input unchanged when it is already minimal or when
/// simplification would collapse it below a triangle.
pub fn simplify_ring(polygon: &Polygon, epsilon: f64) -> Polygon {
    if polygon.vertex_count() <= MIN_RING_VERTICES {
        return polygon.clone();
    }

    // Close the ring explicitly so the closing edge takes part
    let mut line: LineString<f64> = polygon.vertices().iter().map(|p| p.to_coord()).collect();
    line.close();

    let mut simplified: Vec<GeoPoint> = line
        .simplify(&epsilon)
        .0
        .into_iter()
        .map(GeoPoint::from)
        .collect();
    simplified.pop();

    if simplified.len() < MIN_RING_VERTICES {
        log::debug!(
            "simplification to {} vertices rejected, keeping {}",
            simplified.len(),
            polygon.vertex_count()
        );
        return polygon.clone();
    }

    Polygon::from_vertices(simplified).unwrap_or_else(|_| polygon.clone())
}

/// Epsilon in degrees corresponding to a tolerance in meters
pub fn epsilon_for_meters(meters: f64) -> f64 {
    meters / 111320.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_untouched() {
        let tri = Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(simplify_ring(&tri, 10.0), tri);
    }

    #[test]
    fn test_removes_near_collinear_vertices() {
        // Square with a wobbly south edge
        let mut vertices: Vec<GeoPoint> = (0..=10)
            .map(|i| {
                let lng = i as f64 * 0.1;
                let lat = if i % 2 == 0 { 0.0 } else { 0.00001 };
                GeoPoint::new(lat, lng)
            })
            .collect();
        vertices.push(GeoPoint::new(1.0, 1.0));
        vertices.push(GeoPoint::new(1.0, 0.0));
        let poly = Polygon::new(vertices).unwrap();

        let simplified = simplify_ring(&poly, 0.001);
        assert!(simplified.vertex_count() < poly.vertex_count());
        assert!(simplified.vertex_count() >= 3);
        assert_ne!(simplified.vertices().first(), simplified.vertices().last());
    }

    #[test]
    fn test_never_collapses_below_triangle() {
        let thin = Polygon::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(0.00001, 2.0),
            GeoPoint::new(0.0, 3.0),
        ])
        .unwrap();
        let simplified = simplify_ring(&thin, 1.0);
        assert!(simplified.vertex_count() >= 3);
    }

    #[test]
    fn test_epsilon_for_meters() {
        assert!((epsilon_for_meters(111320.0) - 1.0).abs() < 1e-12);
    }
}
