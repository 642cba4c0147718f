use crate::domain::{GeoPoint, Polygon};

/// Axis-aligned envelope in degrees
///
/// Plain min/max over latitude and longitude; rings crossing the
/// antimeridian are not unwrapped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Tightest box around the points, `None` for an empty slice
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        Some(Self::around(*first, rest))
    }

    fn around(first: GeoPoint, rest: &[GeoPoint]) -> Self {
        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lng: first.lng,
            max_lng: first.lng,
        };
        bounds.expand(rest);
        bounds
    }

    /// Expand bounds to include another set of points
    pub fn expand(&mut self, points: &[GeoPoint]) {
        for p in points {
            self.min_lat = self.min_lat.min(p.lat);
            self.max_lat = self.max_lat.max(p.lat);
            self.min_lng = self.min_lng.min(p.lng);
            self.max_lng = self.max_lng.max(p.lng);
        }
    }

    /// Smallest box covering both
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_lat: self.min_lat.min(other.min_lat),
            max_lat: self.max_lat.max(other.max_lat),
            min_lng: self.min_lng.min(other.min_lng),
            max_lng: self.max_lng.max(other.max_lng),
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// True when the box has zero extent along either axis
    pub fn is_degenerate(&self) -> bool {
        self.lat_span() == 0.0 || self.lng_span() == 0.0
    }
}

/// Bounding box of a polygon's current vertices
///
/// Polygons always hold at least one vertex, so this never fails; one- and
/// two-vertex rings give a zero-area box.
pub fn bounding_box(polygon: &Polygon) -> BoundingBox {
    let vertices = polygon.vertices();
    BoundingBox::around(vertices[0], &vertices[1..])
}
