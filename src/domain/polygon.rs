use super::GeoPoint;
use crate::error::{GridError, Result};
use geo::LineString;

/// Minimum vertex count of a non-degenerate ring
pub const MIN_RING_VERTICES: usize = 3;

/// A closed boundary ring of one land parcel piece
///
/// The closing edge from the last vertex back to the first is implicit;
/// no duplicated closing vertex is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<GeoPoint>,
}

impl Polygon {
    /// Build a ring, requiring at least three vertices
    ///
    /// An explicit closing vertex equal to the first one is dropped.
    pub fn new(mut vertices: Vec<GeoPoint>) -> Result<Self> {
        if vertices.len() > MIN_RING_VERTICES && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < MIN_RING_VERTICES {
            return Err(GridError::InvalidPolygon {
                required: MIN_RING_VERTICES,
                actual: vertices.len(),
            });
        }
        check_finite(&vertices)?;
        Ok(Self { vertices })
    }

    /// Build a possibly degenerate ring (one or two vertices are accepted)
    ///
    /// Vertices are kept exactly as given. Used by loaders and the rasterizer,
    /// which tolerate degenerate input.
    pub fn from_vertices(vertices: Vec<GeoPoint>) -> Result<Self> {
        if vertices.is_empty() {
            return Err(GridError::InvalidPolygon {
                required: 1,
                actual: 0,
            });
        }
        check_finite(&vertices)?;
        Ok(Self { vertices })
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_valid(&self) -> bool {
        self.vertices.len() >= MIN_RING_VERTICES
    }

    /// Iterate the ring's edges, including the implicit closing edge
    pub fn edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[(i + n - 1) % n], self.vertices[i]))
    }

    pub fn into_vertices(self) -> Vec<GeoPoint> {
        self.vertices
    }

    /// Convert to a `geo` polygon (x = lng, y = lat); geo closes the ring itself
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let exterior: LineString<f64> = self.vertices.iter().map(|p| p.to_coord()).collect();
        geo::Polygon::new(exterior, Vec::new())
    }
}

/// NaN and infinities have no JSON form, so they never enter a ring
fn check_finite(vertices: &[GeoPoint]) -> Result<()> {
    match vertices
        .iter()
        .position(|p| !p.lat.is_finite() || !p.lng.is_finite())
    {
        Some(index) => Err(GridError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}
