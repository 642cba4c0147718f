use crate::domain::Polygon;
use crate::error::{GridError, Result};
use crate::geometry::{BoundingBox, bounding_box};

/// Ordered polygons of one land parcel
///
/// Polygons are addressed by position. Removing one shifts every later
/// polygon down by one, so indices held by callers go stale after a delete.
/// Overlapping polygons are allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonSet {
    polygons: Vec<Polygon>,
}

impl PolygonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a polygon, returning its index
    pub fn add(&mut self, polygon: Polygon) -> usize {
        self.polygons.push(polygon);
        self.polygons.len() - 1
    }

    /// Overwrite the polygon at `index` with an edited ring, returning the old one
    pub fn replace_vertex_path(&mut self, index: usize, polygon: Polygon) -> Result<Polygon> {
        let len = self.polygons.len();
        let slot = self
            .polygons
            .get_mut(index)
            .ok_or(GridError::IndexOutOfRange { index, len })?;
        Ok(std::mem::replace(slot, polygon))
    }

    /// Remove the polygon at `index`, shifting later polygons down
    pub fn remove_at(&mut self, index: usize) -> Result<Polygon> {
        if index >= self.polygons.len() {
            return Err(GridError::IndexOutOfRange {
                index,
                len: self.polygons.len(),
            });
        }
        Ok(self.polygons.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Polygon> {
        self.polygons.get(index)
    }

    /// Like [`get`](Self::get) but reporting a missing index as an error
    pub fn try_get(&self, index: usize) -> Result<&Polygon> {
        self.polygons.get(index).ok_or(GridError::IndexOutOfRange {
            index,
            len: self.polygons.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Polygon> {
        self.polygons.iter()
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Combined envelope of every polygon, `None` for an empty set
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.polygons
            .iter()
            .map(bounding_box)
            .reduce(|acc, b| acc.union(&b))
    }
}

impl From<Vec<Polygon>> for PolygonSet {
    fn from(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }
}

impl<'a> IntoIterator for &'a PolygonSet {
    type Item = &'a Polygon;
    type IntoIter = std::slice::Iter<'a, Polygon>;

    fn into_iter(self) -> Self::IntoIter {
        self.polygons.iter()
    }
}
