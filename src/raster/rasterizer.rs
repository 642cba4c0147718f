use super::BinaryMatrix;
use crate::domain::{GeoPoint, Polygon};
use crate::geometry::{BoundingBox, bounding_box, contains};
use crate::parcel::PolygonSet;

/// Sampling steps per axis when none is configured
pub const DEFAULT_RESOLUTION: usize = 50;

/// Samples polygons on a fixed `resolution x resolution` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rasterizer {
    resolution: usize,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl Rasterizer {
    pub fn new(resolution: usize) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn rasterize(&self, polygon: &Polygon) -> BinaryMatrix {
        rasterize(polygon, self.resolution)
    }

    pub fn rasterize_union(&self, set: &PolygonSet) -> BinaryMatrix {
        rasterize_union(set, self.resolution)
    }
}

/// Rasterize one polygon over its own bounding box
///
/// Row `r` samples latitude `min_lat + r * lat_step` and column `c` samples
/// longitude `min_lng + c * lng_step`, with steps of `span / resolution`.
/// A zero-extent axis gets a zero step, so degenerate rings still yield a
/// well-formed `resolution x resolution` matrix sampled on the ring itself.
pub fn rasterize(polygon: &Polygon, resolution: usize) -> BinaryMatrix {
    let bounds = bounding_box(polygon);
    if bounds.is_degenerate() {
        log::debug!(
            "degenerate bounds for {}-vertex ring, sampling with zero step",
            polygon.vertex_count()
        );
    }
    sample_grid(&bounds, resolution, |p| contains(p, polygon))
}

/// Rasterize every polygon of a set onto one grid over the set's combined
/// bounding box; a cell is 1 when any polygon covers it
///
/// An empty set yields an empty matrix.
pub fn rasterize_union(set: &PolygonSet, resolution: usize) -> BinaryMatrix {
    let Some(bounds) = set.bounding_box() else {
        log::debug!("empty polygon set, nothing to rasterize");
        return BinaryMatrix::default();
    };
    sample_grid(&bounds, resolution, |p| {
        set.iter().any(|polygon| contains(p, polygon))
    })
}

fn sample_grid<F>(bounds: &BoundingBox, resolution: usize, classify: F) -> BinaryMatrix
where
    F: Fn(GeoPoint) -> bool,
{
    if resolution == 0 {
        return BinaryMatrix::default();
    }

    let lat_step = bounds.lat_span() / resolution as f64;
    let lng_step = bounds.lng_span() / resolution as f64;

    let rows = (0..resolution)
        .map(|r| {
            let lat = bounds.min_lat + r as f64 * lat_step;
            (0..resolution)
                .map(|c| {
                    let lng = bounds.min_lng + c as f64 * lng_step;
                    u8::from(classify(GeoPoint::new(lat, lng)))
                })
                .collect()
        })
        .collect();

    BinaryMatrix::from_rows_unchecked(rows)
}
