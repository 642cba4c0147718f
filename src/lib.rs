//! parcelgrid - Rasterize land parcel boundary polygons into binary occupancy grids

pub mod config;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod parcel;
pub mod raster;
pub mod store;

pub use domain::{GeoPoint, Polygon};
pub use error::{GridError, Result};
pub use parcel::PolygonSet;
pub use raster::{BinaryMatrix, Rasterizer};
