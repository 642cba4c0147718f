pub mod point;
pub mod polygon;

pub use point::GeoPoint;
pub use polygon::{MIN_RING_VERTICES, Polygon};
