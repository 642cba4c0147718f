pub mod export;
pub mod matrix;
pub mod rasterizer;

pub use export::{DEFAULT_EXPORT_NAME, write_matrix};
pub use matrix::BinaryMatrix;
pub use rasterizer::{DEFAULT_RESOLUTION, Rasterizer, rasterize, rasterize_union};
