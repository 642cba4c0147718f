use thiserror::Error;

/// Errors raised by the geometry, raster and parcel modules.
///
/// All of them are recoverable: a failed operation leaves any
/// [`PolygonSet`](crate::parcel::PolygonSet) it touched unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A strict caller required a proper ring and got too few vertices
    #[error("polygon needs at least {required} vertices, got {actual}")]
    InvalidPolygon { required: usize, actual: usize },

    /// A vertex had a NaN or infinite latitude or longitude
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// A polygon set operation addressed an index that does not exist
    #[error("polygon index {index} out of range (set has {len} polygons)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The persisted coordinate arrays failed shape validation
    #[error("malformed persisted polygons: {0}")]
    MalformedPersistedForm(String),

    /// Matrix rows were ragged or held values other than 0 and 1
    #[error("invalid binary matrix: {0}")]
    InvalidMatrix(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
