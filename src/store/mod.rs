//! Persistence collaborators for parcel polygon sets
//!
//! The store owns the association between a parcel record and its polygons,
//! plus whatever authorization and history it keeps. Saving always replaces
//! the whole array.

pub mod file;
pub mod http;

pub use file::FileStore;
pub use http::HttpStore;

use crate::parcel::PolygonSet;
use anyhow::Result;

/// Identifier of a land parcel record
pub type ParcelId = u64;

pub trait ParcelStore {
    /// Load a parcel's polygons; a parcel without polygons yields an empty set
    fn load(&self, parcel: ParcelId) -> Result<PolygonSet>;

    /// Overwrite a parcel's polygons
    fn save(&self, parcel: ParcelId, polygons: &PolygonSet) -> Result<()>;
}
