pub mod editor;
pub mod set;
pub mod wire;

pub use editor::{EditSession, RingSource};
pub use set::PolygonSet;
pub use wire::PersistedPolygons;
