pub mod bounds;
pub mod contains;
pub mod projection;
pub mod simplify;

pub use bounds::{BoundingBox, bounding_box};
pub use contains::contains;
pub use projection::{Projector, area_m2};
pub use simplify::{epsilon_for_meters, simplify_ring};
