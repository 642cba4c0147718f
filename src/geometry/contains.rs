//! Point-in-polygon classification
//!
//! Non-zero winding-number test over the implicitly closed ring. Orientation
//! is decided with geo's robust predicates, so near-collinear samples do not
//! flip between runs or platforms. Points lying on an edge or vertex count as
//! inside. Self-intersecting rings get a deterministic but unspecified answer.

use crate::domain::{GeoPoint, Polygon};
use geo::Coord;
use geo::kernels::{Kernel, Orientation, RobustKernel};

/// Whether `point` lies inside (or on the boundary of) `polygon`
pub fn contains(point: GeoPoint, polygon: &Polygon) -> bool {
    let p = point.to_coord();
    let mut winding: i64 = 0;

    for (from, to) in polygon.edges() {
        let a = from.to_coord();
        let b = to.to_coord();

        if on_segment(p, a, b) {
            return true;
        }

        if a.y <= p.y {
            if b.y > p.y && orient(a, b, p) == Orientation::CounterClockwise {
                winding += 1;
            }
        } else if b.y <= p.y && orient(a, b, p) == Orientation::Clockwise {
            winding -= 1;
        }
    }

    winding != 0
}

fn orient(a: Coord<f64>, b: Coord<f64>, p: Coord<f64>) -> Orientation {
    <RobustKernel as Kernel<f64>>::orient2d(a, b, p)
}

/// `p` on the closed segment `a`-`b` (a zero-length segment is the point itself)
fn on_segment(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> bool {
    if p.x < a.x.min(b.x) || p.x > a.x.max(b.x) || p.y < a.y.min(b.y) || p.y > a.y.max(b.y) {
        return false;
    }
    orient(a, b, p) == Orientation::Collinear
}
