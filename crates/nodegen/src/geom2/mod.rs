//! 2D half-plane geometry for clipped Voronoi cells.
//!
//! - `Hs2`: closed half-plane `n·x <= c`, including perpendicular bisectors.
//! - `Poly2`: angle-ordered half-plane set with a deque-sweep intersection.
//! - `polygon_area`, `polygon_area_centroid`: shoelace formulas on vertex loops.

pub mod ordered;
mod types;
mod util;

pub use ordered::{HalfspaceIntersection, Poly2};
pub use types::{GeomCfg, Hs2};
pub use util::{polygon_area, polygon_area_centroid};

#[cfg(test)]
mod tests;
