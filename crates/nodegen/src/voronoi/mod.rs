//! Bounded Voronoi cells of a point set.
//!
//! The CVT stage only needs, per generator, the centroid of its cell clipped
//! to the domain; `VoronoiBuilder` is the seam where that computation plugs in.

mod clipped;

pub use clipped::ClippedVoronoi;

use crate::domain::Domain;
use crate::Point;

/// One clipped Voronoi cell.
#[derive(Clone, Debug, PartialEq)]
pub struct VoronoiCell {
    /// The input point this cell belongs to. Cells come back in input order.
    pub generator: Point,
    /// Cell polygon, counter-clockwise. Empty for a degenerate cell.
    pub vertices: Vec<Point>,
    /// Area centroid; the generator itself when the cell is degenerate.
    pub centroid: Point,
    pub area: f64,
}

impl VoronoiCell {
    pub fn is_degenerate(&self) -> bool {
        self.vertices.len() < 3
    }
}

/// Computes the domain-clipped Voronoi cell of every input point.
///
/// Implementations return exactly one cell per point, in input order.
pub trait VoronoiBuilder {
    fn cells(&self, points: &[Point], domain: &Domain) -> Vec<VoronoiCell>;
}

impl<T: VoronoiBuilder + ?Sized> VoronoiBuilder for &T {
    fn cells(&self, points: &[Point], domain: &Domain) -> Vec<VoronoiCell> {
        (**self).cells(points, domain)
    }
}
