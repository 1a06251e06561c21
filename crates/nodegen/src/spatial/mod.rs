//! Spatial acceleration structures.
//!
//! - `SpatialIndex`: insert + radius/nearest queries (kd-tree), backs glass
//!   dart-throwing and the Voronoi neighbour search.
//! - `GridAccelerator`: fixed `r/√2` bucket grid for Poisson-disk validity tests.

mod grid;
mod index;

pub use grid::GridAccelerator;
pub use index::SpatialIndex;
