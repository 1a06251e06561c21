//! Blue-noise node generation in bounded 2D domains.
//!
//! Layout
//! - `generators`: one type per family (lattice, HCP, Fibonacci, constant-Δθ
//!   rings, Poisson-disk, glass, CVT) behind the `NodeGenerator` trait, plus
//!   the `NodeConfig` intake and the `GeneratorKind` runtime dispatch.
//! - `spatial`: kd-tree radius queries and the Poisson-disk bucket grid.
//! - `voronoi`: domain-clipped Voronoi cells used by Lloyd relaxation.
//! - `geom2`: ordered half-plane intersection and polygon helpers.
//! - `domain`, `mesh`, `error`: shared plumbing.
//!
//! Randomness is always passed in explicitly; a `ReplayToken` reproduces a run.

pub mod api;
pub mod domain;
pub mod error;
pub mod generators;
pub mod geom2;
pub mod mesh;
pub mod spatial;
pub mod voronoi;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// A 2D position.
pub type Point = nalgebra::Vector2<f64>;

pub use domain::{Domain, Shape};
pub use error::GeneratorError;
pub use generators::{generate_nodes, NodeConfig, NodeGenerator, PointSet, ReplayToken};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::domain::{Domain, Shape};
    pub use crate::error::GeneratorError;
    pub use crate::generators::{
        generate_nodes, GeneratorKind, Method, NodeConfig, NodeGenerator, NodeSample, PointSet,
        ReplayToken,
    };
    pub use crate::voronoi::{ClippedVoronoi, VoronoiBuilder};
    pub use crate::Point;
}
