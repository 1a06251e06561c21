//! Flat re-export surface for the CLI, benches and example programs.

// Domains and errors
pub use crate::domain::{Domain, Shape, DISK_CLIP_SIDES};
pub use crate::error::GeneratorError;
// Generators
pub use crate::generators::{
    generate_nodes, relax, ConstantDThetaGenerator, ConstantDThetaParams, CvtGenerator,
    CvtParams, FibonacciDiskGenerator, FibonacciParams, GeneratorKind, GlassGenerator,
    GlassParams, HcpGenerator, LatticeGenerator, LatticeParams, Method, NodeConfig,
    NodeGenerator, NodeSample, PointSet, PoissonDiskGenerator, PoissonDiskParams, ReplayToken,
    SeedMethod, Termination, GOLDEN_ANGLE,
};
// Spatial queries and cells
pub use crate::mesh::Grid2;
pub use crate::spatial::{GridAccelerator, SpatialIndex};
pub use crate::voronoi::{ClippedVoronoi, VoronoiBuilder, VoronoiCell};
