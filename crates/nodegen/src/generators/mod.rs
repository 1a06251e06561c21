//! Node generators: deterministic layouts, dart throwing, and CVT relaxation.
//!
//! Purpose
//! - Produce ordered 2D point sets over a `Domain` for node-list construction.
//! - Every generator validates its params on construction and does all work
//!   inside one synchronous `generate` call that borrows an owned RNG.
//!
//! Design
//! - Randomness is passed in (`&mut R`) instead of living in process-global
//!   state; `ReplayToken` turns `(seed, index)` into a reproducible `StdRng`.
//! - `GeneratorKind` is the tagged dispatch over all families; call sites pick
//!   a kind (or a `NodeConfig`) and go through `NodeGenerator::generate`.
//!
//! Code cross-refs: `crate::spatial`, `crate::voronoi`, `crate::domain::Domain`

mod config;
mod cvt;
mod fibonacci;
mod glass;
mod kind;
mod lattice;
mod poisson;
mod rings;

pub use config::{Method, NodeConfig};
pub use cvt::{relax, CvtGenerator, CvtParams, SeedMethod};
pub use fibonacci::{FibonacciDiskGenerator, FibonacciParams, GOLDEN_ANGLE};
pub use glass::{GlassGenerator, GlassParams};
pub use kind::{generate_nodes, GeneratorKind, NodeSample};
pub use lattice::{HcpGenerator, LatticeGenerator, LatticeParams};
pub use poisson::{PoissonDiskGenerator, PoissonDiskParams, Termination};
pub use rings::{ConstantDThetaGenerator, ConstantDThetaParams};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::error::GeneratorError;
use crate::Point;

/// Ordered node positions in generation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointSet {
    positions: Vec<Point>,
}

impl PointSet {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            positions: Vec::with_capacity(n),
        }
    }

    #[inline]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Realized node count (may differ from the requested count for some methods).
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.positions.iter()
    }

    pub fn into_vec(self) -> Vec<Point> {
        self.positions
    }

    /// `(x, y)` pairs, the flat form consumed by node-list construction.
    pub fn to_xy(&self) -> Vec<[f64; 2]> {
        self.positions.iter().map(|p| [p.x, p.y]).collect()
    }

    #[inline]
    pub(crate) fn push(&mut self, p: Point) {
        self.positions.push(p);
    }

    pub(crate) fn replace_all(&mut self, positions: Vec<Point>) {
        debug_assert_eq!(positions.len(), self.positions.len());
        self.positions = positions;
    }
}

impl From<Vec<Point>> for PointSet {
    fn from(positions: Vec<Point>) -> Self {
        Self { positions }
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;
    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

/// Shared interface of every generator family.
pub trait NodeGenerator {
    /// Short method name, as used by `NodeConfig::method`.
    fn name(&self) -> &'static str;

    fn domain(&self) -> &Domain;

    /// Run the generator to completion with the caller's RNG.
    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PointSet, GeneratorError>;

    /// Run with a fresh RNG derived from `token` (same token, same output).
    fn regenerate(&self, token: ReplayToken) -> Result<PointSet, GeneratorError> {
        let mut rng = token.to_std_rng();
        self.generate(&mut rng)
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    pub fn new(seed: u64) -> Self {
        Self { seed, index: 0 }
    }

    /// Token for the next draw in the same stream.
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Mean spacing `sqrt(area / n)` of `n` points spread evenly over `domain`.
#[inline]
pub(crate) fn mean_spacing(domain: &Domain, n: usize) -> f64 {
    (domain.area() / n as f64).sqrt()
}

#[cfg(test)]
pub(crate) mod testutil {
    use crate::Point;

    /// Smallest pairwise distance (brute force).
    pub fn min_pair_distance(points: &[Point]) -> f64 {
        let mut best = f64::INFINITY;
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                best = best.min((points[i] - points[j]).norm());
            }
        }
        best
    }

    pub fn max_radius(points: &[Point]) -> f64 {
        points.iter().map(|p| p.norm()).fold(0.0, f64::max)
    }
}
