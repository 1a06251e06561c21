//! Centroidal Voronoi tessellation by Lloyd iteration.
//!
//! Each iteration builds the domain-clipped Voronoi cells of the current
//! points and moves every point to its cell centroid, confined to the domain.
//! The point count never changes.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    ConstantDThetaGenerator, ConstantDThetaParams, FibonacciDiskGenerator, FibonacciParams,
    GlassGenerator, GlassParams, LatticeGenerator, LatticeParams, NodeGenerator,
    PoissonDiskGenerator, PoissonDiskParams, PointSet,
};
use crate::domain::{Domain, Shape};
use crate::error::GeneratorError;
use crate::voronoi::{ClippedVoronoi, VoronoiBuilder};
use crate::Point;

pub const DEFAULT_ITERATIONS: usize = 10;

/// Generator used to produce the points that get relaxed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMethod {
    #[serde(rename = "constant_dtheta")]
    ConstantDTheta,
    #[serde(rename = "poisson")]
    PoissonDisk,
    Glass,
    Fibonacci,
    Lattice,
}

impl SeedMethod {
    /// Squares start from constant-Δθ rings, disks from Poisson-disk samples.
    pub fn default_for(domain: &Domain) -> Self {
        match domain.shape() {
            Shape::Square => Self::ConstantDTheta,
            Shape::Disk => Self::PoissonDisk,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CvtParams {
    pub num_points: usize,
    pub iterations: usize,
    /// `None` picks `SeedMethod::default_for(domain)`.
    pub seed: Option<SeedMethod>,
}

impl CvtParams {
    pub fn new(num_points: usize) -> Self {
        Self {
            num_points,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_points == 0 {
            return Err(GeneratorError::invalid("num_points must be > 0"));
        }
        Ok(())
    }
}

/// Run `iterations` Lloyd steps on `points`.
///
/// Fails with `CellCountMismatch` as soon as `builder` returns a cell count
/// different from the point count.
pub fn relax<V: VoronoiBuilder + ?Sized>(
    mut points: PointSet,
    domain: &Domain,
    iterations: usize,
    builder: &V,
) -> Result<PointSet, GeneratorError> {
    info!(points = points.len(), iterations, "performing CVT");
    for it in 0..iterations {
        let cells = builder.cells(points.positions(), domain);
        if cells.len() != points.len() {
            return Err(GeneratorError::CellCountMismatch {
                points: points.len(),
                cells: cells.len(),
            });
        }
        let next: Vec<Point> = cells.iter().map(|c| domain.confine(c.centroid)).collect();
        let max_shift = points
            .iter()
            .zip(&next)
            .map(|(a, b)| (a - b).norm())
            .fold(0.0, f64::max);
        debug!(iteration = it, max_shift, "lloyd step");
        points.replace_all(next);
    }
    Ok(points)
}

#[derive(Clone, Debug)]
pub struct CvtGenerator<V = ClippedVoronoi> {
    params: CvtParams,
    domain: Domain,
    builder: V,
}

impl CvtGenerator<ClippedVoronoi> {
    pub fn new(params: CvtParams, domain: Domain) -> Result<Self, GeneratorError> {
        Self::with_builder(params, domain, ClippedVoronoi::default())
    }
}

impl<V: VoronoiBuilder> CvtGenerator<V> {
    pub fn with_builder(
        params: CvtParams,
        domain: Domain,
        builder: V,
    ) -> Result<Self, GeneratorError> {
        params.validate()?;
        domain.validate()?;
        Ok(Self {
            params,
            domain,
            builder,
        })
    }

    pub fn params(&self) -> &CvtParams {
        &self.params
    }

    pub fn seed_method(&self) -> SeedMethod {
        self.params
            .seed
            .unwrap_or_else(|| SeedMethod::default_for(&self.domain))
    }

    fn seed_points<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PointSet, GeneratorError> {
        let n = self.params.num_points;
        let domain = self.domain;
        match self.seed_method() {
            SeedMethod::ConstantDTheta => {
                let params = ConstantDThetaParams { approx_points: n };
                ConstantDThetaGenerator::new(params, domain)?.generate(rng)
            }
            SeedMethod::PoissonDisk => {
                PoissonDiskGenerator::new(PoissonDiskParams::new(n), domain)?.generate(rng)
            }
            SeedMethod::Glass => GlassGenerator::new(GlassParams::new(n), domain)?.generate(rng),
            SeedMethod::Fibonacci => {
                let params = FibonacciParams {
                    num_points: n,
                    on_circle: false,
                };
                FibonacciDiskGenerator::new(params, domain)?.generate(rng)
            }
            SeedMethod::Lattice => lattice_seeds(n, domain, rng),
        }
    }
}

/// Lattice over the bounding box, keeping only the nodes inside a disk.
///
/// Nodes outside the disk have no cell and would be confined onto the rim,
/// where nodes on one ray coincide for good. The box gets `n * box/area`
/// nodes so roughly `n` survive.
fn lattice_seeds<R: Rng + ?Sized>(
    n: usize,
    domain: Domain,
    rng: &mut R,
) -> Result<PointSet, GeneratorError> {
    let (lo, hi) = domain.bounding_box();
    let box_area = (hi.x - lo.x) * (hi.y - lo.y);
    let cover = (n as f64 * box_area / domain.area()).ceil() as usize;
    let grid = LatticeGenerator::new(LatticeParams::square_for(cover), domain)?.generate(rng)?;
    match domain.shape() {
        Shape::Square => Ok(grid),
        Shape::Disk => {
            let inside: Vec<Point> = grid
                .into_vec()
                .into_iter()
                .filter(|p| domain.contains(*p))
                .collect();
            Ok(PointSet::from(inside))
        }
    }
}

impl<V: VoronoiBuilder> NodeGenerator for CvtGenerator<V> {
    fn name(&self) -> &'static str {
        "cvt"
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PointSet, GeneratorError> {
        let seeds = self.seed_points(rng)?;
        debug!(seed = ?self.seed_method(), seeds = seeds.len(), "cvt seeds ready");
        relax(seeds, &self.domain, self.params.iterations, &self.builder)
    }
}
