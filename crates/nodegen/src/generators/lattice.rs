//! Lattice and hexagonal-close-packed layouts (closed form, no RNG).

use nalgebra::Vector2;
use rand::Rng;

use super::{NodeGenerator, PointSet};
use crate::domain::Domain;
use crate::error::GeneratorError;
use crate::mesh::Grid2;

/// Grid dimensions shared by lattice and HCP.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeParams {
    pub nx: usize,
    pub ny: usize,
}

impl LatticeParams {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.nx == 0 || self.ny == 0 {
            return Err(GeneratorError::invalid("lattice needs nx > 0 and ny > 0"));
        }
        Ok(())
    }

    /// Near-square dimensions with `nx * ny >= n`.
    pub fn square_for(n: usize) -> Self {
        let side = (n as f64).sqrt().ceil().max(1.0) as usize;
        Self { nx: side, ny: side }
    }
}

/// Regular `nx * ny` grid spanning the domain's bounding box.
///
/// Spacing is `extent / n` per axis and nodes start on the lower edge, so for
/// `[-1, 1]²` the node at index `(ny/2)*nx + nx/2` sits on the centre when
/// `nx` and `ny` are even. Disk domains use their bounding box unfiltered.
#[derive(Clone, Debug)]
pub struct LatticeGenerator {
    params: LatticeParams,
    domain: Domain,
}

impl LatticeGenerator {
    pub fn new(params: LatticeParams, domain: Domain) -> Result<Self, GeneratorError> {
        params.validate()?;
        domain.validate()?;
        Ok(Self { params, domain })
    }

    pub fn params(&self) -> &LatticeParams {
        &self.params
    }

    /// The mesh helper that assigns positions to linear indices.
    pub fn mesh(&self) -> Grid2 {
        let (lo, hi) = self.domain.bounding_box();
        let LatticeParams { nx, ny } = self.params;
        let mut mesh = Grid2::new(nx, ny, (hi.x - lo.x) / nx as f64, (hi.y - lo.y) / ny as f64);
        mesh.set_origin(-lo);
        mesh
    }

    pub fn build(&self) -> PointSet {
        PointSet::from(self.mesh().positions().collect::<Vec<_>>())
    }
}

impl NodeGenerator for LatticeGenerator {
    fn name(&self) -> &'static str {
        "lattice"
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn generate<R: Rng + ?Sized>(&self, _rng: &mut R) -> Result<PointSet, GeneratorError> {
        Ok(self.build())
    }
}

/// Lattice with alternating row shifts.
///
/// Row `j` moves by `+dx/4` when even and `-dx/4` when odd, so neighbouring
/// rows end up offset by half a column spacing.
#[derive(Clone, Debug)]
pub struct HcpGenerator {
    lattice: LatticeGenerator,
}

impl HcpGenerator {
    pub fn new(params: LatticeParams, domain: Domain) -> Result<Self, GeneratorError> {
        Ok(Self {
            lattice: LatticeGenerator::new(params, domain)?,
        })
    }

    pub fn params(&self) -> &LatticeParams {
        self.lattice.params()
    }

    pub fn build(&self) -> PointSet {
        let mesh = self.lattice.mesh();
        let quarter = mesh.dx / 4.0;
        let shifted: Vec<_> = (0..mesh.size())
            .map(|i| {
                let (_, row) = mesh.coordinates(i);
                let ddx = if row % 2 == 0 { quarter } else { -quarter };
                mesh.position(i) + Vector2::new(ddx, 0.0)
            })
            .collect();
        PointSet::from(shifted)
    }
}

impl NodeGenerator for HcpGenerator {
    fn name(&self) -> &'static str {
        "hcp"
    }

    fn domain(&self) -> &Domain {
        self.lattice.domain()
    }

    fn generate<R: Rng + ?Sized>(&self, _rng: &mut R) -> Result<PointSet, GeneratorError> {
        Ok(self.build())
    }
}
