//! Poisson-disk sampling (active list, Bridson style).
//!
//! SEEDING: one uniform point inside the domain.
//! ACTIVE-GROWTH: pick an active sample at random, try up to `candidates`
//! points in the annulus `[r, 2r)` around it, accept the first one that is
//! inside the domain and valid on the grid; retire the sample when all tries
//! fail.
//! DONE: active list empty, or (with `Termination::TargetCount`) the sample
//! count reached the request.
//!
//! Spacing is `r = sqrt(area / n)`; the emitted count is opportunistic.

use nalgebra::Vector2;
use rand::Rng;
use tracing::debug;

use super::{mean_spacing, NodeGenerator, PointSet};
use crate::domain::{Domain, Shape, MAX_UNIFORM_ATTEMPTS};
use crate::error::GeneratorError;
use crate::spatial::GridAccelerator;

/// Default candidate attempts per active sample.
pub const DEFAULT_CANDIDATES: usize = 30;

/// When the growth phase stops.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Stop as soon as the requested count is reached (or the active list empties).
    TargetCount,
    /// Keep growing until the active list empties.
    Saturation,
}

impl Termination {
    /// Disk domains stop at the target count; square domains saturate.
    pub fn default_for(domain: &Domain) -> Self {
        match domain.shape() {
            Shape::Disk => Self::TargetCount,
            Shape::Square => Self::Saturation,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PoissonDiskParams {
    /// Approximate number of points; sets the spacing.
    pub num_points: usize,
    /// Attempts per active sample before it is retired.
    pub candidates: usize,
    /// `None` picks `Termination::default_for(domain)`.
    pub termination: Option<Termination>,
}

impl PoissonDiskParams {
    pub fn new(num_points: usize) -> Self {
        Self {
            num_points,
            candidates: DEFAULT_CANDIDATES,
            termination: None,
        }
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_points == 0 {
            return Err(GeneratorError::invalid("num_points must be > 0"));
        }
        if self.candidates == 0 {
            return Err(GeneratorError::invalid("candidates must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct PoissonDiskGenerator {
    params: PoissonDiskParams,
    domain: Domain,
}

impl PoissonDiskGenerator {
    pub fn new(params: PoissonDiskParams, domain: Domain) -> Result<Self, GeneratorError> {
        params.validate()?;
        domain.validate()?;
        Ok(Self { params, domain })
    }

    pub fn params(&self) -> &PoissonDiskParams {
        &self.params
    }

    /// Minimum separation `r` between emitted points.
    pub fn spacing(&self) -> f64 {
        mean_spacing(&self.domain, self.params.num_points)
    }

    pub fn termination(&self) -> Termination {
        self.params
            .termination
            .unwrap_or_else(|| Termination::default_for(&self.domain))
    }

    fn done(&self, placed: usize) -> bool {
        self.termination() == Termination::TargetCount && placed >= self.params.num_points
    }
}

impl NodeGenerator for PoissonDiskGenerator {
    fn name(&self) -> &'static str {
        "poisson"
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PointSet, GeneratorError> {
        let r = self.spacing();
        let (lo, hi) = self.domain.bounding_box();
        let mut grid = GridAccelerator::new(lo, hi, r);
        let mut samples = PointSet::with_capacity(self.params.num_points);

        let seed = self.domain.sample_uniform(rng).ok_or_else(|| {
            GeneratorError::starved(0, self.params.num_points, MAX_UNIFORM_ATTEMPTS)
        })?;
        samples.push(seed);
        let on_grid = grid.place(seed);
        debug_assert!(on_grid, "in-domain seed off the acceleration grid");
        let mut active = vec![seed];

        while !active.is_empty() && !self.done(samples.len()) {
            let idx = rng.gen_range(0..active.len());
            let origin = active[idx];
            let mut found = false;
            for _ in 0..self.params.candidates {
                let theta = rng.gen_range(0.0..std::f64::consts::TAU);
                let rr = rng.gen_range(r..2.0 * r);
                let cand = origin + Vector2::new(rr * theta.cos(), rr * theta.sin());
                if !self.domain.contains(cand) {
                    continue;
                }
                if grid.is_valid(cand) {
                    samples.push(cand);
                    let on_grid = grid.place(cand);
                    debug_assert!(on_grid, "valid candidate off the acceleration grid");
                    active.push(cand);
                    found = true;
                    break;
                }
            }
            if !found {
                active.swap_remove(idx);
            }
        }

        debug!(
            requested = self.params.num_points,
            placed = samples.len(),
            spacing = r,
            saturated = active.is_empty(),
            "poisson disk sampling finished"
        );
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testutil::{max_radius, min_pair_distance};
    use crate::generators::ReplayToken;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn disk(n: usize) -> PoissonDiskGenerator {
        PoissonDiskGenerator::new(PoissonDiskParams::new(n), Domain::unit_disk()).unwrap()
    }

    #[test]
    fn unit_disk_two_hundred_points() {
        for seed in 0..5u64 {
            let g = disk(200);
            let pts = g.generate(&mut StdRng::seed_from_u64(seed)).unwrap();
            assert!(
                (100..=250).contains(&pts.num_nodes()),
                "seed {seed}: {} points",
                pts.num_nodes()
            );
            assert!(min_pair_distance(pts.positions()) >= g.spacing() - 1e-12);
            assert!(max_radius(pts.positions()) <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn square_saturates_and_keeps_spacing() {
        let params = PoissonDiskParams::new(150);
        let g = PoissonDiskGenerator::new(params, Domain::unit_square()).unwrap();
        assert_eq!(g.termination(), Termination::Saturation);
        let pts = g.generate(&mut StdRng::seed_from_u64(3)).unwrap();
        let r = g.spacing();
        assert!((r - (4.0f64 / 150.0).sqrt()).abs() < 1e-15);
        assert!(min_pair_distance(pts.positions()) >= r - 1e-12);
        assert!(pts.iter().all(|p| Domain::unit_square().contains(*p)));
        // Saturated Bridson packing lands well above half the nominal density.
        assert!(pts.num_nodes() > 75);
    }

    #[test]
    fn target_count_is_a_hard_cap() {
        let params = PoissonDiskParams {
            num_points: 50,
            candidates: 30,
            termination: Some(Termination::TargetCount),
        };
        let g = PoissonDiskGenerator::new(params, Domain::unit_square()).unwrap();
        let pts = g.generate(&mut StdRng::seed_from_u64(9)).unwrap();
        assert!(pts.num_nodes() <= 50);
    }

    #[test]
    fn same_token_same_points() {
        let g = disk(80);
        let tok = ReplayToken { seed: 7, index: 1 };
        assert_eq!(g.regenerate(tok).unwrap(), g.regenerate(tok).unwrap());
        assert_ne!(g.regenerate(tok).unwrap(), g.regenerate(tok.next()).unwrap());
    }

    #[test]
    fn invalid_params_fail_fast() {
        assert!(PoissonDiskGenerator::new(PoissonDiskParams::new(0), Domain::unit_disk()).is_err());
        let params = PoissonDiskParams {
            candidates: 0,
            ..PoissonDiskParams::new(10)
        };
        assert!(PoissonDiskGenerator::new(params, Domain::unit_disk()).is_err());
    }
}
