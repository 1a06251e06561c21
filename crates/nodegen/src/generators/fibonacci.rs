//! Fibonacci (golden-angle) spiral over a disk.

use nalgebra::Vector2;
use rand::Rng;

use super::{NodeGenerator, PointSet};
use crate::domain::Domain;
use crate::error::GeneratorError;

/// `π (3 - √5)`, about 2.39996 rad.
pub const GOLDEN_ANGLE: f64 = std::f64::consts::PI * (3.0 - 2.236_067_977_499_79);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FibonacciParams {
    pub num_points: usize,
    /// Put every point on the boundary circle instead of filling the disk.
    pub on_circle: bool,
}

impl FibonacciParams {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_points == 0 {
            return Err(GeneratorError::invalid("num_points must be > 0"));
        }
        Ok(())
    }
}

/// Point `i` at angle `i * GOLDEN_ANGLE`, radius `R` (on circle) or
/// `R * sqrt(i / n)` (uniform area density), around the domain centre.
///
/// Square domains use the inscribed disk.
#[derive(Clone, Debug)]
pub struct FibonacciDiskGenerator {
    params: FibonacciParams,
    domain: Domain,
}

impl FibonacciDiskGenerator {
    pub fn new(params: FibonacciParams, domain: Domain) -> Result<Self, GeneratorError> {
        params.validate()?;
        domain.validate()?;
        Ok(Self { params, domain })
    }

    pub fn params(&self) -> &FibonacciParams {
        &self.params
    }

    fn radius(&self) -> f64 {
        match self.domain {
            Domain::Disk { radius, .. } => radius,
            Domain::Square { lo, hi } => 0.5 * (hi.x - lo.x).min(hi.y - lo.y),
        }
    }

    pub fn build(&self) -> PointSet {
        let n = self.params.num_points;
        let radius = self.radius();
        let center = self.domain.center();
        let mut out = PointSet::with_capacity(n);
        for i in 0..n {
            let theta = i as f64 * GOLDEN_ANGLE;
            let r = if self.params.on_circle {
                radius
            } else {
                radius * (i as f64 / n as f64).sqrt()
            };
            out.push(center + Vector2::new(r * theta.cos(), r * theta.sin()));
        }
        out
    }
}

impl NodeGenerator for FibonacciDiskGenerator {
    fn name(&self) -> &'static str {
        "fibonacci"
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn generate<R: Rng + ?Sized>(&self, _rng: &mut R) -> Result<PointSet, GeneratorError> {
        Ok(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::testutil::max_radius;

    fn disk(n: usize, on_circle: bool) -> PointSet {
        FibonacciDiskGenerator::new(
            FibonacciParams {
                num_points: n,
                on_circle,
            },
            Domain::unit_disk(),
        )
        .unwrap()
        .build()
    }

    #[test]
    fn golden_angle_value() {
        assert!((GOLDEN_ANGLE - std::f64::consts::PI * (3.0 - 5f64.sqrt())).abs() < 1e-14);
    }

    #[test]
    fn max_radius_approaches_one() {
        let mut prev_gap = f64::INFINITY;
        for n in [10usize, 100, 1000, 10000] {
            let pts = disk(n, false);
            assert_eq!(pts.num_nodes(), n);
            let gap = 1.0 - max_radius(pts.positions());
            assert!(gap >= 0.0 && gap < prev_gap);
            prev_gap = gap;
        }
        assert!(prev_gap < 1e-4);
    }

    #[test]
    fn radius_grows_with_index() {
        let pts = disk(500, false);
        // Mean radius per consecutive block of 50 increases.
        let means: Vec<f64> = pts
            .positions()
            .chunks(50)
            .map(|c| c.iter().map(|p| p.norm()).sum::<f64>() / c.len() as f64)
            .collect();
        assert!(means.windows(2).all(|w| w[0] < w[1]));
        // Uniform density: about half the points inside r = 1/√2.
        let inner = pts.iter().filter(|p| p.norm() < 0.5f64.sqrt()).count();
        assert!((inner as i64 - 250).abs() <= 2);
    }

    #[test]
    fn on_circle_puts_everything_on_boundary() {
        let pts = disk(64, true);
        assert!(pts.iter().all(|p| (p.norm() - 1.0).abs() < 1e-12));
    }

    #[test]
    fn zero_points_rejected() {
        let err = FibonacciDiskGenerator::new(
            FibonacciParams {
                num_points: 0,
                on_circle: false,
            },
            Domain::unit_disk(),
        );
        assert!(err.is_err());
    }
}
