//! Concentric rings with a constant angular step ("constant Δθ").
//!
//! Ring spacing `d = sqrt(π / n)`; ring count `floor(1/d + 0.5)`; ring `i` at
//! radius `i * d` except the outermost, which is forced onto the boundary.
//! Ring `i` holds `max(1, round(2π r / d))` points. The total count is an
//! emergent property of the packing; callers read back `num_nodes()`.

use nalgebra::Vector2;
use rand::Rng;

use super::{NodeGenerator, PointSet};
use crate::domain::Domain;
use crate::error::GeneratorError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConstantDThetaParams {
    /// Approximate number of points.
    pub approx_points: usize,
}

impl ConstantDThetaParams {
    fn validate(&self) -> Result<(), GeneratorError> {
        if self.approx_points == 0 {
            return Err(GeneratorError::invalid("approx_points must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct ConstantDThetaGenerator {
    params: ConstantDThetaParams,
    domain: Domain,
}

impl ConstantDThetaGenerator {
    pub fn new(params: ConstantDThetaParams, domain: Domain) -> Result<Self, GeneratorError> {
        params.validate()?;
        domain.validate()?;
        Ok(Self { params, domain })
    }

    pub fn params(&self) -> &ConstantDThetaParams {
        &self.params
    }

    /// Radii of the rings (unit disk), innermost first.
    pub fn ring_radii(&self) -> Vec<f64> {
        let d = ring_step(self.params.approx_points);
        let nrings = (1.0 / d + 0.5).floor() as usize;
        (1..=nrings)
            .map(|i| if i == nrings { 1.0 } else { i as f64 * d })
            .collect()
    }

    pub fn build(&self) -> PointSet {
        let d = ring_step(self.params.approx_points);
        let (center, scale) = match self.domain {
            Domain::Disk { center, radius } => (center, radius),
            Domain::Square { lo, hi } => ((lo + hi) * 0.5, 0.5 * (hi.x - lo.x).min(hi.y - lo.y)),
        };
        let mut out = PointSet::with_capacity(self.params.approx_points + 1);
        out.push(center);
        for r in self.ring_radii() {
            let ntheta = ((std::f64::consts::TAU * r / d).round() as usize).max(1);
            for j in 0..ntheta {
                let theta = std::f64::consts::TAU * j as f64 / ntheta as f64;
                out.push(center + Vector2::new(theta.cos(), theta.sin()) * (r * scale));
            }
        }
        out
    }
}

#[inline]
fn ring_step(n: usize) -> f64 {
    (std::f64::consts::PI / n as f64).sqrt()
}

impl NodeGenerator for ConstantDThetaGenerator {
    fn name(&self) -> &'static str {
        "constant_dtheta"
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

    fn rings(n: usize) -> ConstantDThetaGenerator {
        ConstantDThetaGenerator::new(ConstantDThetaParams { approx_points: n }, Domain::unit_disk())
            .unwrap()
    }

    #[test]
    fn center_first_and_outer_ring_on_circle() {
        let g = rings(100);
        let pts = g.build();
        assert_eq!(pts.positions()[0], Vector2::new(0.0, 0.0));
        let radii = g.ring_radii();
        assert_eq!(*radii.last().unwrap(), 1.0);
        let d = ring_step(100);
        let outer = ((std::f64::consts::TAU / d).round() as usize).max(1);
        let on_circle: Vec<_> = pts
            .iter()
            .filter(|p| (p.norm() - 1.0).abs() < 1e-12)
            .collect();
        assert_eq!(on_circle.len(), outer);
        // One point per angular direction on the outer ring.
        for (a, b) in on_circle.iter().zip(on_circle.iter().skip(1)) {
            assert!((*a - *b).norm() > 1e-6);
        }
        assert!(pts.iter().all(|p| p.norm() <= 1.0 + 1e-12));
    }

    #[test]
    fn count_tracks_request_roughly() {
        for n in [100usize, 1000, 5000] {
            let got = rings(n).build().num_nodes() as f64;
            assert!(got > 0.9 * n as f64 && got < 1.4 * n as f64, "n={n} got={got}");
        }
    }

    #[test]
    fn count_for_hundred_is_stable() {
        // d = sqrt(π/100): six rings of 6, 13, 19, 25, 31 and 35 points plus the centre.
        let g = rings(100);
        assert_eq!(g.ring_radii().len(), 6);
        assert_eq!(g.build().num_nodes(), 1 + 6 + 13 + 19 + 25 + 31 + 35);
    }

    #[test]
    fn scales_to_disk_radius() {
        let g = ConstantDThetaGenerator::new(
            ConstantDThetaParams { approx_points: 50 },
            Domain::Disk {
                center: Vector2::new(2.0, 1.0),
                radius: 3.0,
            },
        )
        .unwrap();
        let pts = g.build();
        assert_eq!(pts.positions()[0], Vector2::new(2.0, 1.0));
        let max = pts
            .iter()
            .map(|p| (p - Vector2::new(2.0, 1.0)).norm())
            .fold(0.0, f64::max);
        assert!((max - 3.0).abs() < 1e-12);
    }
}
