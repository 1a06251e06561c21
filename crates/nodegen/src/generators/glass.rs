//! "Glass" dart throwing with best-candidate selection.
//!
//! Each new point gets a global budget of `trials` uniform candidates over the
//! domain. Candidates closer than `dmin` to a placed point are rejected. A
//! survivor with no neighbour inside `local_radius` is taken at once;
//! otherwise the survivor with the fewest such neighbours wins, ties going to
//! the larger nearest-neighbour distance and then to draw order.
//! `local_radius = radius * sqrt(1 - i/n)` shrinks as the set fills up.
//!
//! If no candidate survives, a bounded fallback samples until a point beyond
//! `dmin` turns up, and reports `Starvation` when that also runs dry.

use rand::Rng;
use tracing::{debug, trace};

use super::{mean_spacing, NodeGenerator, PointSet};
use crate::domain::{Domain, MAX_UNIFORM_ATTEMPTS};
use crate::error::GeneratorError;
use crate::spatial::SpatialIndex;
use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassParams {
    pub num_points: usize,
    /// Candidates per new point; `None` means `20 * num_points`.
    pub trials: Option<usize>,
    /// `dmin = dmin_factor * mean_spacing`.
    pub dmin_factor: f64,
    /// Initial `local_radius = radius_factor * mean_spacing`.
    pub radius_factor: f64,
    /// Cap on the fallback loop per point.
    pub fallback_attempts: usize,
}

impl GlassParams {
    pub fn new(num_points: usize) -> Self {
        Self {
            num_points,
            trials: None,
            dmin_factor: 0.8,
            radius_factor: 2.0,
            fallback_attempts: 1_000_000,
        }
    }

    pub fn trials(&self) -> usize {
        self.trials.unwrap_or(20 * self.num_points)
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.num_points == 0 {
            return Err(GeneratorError::invalid("num_points must be > 0"));
        }
        if self.trials == Some(0) {
            return Err(GeneratorError::invalid("trials must be > 0"));
        }
        if !(self.dmin_factor.is_finite() && self.dmin_factor >= 0.0) {
            return Err(GeneratorError::invalid("dmin_factor must be finite and >= 0"));
        }
        if !(self.radius_factor.is_finite() && self.radius_factor >= 0.0) {
            return Err(GeneratorError::invalid("radius_factor must be finite and >= 0"));
        }
        if self.fallback_attempts == 0 {
            return Err(GeneratorError::invalid("fallback_attempts must be > 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
pub struct GlassGenerator {
    params: GlassParams,
    domain: Domain,
}

/// Surviving candidate during the best-of-N search.
#[derive(Clone, Copy, Debug)]
struct Candidate {
    point: Point,
    neighbours: usize,
    nearest: f64,
}

impl Candidate {
    fn beats(&self, other: &Candidate) -> bool {
        self.neighbours < other.neighbours
            || (self.neighbours == other.neighbours && self.nearest > other.nearest)
    }
}

impl GlassGenerator {
    pub fn new(params: GlassParams, domain: Domain) -> Result<Self, GeneratorError> {
        params.validate()?;
        domain.validate()?;
        Ok(Self { params, domain })
    }

    pub fn params(&self) -> &GlassParams {
        &self.params
    }

    /// Hard rejection distance.
    pub fn dmin(&self) -> f64 {
        self.params.dmin_factor * mean_spacing(&self.domain, self.params.num_points)
    }

    fn local_radius(&self, i: usize) -> f64 {
        let n = self.params.num_points as f64;
        let spacing = mean_spacing(&self.domain, self.params.num_points);
        let radius = self.params.radius_factor * spacing;
        radius * (1.0 - i as f64 / n).max(0.0).sqrt()
    }

    fn best_candidate<R: Rng + ?Sized>(
        &self,
        index: &SpatialIndex,
        local_radius: f64,
        rng: &mut R,
    ) -> Option<Point> {
        let dmin = self.dmin();
        let mut best: Option<Candidate> = None;
        for _ in 0..self.params.trials() {
            let p = self.domain.sample_bounding_box(rng);
            if !self.domain.contains(p) || index.any_within(p, dmin) {
                continue;
            }
            let neighbours = index.count_within(p, local_radius);
            if neighbours == 0 {
                return Some(p);
            }
            let nearest = index.nearest(p).map_or(f64::INFINITY, |(_, d)| d);
            let cand = Candidate {
                point: p,
                neighbours,
                nearest,
            };
            if best.as_ref().map_or(true, |b| cand.beats(b)) {
                best = Some(cand);
            }
        }
        best.map(|c| c.point)
    }

    fn fallback<R: Rng + ?Sized>(
        &self,
        index: &SpatialIndex,
        rng: &mut R,
    ) -> Result<Point, GeneratorError> {
        let dmin = self.dmin();
        let attempts = self.params.fallback_attempts;
        (0..attempts)
            .map(|_| self.domain.sample_bounding_box(rng))
            .find(|p| self.domain.contains(*p) && !index.any_within(*p, dmin))
            .ok_or_else(|| GeneratorError::starved(index.len(), self.params.num_points, attempts))
    }
}

impl NodeGenerator for GlassGenerator {
    fn name(&self) -> &'static str {
        "glass"
    }

    fn domain(&self) -> &Domain {
        &self.domain
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PointSet, GeneratorError> {
        let n = self.params.num_points;
        let mut index = SpatialIndex::new();
        let mut out = PointSet::with_capacity(n);

        let first = self
            .domain
            .sample_uniform(rng)
            .ok_or_else(|| GeneratorError::starved(0, n, MAX_UNIFORM_ATTEMPTS))?;
        index.insert(first);
        out.push(first);

        let mut fallbacks = 0usize;
        for i in 0..n.saturating_sub(1) {
            let local_radius = self.local_radius(i);
            let p = match self.best_candidate(&index, local_radius, rng) {
                Some(p) => p,
                None => {
                    fallbacks += 1;
                    trace!(placed = index.len(), "glass trial budget exhausted, using fallback");
                    self.fallback(&index, rng)?
                }
            };
            index.insert(p);
            out.push(p);
        }

        debug!(
            requested = n,
            placed = out.len(),
            dmin = self.dmin(),
            fallbacks,
            "glass generation finished"
        );
        Ok(out)
    }
}
