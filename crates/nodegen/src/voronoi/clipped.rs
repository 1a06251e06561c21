use tracing::trace;

use super::{VoronoiBuilder, VoronoiCell};
use crate::domain::Domain;
use crate::geom2::{polygon_area, polygon_area_centroid, GeomCfg, Hs2, Poly2};
use crate::spatial::SpatialIndex;
use crate::Point;

/// Voronoi cells as intersections of bisector half-planes with the domain's
/// clip polygon.
///
/// Neighbours come from a kd-tree radius query. A cell built from the
/// neighbours within `R` is final once `R >= 2 * max|v - p|` over its vertices:
/// no point farther out can cut it. Otherwise `R` doubles.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClippedVoronoi {
    pub cfg: GeomCfg,
}

impl ClippedVoronoi {
    pub fn new(cfg: GeomCfg) -> Self {
        Self { cfg }
    }

    fn cell(
        &self,
        i: usize,
        points: &[Point],
        index: &SpatialIndex,
        clip: &Poly2,
        start_radius: f64,
    ) -> VoronoiCell {
        let p = points[i];
        let mut radius = start_radius;
        let mut rounds = 0usize;
        loop {
            let neighbours = index.query_radius_indices(p, radius);
            let mut poly = clip.clone();
            for &j in &neighbours {
                if j == i {
                    continue;
                }
                if let Some(h) = Hs2::bisector(p, points[j]) {
                    poly.insert_halfspace(h);
                }
            }
            let verts = poly
                .halfspace_intersection_eps(self.cfg.eps_feas)
                .vertices()
                .unwrap_or_default();
            let reach = verts.iter().map(|v| (v - p).norm()).fold(0.0, f64::max);
            let saw_all = neighbours.len() >= points.len();
            if saw_all || 2.0 * reach <= radius || !radius.is_finite() {
                if rounds > 0 {
                    trace!(generator = i, rounds, radius, "voronoi cell needed radius growth");
                }
                return Self::finish(p, verts, self.cfg.eps_area);
            }
            radius *= 2.0;
            rounds += 1;
        }
    }

    fn finish(p: Point, verts: Vec<Point>, eps_area: f64) -> VoronoiCell {
        if verts.len() < 3 {
            return VoronoiCell {
                generator: p,
                vertices: Vec::new(),
                centroid: p,
                area: 0.0,
            };
        }
        let area = polygon_area(&verts).abs();
        let centroid = polygon_area_centroid(&verts, eps_area).unwrap_or(p);
        VoronoiCell {
            generator: p,
            vertices: verts,
            centroid,
            area,
        }
    }
}

impl VoronoiBuilder for ClippedVoronoi {
    fn cells(&self, points: &[Point], domain: &Domain) -> Vec<VoronoiCell> {
        if points.is_empty() {
            return Vec::new();
        }
        let index = SpatialIndex::build(points);
        let clip = domain.clip_polygon();
        let start_radius = 2.0 * (domain.area() / points.len() as f64).sqrt();
        (0..points.len())
            .map(|i| self.cell(i, points, &index, &clip, start_radius))
            .collect()
    }
}
