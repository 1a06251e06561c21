//! 2D kd-tree over an insertion-ordered point set.
//!
//! Nodes live in an arena; each node stores the point and its insertion index,
//! so query results refer back to generation order. `rebuild` produces a
//! balanced tree (median split, alternating axes); `insert` descends and
//! attaches a leaf without rebalancing.
//!
//! Radius queries are strict: a point at distance exactly `r` is not reported.

use std::cmp::Ordering;

use crate::Point;

#[derive(Clone, Debug)]
struct Node {
    point: Point,
    index: usize,
    axis: u8,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct SpatialIndex {
    nodes: Vec<Node>,
    /// Insertion index -> arena slot.
    slots: Vec<usize>,
    root: Option<usize>,
}

#[inline]
fn coord(p: &Point, axis: u8) -> f64 {
    if axis == 0 {
        p.x
    } else {
        p.y
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Balanced tree over `points`; insertion indices follow slice order.
    pub fn build(points: &[Point]) -> Self {
        let mut idx = Self::new();
        idx.rebuild(points);
        idx
    }

    /// Drop all contents and rebuild balanced from `points`.
    pub fn rebuild(&mut self, points: &[Point]) {
        self.nodes.clear();
        self.slots.clear();
        self.slots.resize(points.len(), usize::MAX);
        self.nodes.reserve(points.len());
        let mut order: Vec<usize> = (0..points.len()).collect();
        self.root = self.build_recursive(points, &mut order, 0);
    }

    fn build_recursive(
        &mut self,
        points: &[Point],
        order: &mut [usize],
        depth: usize,
    ) -> Option<usize> {
        if order.is_empty() {
            return None;
        }
        let axis = (depth % 2) as u8;
        let median = order.len() / 2;
        order.select_nth_unstable_by(median, |&a, &b| {
            coord(&points[a], axis)
                .partial_cmp(&coord(&points[b], axis))
                .unwrap_or(Ordering::Equal)
        });
        let index = order[median];
        let slot = self.nodes.len();
        self.nodes.push(Node {
            point: points[index],
            index,
            axis,
            left: None,
            right: None,
        });
        self.slots[index] = slot;
        let (lhs, rest) = order.split_at_mut(median);
        let left = self.build_recursive(points, lhs, depth + 1);
        let right = self.build_recursive(points, &mut rest[1..], depth + 1);
        self.nodes[slot].left = left;
        self.nodes[slot].right = right;
        Some(slot)
    }

    /// Append a point; returns its insertion index.
    pub fn insert(&mut self, p: Point) -> usize {
        let index = self.slots.len();
        let slot = self.nodes.len();
        let mut parent = None;
        let mut cur = self.root;
        let mut depth_axis = 0u8;
        while let Some(s) = cur {
            let node = &self.nodes[s];
            let go_left = coord(&p, node.axis) < coord(&node.point, node.axis);
            parent = Some((s, go_left));
            depth_axis = 1 - node.axis;
            cur = if go_left { node.left } else { node.right };
        }
        self.nodes.push(Node {
            point: p,
            index,
            axis: depth_axis,
            left: None,
            right: None,
        });
        self.slots.push(slot);
        match parent {
            None => self.root = Some(slot),
            Some((s, true)) => self.nodes[s].left = Some(slot),
            Some((s, false)) => self.nodes[s].right = Some(slot),
        }
        index
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Point stored under insertion index `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Option<Point> {
        self.slots.get(i).map(|&s| self.nodes[s].point)
    }

    /// Points strictly closer than `r` to `q` (unordered).
    pub fn query_radius(&self, q: Point, r: f64) -> Vec<Point> {
        let mut out = Vec::new();
        self.visit_within(q, r, &mut |node| {
            out.push(node.point);
            true
        });
        out
    }

    /// Insertion indices of points strictly closer than `r` to `q` (unordered).
    pub fn query_radius_indices(&self, q: Point, r: f64) -> Vec<usize> {
        let mut out = Vec::new();
        self.visit_within(q, r, &mut |node| {
            out.push(node.index);
            true
        });
        out
    }

    pub fn count_within(&self, q: Point, r: f64) -> usize {
        let mut n = 0usize;
        self.visit_within(q, r, &mut |_| {
            n += 1;
            true
        });
        n
    }

    /// Early-exit variant of `count_within(q, r) > 0`.
    pub fn any_within(&self, q: Point, r: f64) -> bool {
        let mut hit = false;
        self.visit_within(q, r, &mut |_| {
            hit = true;
            false
        });
        hit
    }

    /// Nearest stored point: `(insertion index, distance)`.
    pub fn nearest(&self, q: Point) -> Option<(usize, f64)> {
        let root = self.root?;
        let mut best: Option<(usize, f64)> = None;
        self.nearest_recursive(root, q, &mut best);
        best.map(|(i, d2)| (i, d2.sqrt()))
    }

    fn nearest_recursive(&self, slot: usize, q: Point, best: &mut Option<(usize, f64)>) {
        let node = &self.nodes[slot];
        let d2 = (node.point - q).norm_squared();
        if best.map_or(true, |(_, b)| d2 < b) {
            *best = Some((node.index, d2));
        }
        let delta = coord(&q, node.axis) - coord(&node.point, node.axis);
        let (first, second) = if delta < 0.0 {
            (node.left, node.right)
        } else {
            (node.right, node.left)
        };
        if let Some(c) = first {
            self.nearest_recursive(c, q, best);
        }
        if let Some(c) = second {
            if best.map_or(true, |(_, b)| delta * delta < b) {
                self.nearest_recursive(c, q, best);
            }
        }
    }

    /// Walk nodes within `r` of `q`; the visitor returns `false` to stop.
    fn visit_within<F: FnMut(&Node) -> bool>(&self, q: Point, r: f64, visit: &mut F) {
        let Some(root) = self.root else {
            return;
        };
        if !(r > 0.0) {
            return;
        }
        let r2 = r * r;
        let mut stack = vec![root];
        while let Some(slot) = stack.pop() {
            let node = &self.nodes[slot];
            if (node.point - q).norm_squared() < r2 && !visit(node) {
                return;
            }
            let delta = coord(&q, node.axis) - coord(&node.point, node.axis);
            // left subtree holds coord < split; right holds coord >= split
            if let Some(c) = node.left {
                if delta - r < 0.0 {
                    stack.push(c);
                }
            }
            if let Some(c) = node.right {
                if delta + r >= 0.0 {
                    stack.push(c);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_points(n: usize, seed: u64) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect()
    }

    fn brute_within(points: &[Point], q: Point, r: f64) -> Vec<usize> {
        (0..points.len())
            .filter(|&i| (points[i] - q).norm() < r)
            .collect()
    }

    #[test]
    fn empty_index_answers_empty() {
        let idx = SpatialIndex::new();
        assert!(idx.is_empty());
        assert!(idx.query_radius(Vector2::zeros(), 10.0).is_empty());
        assert!(idx.nearest(Vector2::zeros()).is_none());
        assert!(!idx.any_within(Vector2::zeros(), 1.0));
    }

    #[test]
    fn radius_query_is_strict() {
        let pts = vec![Vector2::new(1.0, 0.0), Vector2::new(0.0, 0.5)];
        let idx = SpatialIndex::build(&pts);
        let mut hits = idx.query_radius_indices(Vector2::zeros(), 1.0);
        hits.sort_unstable();
        assert_eq!(hits, vec![1]);
        assert_eq!(idx.query_radius(Vector2::zeros(), 1.0), vec![Vector2::new(0.0, 0.5)]);
        assert_eq!(idx.count_within(Vector2::zeros(), 1.0 + 1e-12), 2);
    }

    #[test]
    fn radius_query_returns_positions_of_the_hits() {
        let pts = random_points(200, 5);
        let idx = SpatialIndex::build(&pts);
        let q = Vector2::new(0.1, -0.2);
        let mut got = idx.query_radius(q, 0.4);
        assert!(!got.is_empty());
        assert!(got.iter().all(|p| (p - q).norm() < 0.4));
        let mut want: Vec<Point> = brute_within(&pts, q, 0.4)
            .into_iter()
            .map(|i| pts[i])
            .collect();
        let by_x = |a: &Point, b: &Point| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y));
        got.sort_by(by_x);
        want.sort_by(by_x);
        assert_eq!(got, want);
    }

    #[test]
    fn insert_and_build_agree_with_brute_force() {
        let pts = random_points(300, 11);
        let built = SpatialIndex::build(&pts);
        let mut grown = SpatialIndex::new();
        for (i, p) in pts.iter().enumerate() {
            assert_eq!(grown.insert(*p), i);
        }
        for q in random_points(40, 12) {
            let mut want = brute_within(&pts, q, 0.3);
            want.sort_unstable();
            for idx in [&built, &grown] {
                let mut got = idx.query_radius_indices(q, 0.3);
                got.sort_unstable();
                assert_eq!(got, want);
            }
        }
        for i in 0..pts.len() {
            assert_eq!(built.point(i), Some(pts[i]));
            assert_eq!(grown.point(i), Some(pts[i]));
        }
    }

    #[test]
    fn rebuild_replaces_contents() {
        let mut idx = SpatialIndex::build(&random_points(50, 1));
        let next = random_points(20, 2);
        idx.rebuild(&next);
        assert_eq!(idx.len(), 20);
        let (i, d) = idx.nearest(next[7]).unwrap();
        assert_eq!(i, 7);
        assert!(d < 1e-15);
    }

    #[test]
    fn duplicates_are_all_reported() {
        let p = Vector2::new(0.25, 0.25);
        let idx = SpatialIndex::build(&[p, p, p]);
        assert_eq!(idx.count_within(p, 1e-9), 3);
    }

    proptest! {
        #[test]
        fn nearest_matches_brute_force(seed in 0u64..500, qx in -1.5f64..1.5, qy in -1.5f64..1.5) {
            let pts = random_points(64, seed);
            let idx = SpatialIndex::build(&pts);
            let q = Vector2::new(qx, qy);
            let (_, d) = idx.nearest(q).unwrap();
            let want = pts.iter().map(|p| (p - q).norm()).fold(f64::INFINITY, f64::min);
            prop_assert!((d - want).abs() < 1e-12);
        }

        #[test]
        fn count_matches_brute_force(seed in 0u64..500, r in 0.0f64..1.0) {
            let pts = random_points(80, seed);
            let mut idx = SpatialIndex::new();
            for p in &pts {
                idx.insert(*p);
            }
            let q = Vector2::new(0.1, -0.2);
            prop_assert_eq!(idx.count_within(q, r), brute_within(&pts, q, r).len());
            prop_assert_eq!(idx.any_within(q, r), !brute_within(&pts, q, r).is_empty());
        }
    }
}
