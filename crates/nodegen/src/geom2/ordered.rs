//! Angle-ordered half-plane sets and their intersection polygon.
//!
//! A Voronoi cell is a `Poly2`: the domain's clip half-planes plus one
//! bisector per neighbour. `halfspace_intersection_eps` turns the set into a
//! counter-clockwise vertex loop with a deque sweep over the sorted normals.

use std::collections::VecDeque;

use nalgebra::Vector2;

use super::types::Hs2;

/// Half-planes with unit normals, sorted by normal angle, at most one per direction
/// (the tightest).
#[derive(Clone, Debug, Default)]
pub struct Poly2 {
    hs: Vec<Hs2>,
}

impl Poly2 {
    pub fn from_halfspaces<I: IntoIterator<Item = Hs2>>(hs: I) -> Poly2 {
        let mut poly = Poly2::default();
        for h in hs {
            poly.insert_halfspace(h);
        }
        poly
    }

    /// Add `h`, tightening an existing half-plane with the same normal instead
    /// of adding a duplicate. Degenerate normals are ignored.
    pub fn insert_halfspace(&mut self, h: Hs2) {
        let Some(h) = h.normalized() else {
            return;
        };
        let key = h.angle();
        let at = self.hs.partition_point(|g| g.angle() <= key);
        // neighbours in angle order, plus both ends for the ±π seam
        let probes = [at.checked_sub(1), Some(at), Some(0), self.hs.len().checked_sub(1)];
        for k in probes.into_iter().flatten() {
            if let Some(g) = self.hs.get_mut(k) {
                if g.same_direction(&h) {
                    g.c = g.c.min(h.c);
                    return;
                }
            }
        }
        self.hs.insert(at, h);
    }

    pub fn halfspaces(&self) -> &[Hs2] {
        &self.hs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hs.is_empty()
    }

    /// `p` satisfies every half-plane up to `eps` (positive eps is permissive).
    pub fn contains_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.hs.iter().all(|h| h.satisfies_eps(p, eps))
    }

    /// Intersection polygon.
    ///
    /// `eps` only affects which half-planes are kept: a corner within `eps`
    /// of a new half-plane keeps the corner's lines. Vertices are always exact
    /// line crossings.
    pub fn halfspace_intersection_eps(&self, eps: f64) -> HalfspaceIntersection {
        if has_opposite_conflict(&self.hs) {
            return HalfspaceIntersection::Empty;
        }
        sweep(&self.hs, eps)
    }

    #[inline]
    pub fn halfspace_intersection(&self) -> HalfspaceIntersection {
        self.halfspace_intersection_eps(0.0)
    }
}

/// Result of intersecting a half-plane set.
#[derive(Clone, Debug, PartialEq)]
pub enum HalfspaceIntersection {
    Empty,
    Unbounded,
    /// Counter-clockwise vertex loop.
    Bounded(Vec<Vector2<f64>>),
}

impl HalfspaceIntersection {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn is_bounded(&self) -> bool {
        matches!(self, Self::Bounded(_))
    }

    pub fn vertices(self) -> Option<Vec<Vector2<f64>>> {
        match self {
            Self::Bounded(v) => Some(v),
            _ => None,
        }
    }
}

/// Some pair `n·x <= a`, `-n·x <= b` with `-b > a` (parallel slab with no interior).
fn has_opposite_conflict(hs: &[Hs2]) -> bool {
    let angles: Vec<f64> = hs.iter().map(Hs2::angle).collect();
    hs.iter().zip(&angles).any(|(h, &a)| {
        let flipped = if a > 0.0 {
            a - std::f64::consts::PI
        } else {
            a + std::f64::consts::PI
        };
        let k = angles.partition_point(|x| *x < flipped - 1e-12);
        hs[k..]
            .iter()
            .zip(&angles[k..])
            .take_while(|(_, x)| **x <= flipped + 1e-12)
            .any(|(g, _)| -g.c > h.c)
    })
}

/// Crossing point of the boundary lines of `a` and `b` (Cramer's rule).
fn crossing(a: &Hs2, b: &Hs2) -> Option<Vector2<f64>> {
    let det = a.n.x * b.n.y - a.n.y * b.n.x;
    if det.abs() < 1e-12 {
        return None;
    }
    Some(Vector2::new(
        (a.c * b.n.y - a.n.y * b.c) / det,
        (a.n.x * b.c - a.c * b.n.x) / det,
    ))
}

/// The corner of `a` and `b` exists and satisfies `h`.
fn corner_kept(a: &Hs2, b: &Hs2, h: &Hs2, eps: f64) -> bool {
    crossing(a, b).is_some_and(|p| h.satisfies_eps(p, eps))
}

fn sweep(hs: &[Hs2], eps: f64) -> HalfspaceIntersection {
    let mut dq: VecDeque<Hs2> = VecDeque::with_capacity(hs.len());
    for h in hs {
        while dq.len() >= 2 && !corner_kept(&dq[dq.len() - 2], &dq[dq.len() - 1], h, eps) {
            dq.pop_back();
        }
        while dq.len() >= 2 && !corner_kept(&dq[0], &dq[1], h, eps) {
            dq.pop_front();
        }
        dq.push_back(*h);
    }
    // the front and back must also agree with each other
    while dq.len() >= 3 && !corner_kept(&dq[dq.len() - 2], &dq[dq.len() - 1], &dq[0], eps) {
        dq.pop_back();
    }
    while dq.len() >= 3 && !corner_kept(&dq[0], &dq[1], &dq[dq.len() - 1], eps) {
        dq.pop_front();
    }
    if dq.is_empty() {
        return HalfspaceIntersection::Empty;
    }
    // bounded iff every cyclic gap between consecutive normals is below π
    let closed = dq.len() >= 3
        && dq
            .iter()
            .zip(dq.iter().cycle().skip(1))
            .all(|(a, b)| a.n.x * b.n.y - a.n.y * b.n.x > 0.0);
    if !closed {
        return HalfspaceIntersection::Unbounded;
    }
    dq.iter()
        .zip(dq.iter().cycle().skip(1))
        .map(|(a, b)| crossing(a, b))
        .collect::<Option<Vec<_>>>()
        .map_or(HalfspaceIntersection::Unbounded, HalfspaceIntersection::Bounded)
}
