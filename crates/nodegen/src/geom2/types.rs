//! Half-planes and tolerances.

use nalgebra::Vector2;

/// Tolerances for cell construction.
#[derive(Clone, Copy, Debug)]
pub struct GeomCfg {
    /// Slack when deciding whether a half-plane is redundant at a vertex.
    pub eps_feas: f64,
    /// Cells with smaller area count as degenerate.
    pub eps_area: f64,
}

impl Default for GeomCfg {
    fn default() -> Self {
        Self {
            eps_feas: 1e-9,
            eps_area: 1e-18,
        }
    }
}

/// Normals closer than this (after normalization) are treated as parallel.
pub(crate) const PARALLEL_TOL: f64 = 1e-9;

/// Closed half-plane `n · x <= c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }

    /// Half-plane of points at least as close to `a` as to `b`.
    ///
    /// `(b - a)·x <= (b - a)·(a + b)/2`. Returns `None` for coincident sites.
    pub fn bisector(a: Vector2<f64>, b: Vector2<f64>) -> Option<Self> {
        let n = b - a;
        if n.norm_squared() <= 0.0 {
            return None;
        }
        Some(Self::new(n, n.dot(&((a + b) * 0.5))))
    }

    /// Same half-plane with a unit normal; `None` for a zero or non-finite normal.
    pub fn normalized(self) -> Option<Self> {
        let len = self.n.norm();
        (len.is_finite() && len > 0.0).then(|| Self::new(self.n / len, self.c / len))
    }

    /// Direction of the outward normal in `(-π, π]`.
    #[inline]
    pub fn angle(&self) -> f64 {
        self.n.y.atan2(self.n.x)
    }

    /// Both normals are unit length and point the same way.
    #[inline]
    pub(crate) fn same_direction(&self, other: &Hs2) -> bool {
        (self.n - other.n).norm() < PARALLEL_TOL
    }

    #[inline]
    pub fn satisfies_eps(&self, p: Vector2<f64>, eps: f64) -> bool {
        self.n.dot(&p) <= self.c + eps
    }
}
