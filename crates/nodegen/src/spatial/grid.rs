//! Uniform bucket grid for Poisson-disk dart throwing.
//!
//! Cell size is `r / √2`, so a cell's diagonal equals `r` and every cell
//! holds at most one settled sample. Two samples in cells that are more than
//! two cells apart (per axis) are farther than `r`, which bounds the validity
//! test to the 5x5 window around the candidate's cell.

use nalgebra::Vector2;

use crate::Point;

/// Half-width of the neighbourhood window (5x5 cells).
const WINDOW: usize = 2;

#[derive(Clone, Debug)]
pub struct GridAccelerator {
    lo: Point,
    cell_size: f64,
    min_dist: f64,
    nx: usize,
    ny: usize,
    cells: Vec<Option<Point>>,
}

impl GridAccelerator {
    /// Grid covering the box `[lo, hi]` for minimum separation `min_dist`.
    ///
    /// Dimensions are `floor(extent / cell) + 1` so the closed upper edge is covered.
    pub fn new(lo: Point, hi: Point, min_dist: f64) -> Self {
        let cell_size = min_dist / std::f64::consts::SQRT_2;
        let ext = hi - lo;
        let nx = (ext.x / cell_size).floor() as usize + 1;
        let ny = (ext.y / cell_size).floor() as usize + 1;
        Self {
            lo,
            cell_size,
            min_dist,
            nx,
            ny,
            cells: vec![None; nx * ny],
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    #[inline]
    pub fn min_dist(&self) -> f64 {
        self.min_dist
    }

    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    /// Cell `(i, j)` containing `p`, or `None` when `p` lies outside the grid.
    #[inline]
    pub fn cell_of(&self, p: Point) -> Option<(usize, usize)> {
        let s = (p - self.lo) / self.cell_size;
        if !(s.x >= 0.0 && s.y >= 0.0) {
            return None;
        }
        let (i, j) = (s.x.floor() as usize, s.y.floor() as usize);
        (i < self.nx && j < self.ny).then_some((i, j))
    }

    /// `true` iff no settled point in the 5x5 window lies strictly closer than `min_dist`.
    ///
    /// Points outside the grid are never valid.
    pub fn is_valid(&self, p: Point) -> bool {
        let Some((gi, gj)) = self.cell_of(p) else {
            return false;
        };
        let r2 = self.min_dist * self.min_dist;
        let i_hi = (gi + WINDOW + 1).min(self.nx);
        let j_hi = (gj + WINDOW + 1).min(self.ny);
        for j in gj.saturating_sub(WINDOW)..j_hi {
            for i in gi.saturating_sub(WINDOW)..i_hi {
                if let Some(q) = self.cells[j * self.nx + i] {
                    if (q - p).norm_squared() < r2 {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Mark the cell of `p` as occupied. Returns `false` if `p` is off-grid.
    pub fn place(&mut self, p: Point) -> bool {
        match self.cell_of(p) {
            Some((i, j)) => {
                let cell = &mut self.cells[j * self.nx + i];
                debug_assert!(cell.is_none(), "grid cell already settled");
                *cell = Some(p);
                true
            }
            None => false,
        }
    }

    /// Settled point in cell `(i, j)`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<Point> {
        if i < self.nx && j < self.ny {
            self.cells[j * self.nx + i]
        } else {
            None
        }
    }

    /// Centre of cell `(i, j)` in domain coordinates.
    #[inline]
    pub fn cell_center(&self, i: usize, j: usize) -> Point {
        self.lo + Vector2::new(i as f64 + 0.5, j as f64 + 0.5) * self.cell_size
    }
}
