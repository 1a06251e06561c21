//! Structured 2D grid: the position-assignment helper used by lattice layouts.
//!
//! Nodes sit at `(ix * dx, iy * dy) - origin`; linear index `ix + iy * nx`
//! (x fastest).

use nalgebra::Vector2;

use crate::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid2 {
    pub nx: usize,
    pub ny: usize,
    pub dx: f64,
    pub dy: f64,
    origin: Point,
}

impl Grid2 {
    pub fn new(nx: usize, ny: usize, dx: f64, dy: f64) -> Self {
        Self {
            nx,
            ny,
            dx,
            dy,
            origin: Vector2::zeros(),
        }
    }

    /// Set the offset subtracted from every node position.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.nx * self.ny
    }

    #[inline]
    pub fn index(&self, ix: usize, iy: usize) -> usize {
        ix + iy * self.nx
    }

    #[inline]
    pub fn coordinates(&self, idx: usize) -> (usize, usize) {
        (idx % self.nx, idx / self.nx)
    }

    pub fn position(&self, idx: usize) -> Point {
        let (ix, iy) = self.coordinates(idx);
        Vector2::new(ix as f64 * self.dx, iy as f64 * self.dy) - self.origin
    }

    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.size()).map(move |i| self.position(i))
    }
}
