//! Bounded 2D sampling domains (axis-aligned rectangle or disk).
//!
//! Every generator asks the domain three questions: is a point inside, how do
//! I draw a uniform point, and where does an escaped point go back to. The
//! Voronoi builder additionally clips cells against `clip_polygon`.

use nalgebra::Vector2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::geom2::{Hs2, Poly2};
use crate::Point;

/// Number of sides of the regular polygon circumscribing a disk for cell clipping.
pub const DISK_CLIP_SIDES: usize = 64;

/// Draws spent on rejection sampling before `sample_uniform` gives up.
pub(crate) const MAX_UNIFORM_ATTEMPTS: usize = 1024;

/// Shape tag used by configuration intake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    #[default]
    Square,
    Disk,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Disk => "disk",
        }
    }
}

impl std::str::FromStr for Shape {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(Self::Square),
            "disk" => Ok(Self::Disk),
            other => Err(GeneratorError::invalid(format!("unknown shape '{other}'"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Domain {
    /// Open rectangle `lo < p < hi` (per axis).
    Square { lo: Point, hi: Point },
    /// Closed disk `|p - center| <= radius`.
    Disk { center: Point, radius: f64 },
}

impl Default for Domain {
    fn default() -> Self {
        Self::unit_square()
    }
}

impl Domain {
    /// `[-1, 1]²`.
    pub fn unit_square() -> Self {
        Self::Square {
            lo: Vector2::new(-1.0, -1.0),
            hi: Vector2::new(1.0, 1.0),
        }
    }

    /// Radius 1 around the origin.
    pub fn unit_disk() -> Self {
        Self::Disk {
            center: Vector2::zeros(),
            radius: 1.0,
        }
    }

    /// Build from `[[xmin, ymin], [xmax, ymax]]`. A disk is inscribed in the bounds,
    /// which therefore must be square.
    pub fn from_bounds(bounds: [[f64; 2]; 2], shape: Shape) -> Result<Self, GeneratorError> {
        let lo = Vector2::new(bounds[0][0], bounds[0][1]);
        let hi = Vector2::new(bounds[1][0], bounds[1][1]);
        let dom = match shape {
            Shape::Square => Self::Square { lo, hi },
            Shape::Disk => {
                let ext = hi - lo;
                if (ext.x - ext.y).abs() > 1e-12 * ext.x.abs().max(1.0) {
                    return Err(GeneratorError::invalid(
                        "disk bounds must have equal width and height",
                    ));
                }
                Self::Disk {
                    center: (lo + hi) * 0.5,
                    radius: 0.5 * ext.x,
                }
            }
        };
        dom.validate()?;
        Ok(dom)
    }

    pub fn validate(&self) -> Result<(), GeneratorError> {
        match *self {
            Self::Square { lo, hi } => {
                if !(lo.iter().all(|v| v.is_finite()) && hi.iter().all(|v| v.is_finite())) {
                    return Err(GeneratorError::invalid("bounds must be finite"));
                }
                if hi.x <= lo.x || hi.y <= lo.y {
                    return Err(GeneratorError::invalid("bounds must satisfy lo < hi per axis"));
                }
            }
            Self::Disk { center, radius } => {
                if !center.iter().all(|v| v.is_finite()) {
                    return Err(GeneratorError::invalid("disk center must be finite"));
                }
                if !radius.is_finite() || radius <= 0.0 {
                    return Err(GeneratorError::invalid("disk radius must be finite and > 0"));
                }
            }
        }
        Ok(())
    }

    pub fn shape(&self) -> Shape {
        match self {
            Self::Square { .. } => Shape::Square,
            Self::Disk { .. } => Shape::Disk,
        }
    }

    pub fn area(&self) -> f64 {
        match *self {
            Self::Square { lo, hi } => (hi.x - lo.x) * (hi.y - lo.y),
            Self::Disk { radius, .. } => std::f64::consts::PI * radius * radius,
        }
    }

    pub fn center(&self) -> Point {
        match *self {
            Self::Square { lo, hi } => (lo + hi) * 0.5,
            Self::Disk { center, .. } => center,
        }
    }

    /// Axis-aligned bounding box `(lo, hi)`.
    pub fn bounding_box(&self) -> (Point, Point) {
        match *self {
            Self::Square { lo, hi } => (lo, hi),
            Self::Disk { center, radius } => {
                let r = Vector2::new(radius, radius);
                (center - r, center + r)
            }
        }
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Self::Square { lo, hi } => lo.x < p.x && p.x < hi.x && lo.y < p.y && p.y < hi.y,
            Self::Disk { center, radius } => (p - center).norm_squared() <= radius * radius,
        }
    }

    /// Uniform draw over the bounding box (not filtered by `contains`).
    #[inline]
    pub fn sample_bounding_box<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let (lo, hi) = self.bounding_box();
        Vector2::new(rng.gen_range(lo.x..hi.x), rng.gen_range(lo.y..hi.y))
    }

    /// Uniform draw inside the domain by bounded rejection from the bounding box.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        (0..MAX_UNIFORM_ATTEMPTS)
            .map(|_| self.sample_bounding_box(rng))
            .find(|p| self.contains(*p))
    }

    /// Bring a point back into the closed domain.
    ///
    /// - Square: clamp each coordinate independently.
    /// - Disk: project radially onto the circle when outside, identity otherwise.
    pub fn confine(&self, p: Point) -> Point {
        match *self {
            Self::Square { lo, hi } => Vector2::new(p.x.clamp(lo.x, hi.x), p.y.clamp(lo.y, hi.y)),
            Self::Disk { center, radius } => {
                let d = p - center;
                let r2 = d.norm_squared();
                if r2 > radius * radius {
                    center + d * (radius / r2.sqrt())
                } else {
                    p
                }
            }
        }
    }

    /// Closed convex polygon covering the domain, used to bound Voronoi cells.
    ///
    /// The disk is replaced by a circumscribed regular polygon with `DISK_CLIP_SIDES` sides.
    pub fn clip_polygon(&self) -> Poly2 {
        match *self {
            Self::Square { lo, hi } => Poly2::from_halfspaces([
                Hs2::new(Vector2::new(1.0, 0.0), hi.x),
                Hs2::new(Vector2::new(-1.0, 0.0), -lo.x),
                Hs2::new(Vector2::new(0.0, 1.0), hi.y),
                Hs2::new(Vector2::new(0.0, -1.0), -lo.y),
            ]),
            Self::Disk { center, radius } => {
                let step = std::f64::consts::TAU / DISK_CLIP_SIDES as f64;
                Poly2::from_halfspaces((0..DISK_CLIP_SIDES).map(|k| {
                    let th = step * k as f64;
                    let n = Vector2::new(th.cos(), th.sin());
                    Hs2::new(n, n.dot(&center) + radius)
                }))
            }
        }
    }
}
