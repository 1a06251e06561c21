//! Error type shared by all generators.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Rejected before any sampling started.
    #[error("invalid generator params: {reason}")]
    InvalidParams { reason: String },
    /// A bounded retry loop ran out of attempts.
    #[error("sampling starved after {attempts} attempts ({placed} of {requested} points placed)")]
    Starvation {
        placed: usize,
        requested: usize,
        attempts: usize,
    },
    /// The Voronoi collaborator returned a cell count that differs from the point count.
    #[error("voronoi builder returned {cells} cells for {points} points")]
    CellCountMismatch { points: usize, cells: usize },
}

impl GeneratorError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }

    pub(crate) fn starved(placed: usize, requested: usize, attempts: usize) -> Self {
        Self::Starvation {
            placed,
            requested,
            attempts,
        }
    }
}
