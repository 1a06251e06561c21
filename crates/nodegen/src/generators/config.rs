//! Declarative generator configuration, as read from JSON.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::cvt::SeedMethod;
use super::lattice::LatticeParams;
use crate::domain::{Domain, Shape};
use crate::error::GeneratorError;

/// Generator family selected by `NodeConfig::method`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Lattice,
    Hcp,
    Fibonacci,
    #[serde(rename = "constant_dtheta")]
    ConstantDTheta,
    Poisson,
    Glass,
    Cvt,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::Lattice,
        Method::Hcp,
        Method::Fibonacci,
        Method::ConstantDTheta,
        Method::Poisson,
        Method::Glass,
        Method::Cvt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lattice => "lattice",
            Self::Hcp => "hcp",
            Self::Fibonacci => "fibonacci",
            Self::ConstantDTheta => "constant_dtheta",
            Self::Poisson => "poisson",
            Self::Glass => "glass",
            Self::Cvt => "cvt",
        }
    }

    /// Whether the output depends on the RNG.
    pub fn is_stochastic(&self) -> bool {
        matches!(self, Self::Poisson | Self::Glass | Self::Cvt)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| GeneratorError::invalid(format!("unknown method '{s}'")))
    }
}

fn default_bounds() -> [[f64; 2]; 2] {
    [[-1.0, -1.0], [1.0, 1.0]]
}

/// One generator run, fully described.
///
/// Optional knobs fall back to the generator's defaults. `seed` names the
/// generator that produces the initial points for `Method::Cvt`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    pub method: Method,
    #[serde(default)]
    pub num_nodes: usize,
    /// `[[xmin, ymin], [xmax, ymax]]`.
    #[serde(default = "default_bounds")]
    pub bounds: [[f64; 2]; 2],
    #[serde(default)]
    pub shape: Shape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trials: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nx: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ny: Option<usize>,
    #[serde(default)]
    pub on_circle: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedMethod>,
}

impl NodeConfig {
    pub fn new(method: Method, num_nodes: usize) -> Self {
        Self {
            method,
            num_nodes,
            bounds: default_bounds(),
            shape: Shape::default(),
            trials: None,
            iterations: None,
            candidates: None,
            nx: None,
            ny: None,
            on_circle: false,
            seed: None,
        }
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn domain(&self) -> Result<Domain, GeneratorError> {
        Domain::from_bounds(self.bounds, self.shape)
    }

    /// Lattice dimensions: explicit `nx`/`ny`, else a near-square grid for `num_nodes`.
    pub fn lattice_params(&self) -> Result<LatticeParams, GeneratorError> {
        match (self.nx, self.ny) {
            (Some(nx), Some(ny)) => Ok(LatticeParams { nx, ny }),
            (None, None) if self.num_nodes > 0 => Ok(LatticeParams::square_for(self.num_nodes)),
            (None, None) => Err(GeneratorError::invalid(
                "lattice needs nx and ny, or numNodes > 0",
            )),
            _ => Err(GeneratorError::invalid("nx and ny must be given together")),
        }
    }

    /// Checks that do not need a generator: the domain and the count.
    ///
    /// Per-generator constraints (zero trials, zero candidates, ...) are
    /// checked again by the generator constructors.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        self.domain()?;
        match self.method {
            Method::Lattice | Method::Hcp => {
                self.lattice_params()?;
            }
            _ if self.num_nodes == 0 => {
                return Err(GeneratorError::invalid("numNodes must be > 0"));
            }
            _ => {}
        }
        if self.trials == Some(0) {
            return Err(GeneratorError::invalid("trials must be > 0"));
        }
        if self.candidates == Some(0) {
            return Err(GeneratorError::invalid("candidates must be > 0"));
        }
        Ok(())
    }
}
