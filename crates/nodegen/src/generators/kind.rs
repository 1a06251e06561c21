use rand::Rng;
use tracing::info;

use super::{
    ConstantDThetaGenerator, ConstantDThetaParams, CvtGenerator, CvtParams,
    FibonacciDiskGenerator, FibonacciParams, GlassGenerator, GlassParams, HcpGenerator,
    LatticeGenerator, Method, NodeConfig, NodeGenerator, PoissonDiskGenerator, PoissonDiskParams,
    PointSet, ReplayToken,
};
use crate::domain::Domain;
use crate::error::GeneratorError;

/// Any generator family, selected at runtime.
#[derive(Clone, Debug)]
pub enum GeneratorKind {
    Lattice(LatticeGenerator),
    Hcp(HcpGenerator),
    Fibonacci(FibonacciDiskGenerator),
    ConstantDTheta(ConstantDThetaGenerator),
    Poisson(PoissonDiskGenerator),
    Glass(GlassGenerator),
    Cvt(CvtGenerator),
}

impl GeneratorKind {
    /// Validate `cfg` and build the generator it names.
    pub fn from_config(cfg: &NodeConfig) -> Result<Self, GeneratorError> {
        cfg.validate()?;
        let domain = cfg.domain()?;
        let n = cfg.num_nodes;
        let kind = match cfg.method {
            Method::Lattice => Self::Lattice(LatticeGenerator::new(cfg.lattice_params()?, domain)?),
            Method::Hcp => Self::Hcp(HcpGenerator::new(cfg.lattice_params()?, domain)?),
            Method::Fibonacci => {
                let params = FibonacciParams {
                    num_points: n,
                    on_circle: cfg.on_circle,
                };
                Self::Fibonacci(FibonacciDiskGenerator::new(params, domain)?)
            }
            Method::ConstantDTheta => {
                let params = ConstantDThetaParams { approx_points: n };
                Self::ConstantDTheta(ConstantDThetaGenerator::new(params, domain)?)
            }
            Method::Poisson => {
                let mut params = PoissonDiskParams::new(n);
                if let Some(k) = cfg.candidates {
                    params.candidates = k;
                }
                Self::Poisson(PoissonDiskGenerator::new(params, domain)?)
            }
            Method::Glass => {
                let params = GlassParams {
                    trials: cfg.trials,
                    ..GlassParams::new(n)
                };
                Self::Glass(GlassGenerator::new(params, domain)?)
            }
            Method::Cvt => {
                let mut params = CvtParams::new(n);
                if let Some(it) = cfg.iterations {
                    params.iterations = it;
                }
                params.seed = cfg.seed;
                Self::Cvt(CvtGenerator::new(params, domain)?)
            }
        };
        Ok(kind)
    }
}

macro_rules! dispatch {
    ($kind:expr, $g:ident => $body:expr) => {
        match $kind {
            GeneratorKind::Lattice($g) => $body,
            GeneratorKind::Hcp($g) => $body,
            GeneratorKind::Fibonacci($g) => $body,
            GeneratorKind::ConstantDTheta($g) => $body,
            GeneratorKind::Poisson($g) => $body,
            GeneratorKind::Glass($g) => $body,
            GeneratorKind::Cvt($g) => $body,
        }
    };
}

impl NodeGenerator for GeneratorKind {
    fn name(&self) -> &'static str {
        dispatch!(self, g => g.name())
    }

    fn domain(&self) -> &Domain {
        dispatch!(self, g => g.domain())
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PointSet, GeneratorError> {
        dispatch!(self, g => g.generate(rng))
    }
}

/// Result of one configured run.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSample {
    pub positions: PointSet,
    pub config: NodeConfig,
    pub replay: ReplayToken,
}

impl NodeSample {
    /// Emitted count; may differ from `config.num_nodes`.
    pub fn num_nodes(&self) -> usize {
        self.positions.num_nodes()
    }
}

/// Build the generator named by `cfg` and run it with the RNG derived from `replay`.
pub fn generate_nodes(cfg: &NodeConfig, replay: ReplayToken) -> Result<NodeSample, GeneratorError> {
    let generator = GeneratorKind::from_config(cfg)?;
    let positions = generator.regenerate(replay)?;
    info!(
        method = generator.name(),
        requested = cfg.num_nodes,
        emitted = positions.num_nodes(),
        seed = replay.seed,
        index = replay.index,
        "generated nodes"
    );
    Ok(NodeSample {
        positions,
        config: cfg.clone(),
        replay,
    })
}
