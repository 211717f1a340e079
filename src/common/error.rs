use thiserror::Error;

use super::units::Depth;
use crate::common::gas::Gas;

/// Rejected before planning begins (spec.md §7 "Configuration errors").
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("gradient factors must be in 1-100 and gf_low <= gf_high")]
    InvalidGradientFactors,
    #[error("surface pressure out of plausible range (bar)")]
    InvalidSurfacePressure,
    #[error("ascent/descent rate must be positive")]
    InvalidRate,
    #[error("last stop depth must be 3 or 6 meters")]
    InvalidLastStopDepth,
    #[error("gas list must not be empty")]
    EmptyGasList,
    #[error("gas fractions for mix {0:?} do not sum to 1.0")]
    InvalidGasFractions(Gas),
    #[error("bottom depth {bottom_depth} exceeds every available gas mix's switch depth")]
    BottomDepthUnreachable { bottom_depth: Depth },
    #[error("no gas mix is available at the surface (switch_depth 0)")]
    NoBottomOrSurfaceGas,
}

/// Raised while planning a dive (spec.md §7 "Computational errors").
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationError {
    #[error("first stop at {stop_depth} would deepen below the deco zone entry depth for {gas:?}")]
    FirstStopBelowDecoZone { stop_depth: Depth, gas: Gas },
    #[error("stop length search did not converge at {depth} on {gas:?} (insufficient off-gassing gradient)")]
    StopLengthNonConvergent { depth: Depth, gas: Gas },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiveError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("computation error: {0}")]
    Computation(#[from] ComputationError),
}
