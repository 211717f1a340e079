//! A decompression planner core: Bühlmann ZH-L16B/C inert-gas model with
//! Erik Baker gradient factors. Given a bottom depth, bottom time, a list of
//! breathable gas mixes and decompression parameters, [`DiveEngine`] computes
//! the full sequence of dive steps and the resulting decompression table.

pub mod common;
pub mod engine;
pub mod kernel;
pub mod model;
pub mod search;

pub use common::{
    ComputationError, ConfigError, Depth, DiveConfig, DiveError, Gas, GasMix, GradientFactor,
    GradientFactorPercents, ModelVariant, PartialPressures, Pressure, PressureConverter,
    RatePerMinute, Time, WATER_VAPOR_PRESSURE,
};
pub use engine::{DecoStop, DiveEngine, DivePlan, DiveStep, Phase};
pub use kernel::{haldane, schreiner, DefaultExp, ExpProvider, TabulatedExp};
pub use model::{ceiling_limit, init, load, TissueState, ZhlTable, ZHL_16B, ZHL_16C};
pub use search::{
    ascent_is_valid, find_stop_length, gas_switch_is_valid, BisectionFirstStop, FirstStopStrategy,
    SteppedCeilingChase,
};
