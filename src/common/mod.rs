mod config;
mod error;
mod gas;
mod global_types;
mod units;

pub use config::DiveConfig;
pub use error::{ComputationError, ConfigError, DiveError};
pub use gas::{Gas, GasMix, PartialPressures, WATER_VAPOR_PRESSURE};
pub use global_types::{
    DepthType, GradientFactor, GradientFactorPercents, ModelVariant, Pressure, RatePerMinute,
};
pub use units::{Depth, PressureConverter, Time};
