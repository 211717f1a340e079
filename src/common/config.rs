#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::global_types::{GradientFactor, ModelVariant, Pressure, RatePerMinute};
use super::units::Depth;

/// Decompression-planning parameters (spec.md §6 "Configuration").
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiveConfig {
    pub ascent_rate: RatePerMinute,
    pub descent_rate: RatePerMinute,
    pub surface_pressure: Pressure,
    pub gf_low_pct: u8,
    pub gf_high_pct: u8,
    pub last_stop_depth: Depth,
    pub meter_to_bar: f64,
    pub minimum_deco_stop_time: f64,
    pub model_variant: ModelVariant,
}

impl Default for DiveConfig {
    fn default() -> Self {
        Self {
            ascent_rate: 10.,
            descent_rate: 20.,
            surface_pressure: 1.01325,
            gf_low_pct: 30,
            gf_high_pct: 85,
            last_stop_depth: Depth::from_meters(3.),
            meter_to_bar: 0.09985,
            minimum_deco_stop_time: 1.,
            model_variant: ModelVariant::ZhlB,
        }
    }
}

impl DiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ascent_rate(mut self, rate: RatePerMinute) -> Self {
        self.ascent_rate = rate;
        self
    }

    pub fn with_descent_rate(mut self, rate: RatePerMinute) -> Self {
        self.descent_rate = rate;
        self
    }

    pub fn with_surface_pressure(mut self, pressure: Pressure) -> Self {
        self.surface_pressure = pressure;
        self
    }

    pub fn with_gradient_factors(mut self, gf_low_pct: u8, gf_high_pct: u8) -> Self {
        self.gf_low_pct = gf_low_pct;
        self.gf_high_pct = gf_high_pct;
        self
    }

    pub fn with_last_stop_depth(mut self, depth: Depth) -> Self {
        self.last_stop_depth = depth;
        self
    }

    pub fn with_model_variant(mut self, variant: ModelVariant) -> Self {
        self.model_variant = variant;
        self
    }

    pub fn gf_low(&self) -> GradientFactor {
        self.gf_low_pct as f64 / 100.
    }

    pub fn gf_high(&self) -> GradientFactor {
        self.gf_high_pct as f64 / 100.
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let gf_range = 1..=100u8;
        if !gf_range.contains(&self.gf_low_pct)
            || !gf_range.contains(&self.gf_high_pct)
            || self.gf_low_pct > self.gf_high_pct
        {
            return Err(ConfigError::InvalidGradientFactors);
        }
        if !(0.3..=1.5).contains(&self.surface_pressure) {
            return Err(ConfigError::InvalidSurfacePressure);
        }
        if self.ascent_rate <= 0. || self.descent_rate <= 0. {
            return Err(ConfigError::InvalidRate);
        }
        let last_stop_m = self.last_stop_depth.as_meters();
        if (last_stop_m - 3.).abs() > 1e-9 && (last_stop_m - 6.).abs() > 1e-9 {
            return Err(ConfigError::InvalidLastStopDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(DiveConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_inverted_gradient_factors() {
        let config = DiveConfig::new().with_gradient_factors(90, 30);
        assert_eq!(config.validate(), Err(ConfigError::InvalidGradientFactors));
    }

    #[test]
    fn rejects_bad_last_stop_depth() {
        let config = DiveConfig::new().with_last_stop_depth(Depth::from_meters(4.5));
        assert_eq!(config.validate(), Err(ConfigError::InvalidLastStopDepth));
    }

    #[test]
    fn rejects_nonpositive_rate() {
        let config = DiveConfig::new().with_ascent_rate(0.);
        assert_eq!(config.validate(), Err(ConfigError::InvalidRate));
    }
}
