#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::global_types::Pressure;
use super::units::Depth;

/// Alveolar water-vapor pressure at 37°C (Bühlmann's value), in bar.
pub const WATER_VAPOR_PRESSURE: Pressure = 0.0627;

/// Partial pressures of a gas mix at some ambient pressure.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PartialPressures {
    pub o2: Pressure,
    pub n2: Pressure,
    pub he: Pressure,
}

/// A breathable gas mix by mole fraction. `o2 + n2 + he == 1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Gas {
    o2: f64,
    n2: f64,
    he: f64,
}

impl Gas {
    /// Build a mix from o2 and he fractions; n2 is the remainder.
    /// Panics if either fraction is out of `0.0..=1.0` or their sum exceeds 1.0 —
    /// gas composition is a configuration-time constant, not a runtime input,
    /// so the teacher's panicking constructor is kept as-is.
    pub fn new(o2: f64, he: f64) -> Self {
        if !(0.0..=1.0).contains(&o2) {
            panic!("invalid O2 fraction [{o2}]");
        }
        if !(0.0..=1.0).contains(&he) {
            panic!("invalid He fraction [{he}]");
        }
        if o2 + he > 1.0 + 1e-9 {
            panic!("invalid gas fractions, O2 + He can't exceed 1.0");
        }
        Self {
            o2,
            he,
            n2: 1.0 - o2 - he,
        }
    }

    pub fn air() -> Self {
        Self::new(0.21, 0.)
    }

    pub fn o2(&self) -> f64 {
        self.o2
    }
    pub fn n2(&self) -> f64 {
        self.n2
    }
    pub fn he(&self) -> f64 {
        self.he
    }

    /// Fractions sum to 1.0 within floating tolerance — used by config validation.
    pub fn fractions_valid(&self) -> bool {
        (self.o2 + self.n2 + self.he - 1.0).abs() < 1e-6
    }

    /// Inspired partial pressures breathing this mix at `abs_pressure`
    /// (ambient, not corrected for water vapor).
    pub fn partial_pressures(&self, abs_pressure: Pressure) -> PartialPressures {
        PartialPressures {
            o2: self.o2 * abs_pressure,
            n2: self.n2 * abs_pressure,
            he: self.he * abs_pressure,
        }
    }

    /// Inspired partial pressures in the alveoli, correcting for water vapor
    /// pressure (spec.md §4.1 "Inspired partial pressure of gas g").
    pub fn inspired_partial_pressures(&self, abs_pressure: Pressure) -> PartialPressures {
        self.partial_pressures(abs_pressure - WATER_VAPOR_PRESSURE)
    }
}

/// A gas in the dive's available mix list, paired with the depth at which
/// the engine may switch to it (spec.md §3 `GasMix`).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GasMix {
    pub gas: Gas,
    pub switch_depth: Depth,
}

impl GasMix {
    pub fn new(gas: Gas, switch_depth: Depth) -> Self {
        Self { gas, switch_depth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_fractions() {
        let air = Gas::air();
        assert_eq!(air.o2(), 0.21);
        assert!((air.n2() - 0.79).abs() < 1e-9);
        assert_eq!(air.he(), 0.);
    }

    #[test]
    fn trimix_fractions() {
        let tmx = Gas::new(0.18, 0.45);
        assert_eq!(tmx.o2(), 0.18);
        assert!((tmx.n2() - 0.37).abs() < 1e-9);
        assert_eq!(tmx.he(), 0.45);
    }

    #[test]
    #[should_panic]
    fn invalid_o2_high() {
        Gas::new(1.1, 0.);
    }

    #[test]
    #[should_panic]
    fn invalid_fraction_sum() {
        Gas::new(0.5, 0.6);
    }

    #[test]
    fn partial_pressures_air_at_10m() {
        let air = Gas::air();
        let pp = air.partial_pressures(1.99825); // surface 1.01325 + 10*0.09985
        assert!((pp.o2 - 0.4196325).abs() < 1e-6);
        assert!((pp.n2 - 1.5786175).abs() < 1e-6);
        assert_eq!(pp.he, 0.);
    }
}
