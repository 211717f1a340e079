use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::global_types::{DepthType, Pressure};

/// Depth below the surface, in meters. Never negative in a valid dive state.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Depth {
    m: DepthType,
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.m)
    }
}

impl Depth {
    pub const fn zero() -> Self {
        Self { m: 0. }
    }

    pub fn from_meters<T: Into<DepthType>>(val: T) -> Self {
        Self { m: val.into() }
    }

    pub fn as_meters(&self) -> DepthType {
        self.m
    }

    /// Round up to the nearest multiple of `step` meters (e.g. the 3m stop grid).
    pub fn ceil_to_step(&self, step: DepthType) -> Self {
        Self {
            m: (self.m / step).ceil() * step,
        }
    }

    /// Round down to the nearest multiple of `step` meters.
    pub fn floor_to_step(&self, step: DepthType) -> Self {
        Self {
            m: (self.m / step).floor() * step,
        }
    }

    pub fn max(self, other: Self) -> Self {
        if self.m >= other.m {
            self
        } else {
            other
        }
    }
}

impl Add for Depth {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { m: self.m + rhs.m }
    }
}

impl Sub for Depth {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self { m: self.m - rhs.m }
    }
}

impl Mul<f64> for Depth {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Self { m: self.m * rhs }
    }
}

/// Time elapsed, stored internally as seconds; dive plans are expressed in
/// cumulative minutes (spec.md §3), exposed via [`Time::as_minutes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    s: f64,
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.as_minutes())
    }
}

impl Time {
    pub const fn zero() -> Self {
        Self { s: 0. }
    }

    pub fn from_seconds<T: Into<f64>>(val: T) -> Self {
        Self { s: val.into() }
    }

    pub fn from_minutes<T: Into<f64>>(val: T) -> Self {
        Self { s: val.into() * 60. }
    }

    pub fn as_seconds(&self) -> f64 {
        self.s
    }

    pub fn as_minutes(&self) -> f64 {
        self.s / 60.
    }
}

impl Add for Time {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self { s: self.s + rhs.s }
    }
}

impl Sub for Time {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self { s: self.s - rhs.s }
    }
}

impl AddAssign for Time {
    fn add_assign(&mut self, rhs: Self) {
        self.s += rhs.s;
    }
}

impl Div<f64> for Time {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        Self { s: self.s / rhs }
    }
}

/// Converts between depth and absolute pressure using a configurable
/// meters-per-bar factor (spec.md §3: `P_abs = P_surface + depth * meter_to_bar`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressureConverter {
    pub surface_pressure: Pressure,
    pub meter_to_bar: f64,
}

impl PressureConverter {
    pub fn abs_pressure(&self, depth: Depth) -> Pressure {
        self.surface_pressure + depth.as_meters() * self.meter_to_bar
    }

    pub fn depth(&self, abs_pressure: Pressure) -> Depth {
        Depth::from_meters((abs_pressure - self.surface_pressure) / self.meter_to_bar)
    }
}
