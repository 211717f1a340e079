//! Scalar type aliases shared across the kernel, model, search and engine layers.

/// Absolute or partial pressure, in bar.
pub type Pressure = f64;

/// Depth, in meters (the newtype [`crate::Depth`] wraps this).
pub type DepthType = f64;

/// Gradient factor as used in ceiling calculations, `0.0..=1.0`.
pub type GradientFactor = f64;

/// `(gf_low, gf_high)`, each `1..=100` as configured by callers.
pub type GradientFactorPercents = (u8, u8);

/// Ascent/descent rate, meters per minute.
pub type RatePerMinute = f64;

/// Model variant selecting which ZH-L16 A/B coefficient table to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelVariant {
    #[default]
    ZhlB,
    ZhlC,
}
