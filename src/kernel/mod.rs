//! C1 — gas-loading kernel: pure Schreiner/Haldane equations (spec.md §4.1).
//!
//! Both equations are generic over an [`ExpProvider`] so the `exp(-k*t)` term
//! can be swapped for a precomputed lookup (design note in spec.md §9).

use std::collections::HashMap;

/// Computes `exp(-k*t)` for the gas-loading equations. The default
/// implementation calls `f64::exp` directly; [`TabulatedExp`] is the
/// alternative back-end for substituting a precomputed table on weak
/// hardware, keyed by `(k, t)` as spec.md §4.1 requires.
pub trait ExpProvider {
    fn exp_minus_kt(&self, k: f64, t: f64) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultExp;

impl ExpProvider for DefaultExp {
    fn exp_minus_kt(&self, k: f64, t: f64) -> f64 {
        (-k * t).exp()
    }
}

/// Table-backed `exp(-k*t)`, precomputed for a fixed set of decay constants
/// (one per compartment) at integer-minute durations. Falls back to
/// `f64::exp` for any `(k, t)` pair outside the precomputed grid, so it is
/// always total, matching [`DefaultExp`]'s behavior for off-grid queries.
#[derive(Debug, Clone)]
pub struct TabulatedExp {
    // keyed by (k bits, whole minutes) since f64 isn't Hash/Eq
    table: HashMap<(u64, u32), f64>,
}

impl TabulatedExp {
    /// Build a table for the given decay constants over `0..=max_minutes`.
    pub fn build(decay_constants: &[f64], max_minutes: u32) -> Self {
        let mut table = HashMap::with_capacity(decay_constants.len() * (max_minutes as usize + 1));
        for &k in decay_constants {
            for t in 0..=max_minutes {
                table.insert((k.to_bits(), t), (-k * t as f64).exp());
            }
        }
        Self { table }
    }
}

impl ExpProvider for TabulatedExp {
    fn exp_minus_kt(&self, k: f64, t: f64) -> f64 {
        if t.fract() == 0.0 && t >= 0.0 {
            if let Some(&v) = self.table.get(&(k.to_bits(), t as u32)) {
                return v;
            }
        }
        (-k * t).exp()
    }
}

/// Schreiner equation: compartment pressure after a linear pressure ramp of
/// duration `t` (minutes) at rate `rate` (bar/min), starting from inspired
/// pressure `p_i_0` and compartment pressure `p_0`.
pub fn schreiner(p_0: f64, p_i_0: f64, rate: f64, k: f64, t: f64, exp: &dyn ExpProvider) -> f64 {
    if t <= 0.0 {
        return p_0;
    }
    if k == 0.0 {
        return p_i_0 + rate * t;
    }
    let decayed = exp.exp_minus_kt(k, t);
    p_i_0 + rate * (t - 1.0 / k) - (p_i_0 - p_0 - rate / k) * decayed
}

/// Haldane equation: compartment pressure after a constant-depth exposure of
/// duration `t` (minutes) at inspired pressure `p_i`.
pub fn haldane(p_0: f64, p_i: f64, k: f64, t: f64, exp: &dyn ExpProvider) -> f64 {
    if t <= 0.0 {
        return p_0;
    }
    p_0 + (p_i - p_0) * (1.0 - exp.exp_minus_kt(k, t))
}
