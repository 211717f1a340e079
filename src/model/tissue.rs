//! C2 — decompression model: 16-compartment tissue state, load, and the
//! gradient-factor-adjusted ascent ceiling (spec.md §4.2).

use crate::common::{Gas, GradientFactor, Pressure, WATER_VAPOR_PRESSURE};
use crate::kernel::{haldane, schreiner, ExpProvider};
use crate::model::zhl_values::ZhlTable;

pub const COMPARTMENT_COUNT: usize = 16;

/// Fraction of dry air that is nitrogen — used to equilibrate the surface state.
const AIR_N2_FRACTION: f64 = 0.7902;

/// Immutable snapshot of 16-compartment inert-gas loading (spec.md §3).
///
/// The gradient factor in use is deliberately *not* part of this state
/// (spec.md §9 "Gradient-factor state"): `ceiling_limit` takes it as an
/// explicit parameter and the engine is responsible for tracking the
/// current value as stops are cleared. This keeps the model pure.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TissueState {
    pub n2: [Pressure; COMPARTMENT_COUNT],
    pub he: [Pressure; COMPARTMENT_COUNT],
}

/// Surface-equilibrated state: every compartment loaded with air at
/// `surface_pressure`, corrected for alveolar water vapor.
pub fn init(surface_pressure: Pressure) -> TissueState {
    let n2_loaded = (surface_pressure - WATER_VAPOR_PRESSURE) * AIR_N2_FRACTION;
    TissueState {
        n2: [n2_loaded; COMPARTMENT_COUNT],
        he: [0.0; COMPARTMENT_COUNT],
    }
}

/// Advances every compartment through one segment: Schreiner when `rate != 0`
/// (linear ascent/descent), Haldane otherwise (constant depth).
pub fn load(
    state: &TissueState,
    table: &ZhlTable,
    t: f64,
    rate: f64,
    p_start: Pressure,
    gas: &Gas,
    exp: &dyn ExpProvider,
) -> TissueState {
    let mut next = *state;
    let rate_n2 = rate * gas.n2();
    let rate_he = rate * gas.he();
    let p_i_n2_0 = (p_start - WATER_VAPOR_PRESSURE) * gas.n2();
    let p_i_he_0 = (p_start - WATER_VAPOR_PRESSURE) * gas.he();

    for i in 0..COMPARTMENT_COUNT {
        let params = &table[i];
        next.n2[i] = if rate != 0.0 {
            schreiner(state.n2[i], p_i_n2_0, rate_n2, params.n2.k, t, exp)
        } else {
            haldane(state.n2[i], p_i_n2_0, params.n2.k, t, exp)
        };
        next.he[i] = if rate != 0.0 {
            schreiner(state.he[i], p_i_he_0, rate_he, params.he.k, t, exp)
        } else {
            haldane(state.he[i], p_i_he_0, params.he.k, t, exp)
        };
    }
    next
}

/// Gradient-factor-adjusted ascent ceiling: the shallowest absolute pressure
/// tolerated by every compartment (spec.md §4.2). Returned in bar.
pub fn ceiling_limit(state: &TissueState, table: &ZhlTable, gf: GradientFactor) -> Pressure {
    let mut ceiling: Pressure = 0.0;
    for i in 0..COMPARTMENT_COUNT {
        let p_he = state.he[i];
        let p_n2 = state.n2[i];
        let p_total = p_he + p_n2;
        if p_total <= 0.0 {
            continue;
        }
        let params = &table[i];
        let a = (p_he * params.he.a + p_n2 * params.n2.a) / p_total;
        let b = (p_he * params.he.b + p_n2 * params.n2.b) / p_total;
        let p_tol = (p_total - gf * a) / (gf / b - gf + 1.0);
        ceiling = ceiling.max(p_tol.max(0.0));
    }
    ceiling
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::DefaultExp;
    use crate::model::zhl_values::ZHL_16B;

    const SURFACE: Pressure = 1.01325;

    #[test]
    fn init_equilibrates_with_air_n2_only() {
        let state = init(SURFACE);
        let expected_n2 = (SURFACE - WATER_VAPOR_PRESSURE) * AIR_N2_FRACTION;
        for i in 0..COMPARTMENT_COUNT {
            assert!((state.n2[i] - expected_n2).abs() < 1e-12);
            assert_eq!(state.he[i], 0.0);
        }
    }

    #[test]
    fn surface_state_ceiling_is_zero() {
        let state = init(SURFACE);
        let ceiling = ceiling_limit(&state, &ZHL_16B, 1.0);
        assert!(ceiling <= SURFACE);
    }

    #[test]
    fn load_no_op_at_zero_time() {
        let state = init(SURFACE);
        let air = Gas::air();
        let exp = DefaultExp;
        let next = load(&state, &ZHL_16B, 0.0, 0.0, SURFACE, &air, &exp);
        assert_eq!(state, next);
    }

    #[test]
    fn bottom_time_raises_ceiling() {
        let state = init(SURFACE);
        let air = Gas::air();
        let exp = DefaultExp;
        let bottom_pressure = SURFACE + 30.0 * 0.09985;
        let loaded = load(&state, &ZHL_16B, 20.0, 0.0, bottom_pressure, &air, &exp);
        let c0 = ceiling_limit(&state, &ZHL_16B, 1.0);
        let c1 = ceiling_limit(&loaded, &ZHL_16B, 1.0);
        assert!(c1 > c0);
    }

    #[test]
    fn ceiling_monotone_in_gf() {
        let state = init(SURFACE);
        let air = Gas::air();
        let exp = DefaultExp;
        let bottom_pressure = SURFACE + 40.0 * 0.09985;
        let loaded = load(&state, &ZHL_16B, 35.0, 0.0, bottom_pressure, &air, &exp);
        let low_gf = ceiling_limit(&loaded, &ZHL_16B, 0.3);
        let high_gf = ceiling_limit(&loaded, &ZHL_16B, 0.85);
        assert!(low_gf >= high_gf);
    }
}
