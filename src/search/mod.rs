//! C3 — ascent-ceiling search primitives (spec.md §4.3): the ascent-validity
//! predicate, the pluggable find-first-stop strategies, stop-length search,
//! and gas-switch validity.

use crate::common::{Depth, Gas, GradientFactor, Pressure, PressureConverter};
use crate::kernel::ExpProvider;
use crate::model::{ceiling_limit, load, TissueState, ZhlTable};

/// Floating-point tolerance absorbing rounding noise in ceiling comparisons
/// (spec.md §4.3).
pub const ASCENT_EPSILON: Pressure = 1e-6;

/// 3-meter stop grid mandated by spec.md §4.4.
pub const STOP_STEP_METERS: f64 = 3.0;

/// True iff `state`'s ceiling at `gf` is shallower than or equal to
/// `target`, within [`ASCENT_EPSILON`].
pub fn ascent_is_valid(
    state: &TissueState,
    table: &ZhlTable,
    gf: GradientFactor,
    target: Pressure,
) -> bool {
    ceiling_limit(state, table, gf) <= target + ASCENT_EPSILON
}

/// Strategy interface for locating the first mandatory decompression stop
/// (spec.md §9 "Pluggable first-stop finder"). Implementations both compute
/// and return the stop; the engine is responsible for actually advancing the
/// tissue state to it.
pub trait FirstStopStrategy {
    /// Returns the first stop depth (3-m aligned, `> target_depth`), or
    /// `None` if the diver can ascend directly to `target_depth`. Also
    /// returns the tissue state advanced to whichever depth ascent actually
    /// stopped at (the stop depth, or `target_depth` if none was needed).
    #[allow(clippy::too_many_arguments)]
    fn find_first_stop(
        &self,
        state: TissueState,
        table: &ZhlTable,
        gf: GradientFactor,
        conv: &PressureConverter,
        current_depth: Depth,
        target_depth: Depth,
        gas: &Gas,
        rate: f64,
        exp: &dyn ExpProvider,
    ) -> (Option<Depth>, TissueState);
}

/// Default strategy: the stepwise ceiling chase (spec.md §4.3). Deeper and
/// more conservative than bisection — each iteration rounds the ceiling up
/// to the next 3-m stop and, if ascent is still possible, advances there and
/// re-evaluates.
#[derive(Debug, Default, Clone, Copy)]
pub struct SteppedCeilingChase;

impl FirstStopStrategy for SteppedCeilingChase {
    fn find_first_stop(
        &self,
        mut state: TissueState,
        table: &ZhlTable,
        gf: GradientFactor,
        conv: &PressureConverter,
        current_depth: Depth,
        target_depth: Depth,
        gas: &Gas,
        rate: f64,
        exp: &dyn ExpProvider,
    ) -> (Option<Depth>, TissueState) {
        let mut depth = current_depth;
        loop {
            let p_c = ceiling_limit(&state, table, gf);
            let d_c = conv.depth(p_c).as_meters().max(0.0);
            let mut d_stop = Depth::from_meters(d_c).ceil_to_step(STOP_STEP_METERS);
            if d_stop.as_meters() < target_depth.as_meters() {
                d_stop = target_depth;
            }

            if d_stop.as_meters() < depth.as_meters() && d_stop.as_meters() > target_depth.as_meters()
            {
                let p_start = conv.abs_pressure(depth);
                let p_end = conv.abs_pressure(d_stop);
                let t = (depth.as_meters() - d_stop.as_meters()) / rate.abs();
                let ascent_rate = (p_end - p_start) / t;
                state = load(&state, table, t, ascent_rate, p_start, gas, exp);
                depth = d_stop;
                continue;
            }

            if d_stop.as_meters() > target_depth.as_meters() {
                return (Some(d_stop), state);
            }
            return (None, state);
        }
    }
}

/// Alternative strategy: bisection over depth between `target_depth` and
/// `current_depth`, looking for the shallowest 3-m-aligned depth at which
/// ascent is still valid (spec.md §9). Not the default: converges to the
/// same answer as [`SteppedCeilingChase`] in typical profiles but does not
/// preserve the chase's monotone-advance side effect at every grid point.
#[derive(Debug, Default, Clone, Copy)]
pub struct BisectionFirstStop;

impl FirstStopStrategy for BisectionFirstStop {
    fn find_first_stop(
        &self,
        state: TissueState,
        table: &ZhlTable,
        gf: GradientFactor,
        conv: &PressureConverter,
        current_depth: Depth,
        target_depth: Depth,
        gas: &Gas,
        rate: f64,
        exp: &dyn ExpProvider,
    ) -> (Option<Depth>, TissueState) {
        let advance_to = |d: Depth| -> TissueState {
            let p_start = conv.abs_pressure(current_depth);
            let p_end = conv.abs_pressure(d);
            let delta = current_depth.as_meters() - d.as_meters();
            if delta <= 0.0 {
                return state;
            }
            let t = delta / rate.abs();
            let ascent_rate = (p_end - p_start) / t;
            load(&state, table, t, ascent_rate, p_start, gas, exp)
        };

        let target_state = advance_to(target_depth);
        if ascent_is_valid(&target_state, table, gf, conv.abs_pressure(target_depth)) {
            return (None, target_state);
        }

        let mut lo = target_depth.as_meters();
        let mut hi = current_depth.as_meters();
        while hi - lo > STOP_STEP_METERS / 2.0 {
            let mid = (lo + hi) / 2.0;
            let mid_state = advance_to(Depth::from_meters(mid));
            if ascent_is_valid(&mid_state, table, gf, conv.abs_pressure(Depth::from_meters(mid))) {
                hi = mid;
            } else {
                lo = mid;
            }
        }
        let d_stop = Depth::from_meters(hi).ceil_to_step(STOP_STEP_METERS);
        let stop_state = advance_to(d_stop);
        (Some(d_stop), stop_state)
    }
}

/// Stop-length search (spec.md §4.3): the minimum integer number of minutes
/// to hold at `state` (currently at `p_stop`) before ascent to `p_next` is
/// valid under `gf_next`. Linear scan with step `Δ = 64` then bisection.
pub fn find_stop_length(
    state: &TissueState,
    table: &ZhlTable,
    p_stop: Pressure,
    p_next: Pressure,
    gf_next: GradientFactor,
    gas: &Gas,
    exp: &dyn ExpProvider,
) -> Option<u32> {
    const DELTA: u32 = 64;

    let valid_at = |t: u32| -> bool {
        let advanced = load(state, table, t as f64, 0.0, p_stop, gas, exp);
        ascent_is_valid(&advanced, table, gf_next, p_next)
    };

    if valid_at(0) {
        return Some(0);
    }

    let mut t_s: u32 = 0;
    let delta = DELTA;
    // Bound the scan: a stop should never need more than a day's worth of
    // off-gassing; beyond that the caller has a non-convergent profile.
    const MAX_MINUTES: u32 = 24 * 60;
    while !valid_at(t_s.saturating_add(delta)) {
        t_s += delta;
        if t_s > MAX_MINUTES {
            return None;
        }
    }

    // valid(t_s) == false, valid(t_s + delta) == true: bisect to the
    // smallest integer minute in (t_s, t_s + delta] that is valid.
    let mut lo = t_s;
    let mut hi = t_s + delta;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if valid_at(mid) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    Some(hi)
}

/// Gas-switch validity (spec.md §4.3): a tentative 3-step switch (ascend to
/// switch depth, change mix, ascend to the next 3-m-aligned depth) is valid
/// iff none of the three segments violates the ceiling, evaluated against a
/// speculative copy of the state.
#[allow(clippy::too_many_arguments)]
pub fn gas_switch_is_valid(
    state: &TissueState,
    table: &ZhlTable,
    gf: GradientFactor,
    conv: &PressureConverter,
    from_depth: Depth,
    switch_depth: Depth,
    next_depth: Depth,
    old_gas: &Gas,
    new_gas: &Gas,
    rate: f64,
    exp: &dyn ExpProvider,
) -> bool {
    let segment = |s: &TissueState, from: Depth, to: Depth, gas: &Gas| -> Option<TissueState> {
        let delta = from.as_meters() - to.as_meters();
        if delta.abs() < 1e-12 {
            return Some(*s);
        }
        let p_from = conv.abs_pressure(from);
        let p_to = conv.abs_pressure(to);
        let t = delta.abs() / rate.abs();
        let segment_rate = (p_to - p_from) / t;
        let next = load(s, table, t, segment_rate, p_from, gas, exp);
        if ascent_is_valid(&next, table, gf, p_to) {
            Some(next)
        } else {
            None
        }
    };

    let Some(at_switch) = segment(state, from_depth, switch_depth, old_gas) else {
        return false;
    };
    // The gas-change itself has no time component; tissues are unaffected.
    segment(&at_switch, switch_depth, next_depth, new_gas).is_some()
}
