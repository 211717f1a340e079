//! C4 — dive engine (spec.md §4.4): orchestrates descent, bottom segment,
//! NDL check, gas-switch-aware free ascent, and the decompression-stop loop.

use crate::common::{
    ComputationError, ConfigError, Depth, DiveConfig, DiveError, Gas, GasMix, GradientFactor,
    Pressure, PressureConverter, Time,
};
use crate::kernel::{DefaultExp, ExpProvider};
use crate::model::{init, load, TissueState, ZhlTable};
use crate::search::{
    ascent_is_valid, find_stop_length, gas_switch_is_valid, FirstStopStrategy, SteppedCeilingChase,
    STOP_STEP_METERS,
};

/// One leg of a dive plan (spec.md §3 `DiveStep`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Descent,
    Const,
    Ascent,
    DecoStop,
    GasMix,
}

/// A single emitted leg of the plan. `abs_p` is the absolute pressure at the
/// step's *end*; `time` is cumulative minutes since dive start; `gas` is the
/// mix breathed to reach `abs_p`, `prev_gas` the mix before a switch (`None`
/// for every step that isn't itself a gas change).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiveStep {
    pub phase: Phase,
    pub abs_p: Pressure,
    pub time: Time,
    pub gas: Gas,
    pub prev_gas: Option<Gas>,
    pub tissues: TissueState,
}

/// One row of the decompression table (spec.md §3 `DecoStop`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecoStop {
    pub depth: Depth,
    pub time: Time,
}

/// The full output of [`DiveEngine::calculate`]: the ordered step sequence
/// plus the authoritative decompression table.
#[derive(Clone, Debug, PartialEq)]
pub struct DivePlan {
    pub steps: Vec<DiveStep>,
    pub deco_table: Vec<DecoStop>,
}

impl DivePlan {
    pub fn total_deco_time(&self) -> Time {
        self.deco_table
            .iter()
            .fold(Time::zero(), |acc, s| acc + s.time)
    }
}

/// Validates the gas list and locates the bottom mix (spec.md §7
/// "Configuration errors"). The bottom mix is the one with the largest
/// `switch_depth` not exceeding `bottom_depth` — travel mixes staged deeper
/// than the bottom are deliberately excluded from this search.
fn validate_gas_list(gas_list: &[GasMix], bottom_depth: Depth) -> Result<GasMix, ConfigError> {
    if gas_list.is_empty() {
        return Err(ConfigError::EmptyGasList);
    }
    for mix in gas_list {
        if !mix.gas.fractions_valid() {
            return Err(ConfigError::InvalidGasFractions(mix.gas));
        }
    }
    if !gas_list
        .iter()
        .any(|g| g.switch_depth.as_meters() <= 1e-9)
    {
        return Err(ConfigError::NoBottomOrSurfaceGas);
    }
    gas_list
        .iter()
        .filter(|g| g.switch_depth.as_meters() <= bottom_depth.as_meters() + 1e-9)
        .max_by(|a, b| a.switch_depth.as_meters().total_cmp(&b.switch_depth.as_meters()))
        .copied()
        .ok_or(ConfigError::BottomDepthUnreachable { bottom_depth })
}

/// Gradient factor at depth `d`, interpolated between `gf_low` (at the first
/// fixed stop `d1`) and `gf_high` (at the surface) — spec.md §4.2.
fn gf_at_depth(d: Depth, d1: Depth, gf_low: GradientFactor, gf_high: GradientFactor) -> GradientFactor {
    if d1.as_meters() <= 1e-9 {
        return gf_high;
    }
    gf_high + (d.as_meters() / d1.as_meters()) * (gf_low - gf_high)
}

/// Orchestrates a full dive plan (spec.md §4.4). Generic over the first-stop
/// strategy and the `exp(-k*t)` back-end so both seams named in spec.md §9
/// are swappable without touching the engine's control flow.
pub struct DiveEngine<S: FirstStopStrategy = SteppedCeilingChase, X: ExpProvider = DefaultExp> {
    config: DiveConfig,
    strategy: S,
    exp: X,
}

impl DiveEngine<SteppedCeilingChase, DefaultExp> {
    pub fn new(config: DiveConfig) -> Self {
        Self {
            config,
            strategy: SteppedCeilingChase,
            exp: DefaultExp,
        }
    }
}

impl<S: FirstStopStrategy, X: ExpProvider> DiveEngine<S, X> {
    pub fn with_strategy<S2: FirstStopStrategy>(self, strategy: S2) -> DiveEngine<S2, X> {
        DiveEngine {
            config: self.config,
            strategy,
            exp: self.exp,
        }
    }

    pub fn with_exp_provider<X2: ExpProvider>(self, exp: X2) -> DiveEngine<S, X2> {
        DiveEngine {
            config: self.config,
            strategy: self.strategy,
            exp,
        }
    }

    /// Plans a dive to `bottom_depth` for `bottom_time` (minutes, includes
    /// descent) on `gas_list` (spec.md §4.4 and §6).
    pub fn calculate(
        &self,
        bottom_depth: Depth,
        bottom_time: Time,
        gas_list: &[GasMix],
    ) -> Result<DivePlan, DiveError> {
        self.config.validate()?;
        if self.config.ascent_rate <= 0.0 || self.config.descent_rate <= 0.0 {
            return Err(ConfigError::InvalidRate.into());
        }
        let bottom_mix = validate_gas_list(gas_list, bottom_depth)?;

        let table = self.config.model_variant.table();
        let conv = PressureConverter {
            surface_pressure: self.config.surface_pressure,
            meter_to_bar: self.config.meter_to_bar,
        };

        let mut steps = Vec::new();
        let surface_state = init(self.config.surface_pressure);
        steps.push(DiveStep {
            phase: Phase::Start,
            abs_p: self.config.surface_pressure,
            time: Time::zero(),
            gas: bottom_mix.gas,
            prev_gas: None,
            tissues: surface_state,
        });

        // 1. Descent.
        let t_descent = bottom_depth.as_meters() / self.config.descent_rate;
        let p_bottom = conv.abs_pressure(bottom_depth);
        let descent_rate_bar = (p_bottom - self.config.surface_pressure) / t_descent;
        let state_at_bottom_start = load(
            &surface_state,
            table,
            t_descent,
            descent_rate_bar,
            self.config.surface_pressure,
            &bottom_mix.gas,
            &self.exp,
        );
        let mut cumulative = Time::from_minutes(t_descent);
        steps.push(DiveStep {
            phase: Phase::Descent,
            abs_p: p_bottom,
            time: cumulative,
            gas: bottom_mix.gas,
            prev_gas: None,
            tissues: state_at_bottom_start,
        });

        // 2. Bottom segment.
        let t_bottom = (bottom_time.as_minutes() - t_descent).max(0.0);
        let state_at_bottom_end = load(
            &state_at_bottom_start,
            table,
            t_bottom,
            0.0,
            p_bottom,
            &bottom_mix.gas,
            &self.exp,
        );
        cumulative += Time::from_minutes(t_bottom);
        steps.push(DiveStep {
            phase: Phase::Const,
            abs_p: p_bottom,
            time: cumulative,
            gas: bottom_mix.gas,
            prev_gas: None,
            tissues: state_at_bottom_end,
        });

        let gf_low = self.config.gf_low();
        let gf_high = self.config.gf_high();

        // 3. NDL check: hypothetical direct ascent to the surface.
        let t_hyp = bottom_depth.as_meters() / self.config.ascent_rate;
        let hyp_rate = (self.config.surface_pressure - p_bottom) / t_hyp;
        let hyp_state = load(
            &state_at_bottom_end,
            table,
            t_hyp,
            hyp_rate,
            p_bottom,
            &bottom_mix.gas,
            &self.exp,
        );
        if ascent_is_valid(&hyp_state, table, gf_low, self.config.surface_pressure) {
            cumulative += Time::from_minutes(t_hyp);
            steps.push(DiveStep {
                phase: Phase::Ascent,
                abs_p: self.config.surface_pressure,
                time: cumulative,
                gas: bottom_mix.gas,
                prev_gas: None,
                tissues: hyp_state,
            });
            return Ok(DivePlan {
                steps,
                deco_table: Vec::new(),
            });
        }

        // 4. Free-ascent stages, split at gas-switch depths shallower than
        // the bottom, deepest first.
        let mut switch_candidates: Vec<GasMix> = gas_list
            .iter()
            .filter(|g| {
                g.switch_depth.as_meters() < bottom_depth.as_meters() - 1e-9
                    && (g.switch_depth.as_meters() - bottom_mix.switch_depth.as_meters()).abs() > 1e-9
            })
            .copied()
            .collect();
        switch_candidates.sort_by(|a, b| b.switch_depth.as_meters().total_cmp(&a.switch_depth.as_meters()));
        switch_candidates.dedup_by(|a, b| (a.switch_depth.as_meters() - b.switch_depth.as_meters()).abs() < 1e-9);

        let mut running_state = state_at_bottom_end;
        let mut running_depth = bottom_depth;
        let mut running_gas = bottom_mix.gas;
        let mut first_stop: Option<Depth> = None;
        let mut boundaries: Vec<Depth> = switch_candidates
            .iter()
            .map(|g| g.switch_depth)
            .collect();
        boundaries.push(Depth::zero());

        let mut stage_idx = 0;
        'stages: while stage_idx < boundaries.len() {
            let target_boundary = boundaries[stage_idx];

            if stage_idx > 0 {
                if let Some(new_gas) = switch_candidates.get(stage_idx - 1).map(|g| g.gas) {
                    let switch_depth = boundaries[stage_idx - 1];
                    let aligned_next = Depth::from_meters(target_boundary.as_meters())
                        .ceil_to_step(STOP_STEP_METERS);
                    let switch_ok = gas_switch_is_valid(
                        &running_state,
                        table,
                        gf_low,
                        &conv,
                        running_depth,
                        switch_depth,
                        aligned_next,
                        &running_gas,
                        &new_gas,
                        self.config.ascent_rate,
                        &self.exp,
                    );
                    if !switch_ok {
                        break 'stages;
                    }
                    let prev_gas = running_gas;
                    running_gas = new_gas;
                    steps.push(DiveStep {
                        phase: Phase::GasMix,
                        abs_p: conv.abs_pressure(switch_depth),
                        time: cumulative,
                        gas: running_gas,
                        prev_gas: Some(prev_gas),
                        tissues: running_state,
                    });
                }
            }

            let (stop, new_state) = self.strategy.find_first_stop(
                running_state,
                table,
                gf_low,
                &conv,
                running_depth,
                target_boundary,
                &running_gas,
                self.config.ascent_rate,
                &self.exp,
            );
            let t_ascend = (running_depth.as_meters()
                - stop.unwrap_or(target_boundary).as_meters())
                / self.config.ascent_rate;
            cumulative += Time::from_minutes(t_ascend.max(0.0));
            running_state = new_state;

            match stop {
                Some(stop_depth) => {
                    steps.push(DiveStep {
                        phase: Phase::Ascent,
                        abs_p: conv.abs_pressure(stop_depth),
                        time: cumulative,
                        gas: running_gas,
                        prev_gas: None,
                        tissues: running_state,
                    });
                    running_depth = stop_depth;
                    first_stop = Some(stop_depth);
                    break 'stages;
                }
                None => {
                    steps.push(DiveStep {
                        phase: Phase::Ascent,
                        abs_p: conv.abs_pressure(target_boundary),
                        time: cumulative,
                        gas: running_gas,
                        prev_gas: None,
                        tissues: running_state,
                    });
                    running_depth = target_boundary;
                    stage_idx += 1;
                }
            }
        }

        let Some(mut stop_depth) = first_stop else {
            // Exhausted every stage without a stop: direct ascent reached
            // the surface after all (possible if an intermediate switch
            // loosened the ceiling). Nothing left to plan.
            return Ok(DivePlan {
                steps,
                deco_table: Vec::new(),
            });
        };

        // Clamp to the configured last stop depth (spec.md §6/§8): a
        // mandatory stop shallower than `last_stop_depth` (e.g. a 3 m
        // ceiling-chase result when the diver wants a 6 m last stop) is
        // always safe to deepen, since deeper is always ceiling-safe.
        stop_depth = stop_depth.max(self.config.last_stop_depth);

        // Projected-ascent adjustment (spec.md §4.4): deepen the stop if the
        // tentative depth is itself still above the ceiling (deep trimix
        // on-gassing dominating the ascent projection).
        let original_depth = bottom_depth;
        while !ascent_is_valid(&running_state, table, gf_low, conv.abs_pressure(stop_depth)) {
            let deeper = stop_depth + Depth::from_meters(STOP_STEP_METERS);
            if deeper.as_meters() >= original_depth.as_meters() {
                return Err(ComputationError::FirstStopBelowDecoZone {
                    stop_depth,
                    gas: running_gas,
                }
                .into());
            }
            stop_depth = deeper;
        }

        // 5. Decompression loop.
        let d1 = stop_depth;
        let mut current_depth = stop_depth;
        let mut current_state = running_state;
        let mut deco_table = Vec::new();

        loop {
            // Deco-only gas switch at a stop (no ascent involved).
            if let Some(mix) = gas_list.iter().find(|g| {
                (g.switch_depth.as_meters() - current_depth.as_meters()).abs() < 1e-9
                    && (g.gas.o2() - running_gas.o2()).abs() > 1e-9
            }) {
                let prev_gas = running_gas;
                running_gas = mix.gas;
                steps.push(DiveStep {
                    phase: Phase::GasMix,
                    abs_p: conv.abs_pressure(current_depth),
                    time: cumulative,
                    gas: running_gas,
                    prev_gas: Some(prev_gas),
                    tissues: current_state,
                });
            }

            let next_depth = if current_depth.as_meters() <= self.config.last_stop_depth.as_meters() + 1e-9
            {
                Depth::zero()
            } else {
                let candidate = current_depth.as_meters() - STOP_STEP_METERS;
                if candidate < self.config.last_stop_depth.as_meters() {
                    self.config.last_stop_depth
                } else {
                    Depth::from_meters(candidate)
                }
            };

            let gf_next = gf_at_depth(next_depth, d1, gf_low, gf_high);
            let p_stop = conv.abs_pressure(current_depth);
            let p_next = conv.abs_pressure(next_depth);

            let t_len = find_stop_length(&current_state, table, p_stop, p_next, gf_next, &running_gas, &self.exp)
                .ok_or(ComputationError::StopLengthNonConvergent {
                    depth: current_depth,
                    gas: running_gas,
                })?;

            if t_len > 0 {
                let stop_minutes = (t_len as f64).max(self.config.minimum_deco_stop_time);
                current_state = load(&current_state, table, stop_minutes, 0.0, p_stop, &running_gas, &self.exp);
                cumulative += Time::from_minutes(stop_minutes);
                steps.push(DiveStep {
                    phase: Phase::DecoStop,
                    abs_p: p_stop,
                    time: cumulative,
                    gas: running_gas,
                    prev_gas: None,
                    tissues: current_state,
                });
                deco_table.push(DecoStop {
                    depth: current_depth,
                    time: Time::from_minutes(stop_minutes),
                });
            }

            let t_ascend = (current_depth.as_meters() - next_depth.as_meters()) / self.config.ascent_rate;
            let ascend_rate = (p_next - p_stop) / t_ascend;
            current_state = load(&current_state, table, t_ascend, ascend_rate, p_stop, &running_gas, &self.exp);
            cumulative += Time::from_minutes(t_ascend);
            steps.push(DiveStep {
                phase: Phase::Ascent,
                abs_p: p_next,
                time: cumulative,
                gas: running_gas,
                prev_gas: None,
                tissues: current_state,
            });

            current_depth = next_depth;
            if current_depth.as_meters() <= 1e-9 {
                break;
            }
        }

        Ok(DivePlan { steps, deco_table })
    }
}
