//! End-to-end scenarios and invariant checks for the dive engine.


use dive_deco::{ascent_is_valid, Depth, DiveEngine, ModelVariant, Phase, Time};
use fixtures::{config_with_last_stop_6m, config_with_variant, default_config, mixed_gas_plan, trimix_plan};

const EPSILON: f64 = 1e-6;

/// Every ASCENT/DECO_STOP step must be at or below its own ceiling under
/// *some* gf in the low/high schedule (the exact in-use value at an
/// arbitrary step depends on the first-stop depth, so this checks the
/// disjunction rather than reimplementing the interpolation).
fn ceiling_invariant_holds(plan: &dive_deco::DivePlan, config: &dive_deco::DiveConfig) {
    let table = config.model_variant.table();
    for step in &plan.steps {
        if matches!(step.phase, Phase::Ascent | Phase::DecoStop) {
            assert!(
                ascent_is_valid(&step.tissues, table, config.gf_high(), step.abs_p)
                    || ascent_is_valid(&step.tissues, table, config.gf_low(), step.abs_p),
                "ceiling violated at {:?}",
                step
            );
        }
    }
}

#[test]
fn scenario_1_ndl_air_dive() {
    let config = default_config();
    let engine = DiveEngine::new(config);
    let plan = engine
        .calculate(Depth::from_meters(18.0), Time::from_minutes(30.0), &fixtures::air_only())
        .expect("valid plan");

    assert!(plan.deco_table.is_empty());
    let total_ascent_time = plan
        .steps
        .iter()
        .rev()
        .find(|s| s.phase == Phase::Ascent)
        .map(|s| s.time.as_minutes())
        .unwrap();
    // Bottom ends at ~30min; ascent alone should be on the order of ~1.8min.
    assert!(total_ascent_time - 30.0 < 5.0);
}

#[test]
fn scenario_2_short_deco_air_dive() {
    let config = default_config();
    let engine = DiveEngine::new(config);
    let plan = engine
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &fixtures::air_only())
        .expect("valid plan");

    assert!(!plan.deco_table.is_empty());
    let first_stop = plan.deco_table.first().unwrap();
    assert!(first_stop.depth.as_meters() > 0.0);
    assert_eq!(first_stop.depth.as_meters() % 3.0, 0.0);

    let total: f64 = plan.deco_table.iter().map(|s| s.time.as_minutes()).sum();
    assert!(total > 0.0);

    for pair in plan.deco_table.windows(2) {
        assert!(pair[0].depth.as_meters() > pair[1].depth.as_meters());
    }
}

#[test]
fn scenario_3_mixed_gas_dive_switches_and_reduces_deco() {
    let config = default_config();
    let air_engine = DiveEngine::new(config);
    let air_plan = air_engine
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &fixtures::air_only())
        .expect("valid air plan");

    let mixed_engine = DiveEngine::new(default_config());
    let mixed_plan = mixed_engine
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &mixed_gas_plan())
        .expect("valid mixed-gas plan");

    assert!(mixed_plan.steps.iter().any(|s| s.phase == Phase::GasMix));
    assert!(mixed_plan.total_deco_time().as_minutes() <= air_plan.total_deco_time().as_minutes());
}

#[test]
fn scenario_4_last_stop_6m_variant() {
    let config = config_with_last_stop_6m();
    let engine = DiveEngine::new(config);
    let plan = engine
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &fixtures::air_only())
        .expect("valid plan");

    assert!(!plan.deco_table.iter().any(|s| (s.depth.as_meters() - 3.0).abs() < 1e-9));
    let last = plan.deco_table.last().unwrap();
    assert!((last.depth.as_meters() - 6.0).abs() < 1e-9);
}

#[test]
fn last_stop_6m_clamps_a_naturally_shallow_first_stop() {
    // A short excursion just past the no-deco limit at 21m: on the default
    // 3m stop grid this needs only a brief stop at 3m. With a 6m last stop
    // configured, that mandatory stop must be pushed to 6m rather than
    // emitted at 3m and then jumped straight to the surface.
    let shallow_plan = DiveEngine::new(default_config())
        .calculate(Depth::from_meters(21.0), Time::from_minutes(50.0), &fixtures::air_only())
        .expect("valid plan");
    assert!(!shallow_plan.deco_table.is_empty(), "profile should carry a deco obligation");
    assert!(shallow_plan
        .deco_table
        .iter()
        .any(|s| (s.depth.as_meters() - 3.0).abs() < 1e-9));

    let clamped_plan = DiveEngine::new(config_with_last_stop_6m())
        .calculate(Depth::from_meters(21.0), Time::from_minutes(50.0), &fixtures::air_only())
        .expect("valid plan");
    assert!(!clamped_plan.deco_table.is_empty());
    assert!(!clamped_plan
        .deco_table
        .iter()
        .any(|s| (s.depth.as_meters() - 3.0).abs() < 1e-9));
    let last = clamped_plan.deco_table.last().unwrap();
    assert!((last.depth.as_meters() - 6.0).abs() < 1e-9);
}

#[test]
fn scenario_5_zhl16c_is_no_less_conservative() {
    let b_plan = DiveEngine::new(config_with_variant(ModelVariant::ZhlB))
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &fixtures::air_only())
        .expect("valid B plan");
    let c_plan = DiveEngine::new(config_with_variant(ModelVariant::ZhlC))
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &fixtures::air_only())
        .expect("valid C plan");

    let b_first = b_plan.deco_table.first().map(|s| s.depth.as_meters()).unwrap_or(0.0);
    let c_first = c_plan.deco_table.first().map(|s| s.depth.as_meters()).unwrap_or(0.0);
    assert!(c_first >= b_first - EPSILON);
    assert!(c_plan.total_deco_time().as_minutes() >= b_plan.total_deco_time().as_minutes() - EPSILON);
}

#[test]
fn scenario_6_trimix_dive_first_stop_is_deep() {
    let engine = DiveEngine::new(default_config());
    let plan = engine
        .calculate(Depth::from_meters(60.0), Time::from_minutes(20.0), &trimix_plan())
        .expect("valid trimix plan");

    let first_stop = plan.deco_table.first().expect("at least one stop");
    assert!(first_stop.depth.as_meters() >= 24.0);
    ceiling_invariant_holds(&plan, &default_config());
}

#[test]
fn deco_table_depths_are_three_meter_or_last_stop_aligned() {
    let config = default_config();
    let engine = DiveEngine::new(config);
    let plan = engine
        .calculate(Depth::from_meters(45.0), Time::from_minutes(30.0), &fixtures::air_only())
        .expect("valid plan");

    for stop in &plan.deco_table {
        let m = stop.depth.as_meters();
        assert!(m % 3.0 < 1e-6 || (m - 3.0).abs() < 1e-6 || (m - 6.0).abs() < 1e-6);
        assert!(stop.time.as_minutes() > 0.0);
    }
}

#[test]
fn final_surfacing_satisfies_gf_high_ceiling() {
    let config = default_config();
    let engine = DiveEngine::new(config);
    let plan = engine
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &fixtures::air_only())
        .expect("valid plan");
    let final_step = plan.steps.last().unwrap();
    let table = config.model_variant.table();
    assert!(ascent_is_valid(&final_step.tissues, table, config.gf_high(), config.surface_pressure));
}
