use dive_deco::{Depth, DiveConfig, DiveEngine, Gas, GasMix, Time};

fn main() {
    let config = DiveConfig::new().with_gradient_factors(30, 85);
    let engine = DiveEngine::new(config);

    let gas_list = vec![
        GasMix::new(Gas::air(), Depth::zero()),
        GasMix::new(Gas::new(0.50, 0.0), Depth::from_meters(21.0)),
        GasMix::new(Gas::new(1.00, 0.0), Depth::from_meters(6.0)),
    ];

    let plan = engine
        .calculate(Depth::from_meters(40.0), Time::from_minutes(35.0), &gas_list)
        .expect("valid dive plan");

    println!("deco stops:");
    for stop in &plan.deco_table {
        println!("  {:>3}m for {:.0} min", stop.depth.as_meters(), stop.time.as_minutes());
    }
    println!("total deco time: {:.1} min", plan.total_deco_time().as_minutes());
}
