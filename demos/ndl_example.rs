use dive_deco::{Depth, DiveConfig, DiveEngine, Gas, GasMix, Time};

fn main() {
    let engine = DiveEngine::new(DiveConfig::new());
    let gas_list = vec![GasMix::new(Gas::air(), Depth::zero())];

    let plan = engine
        .calculate(Depth::from_meters(18.0), Time::from_minutes(30.0), &gas_list)
        .expect("valid dive plan");

    if plan.deco_table.is_empty() {
        println!("no decompression required");
    } else {
        println!("unexpected deco stops: {:?}", plan.deco_table);
    }
}
