use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dive_deco::{Depth, DiveConfig, DiveEngine, Gas, GasMix, Time};

fn air_only() -> Vec<GasMix> {
    vec![GasMix::new(Gas::air(), Depth::zero())]
}

fn bench_ndl_dive(c: &mut Criterion) {
    let engine = DiveEngine::new(DiveConfig::new());
    let gas_list = air_only();
    c.bench_function("ndl_dive_18m_30min", |b| {
        b.iter(|| {
            engine
                .calculate(
                    black_box(Depth::from_meters(18.0)),
                    black_box(Time::from_minutes(30.0)),
                    &gas_list,
                )
                .unwrap()
        })
    });
}

fn bench_deco_dive(c: &mut Criterion) {
    let engine = DiveEngine::new(DiveConfig::new());
    let gas_list = air_only();
    c.bench_function("deco_dive_40m_35min", |b| {
        b.iter(|| {
            engine
                .calculate(
                    black_box(Depth::from_meters(40.0)),
                    black_box(Time::from_minutes(35.0)),
                    &gas_list,
                )
                .unwrap()
        })
    });
}

fn bench_deep_trimix_dive(c: &mut Criterion) {
    let engine = DiveEngine::new(DiveConfig::new());
    let gas_list = vec![
        GasMix::new(Gas::new(0.18, 0.45), Depth::zero()),
        GasMix::new(Gas::new(0.50, 0.0), Depth::from_meters(21.0)),
        GasMix::new(Gas::new(1.00, 0.0), Depth::from_meters(6.0)),
    ];
    c.bench_function("trimix_dive_60m_20min", |b| {
        b.iter(|| {
            engine
                .calculate(
                    black_box(Depth::from_meters(60.0)),
                    black_box(Time::from_minutes(20.0)),
                    &gas_list,
                )
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_ndl_dive, bench_deco_dive, bench_deep_trimix_dive);
criterion_main!(benches);
