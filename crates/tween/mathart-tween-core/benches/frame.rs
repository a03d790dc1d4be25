use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mathart_test_fixtures::{generators, snapshots};
use mathart_tween_core::{
    interpolate_stepped, Config, NominalPlan, PortableSnapshot, PropertyBag, PropertySchema,
    TweenSession, Value,
};

fn bench_compute_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("TweenSession::compute_frame");

    let fixture = generators::load("tiles").expect("tiles generator fixture");
    let schema = PropertySchema::from_json_str(&generators::schema_json("tiles").expect("schema"))
        .expect("valid schema");
    let mut generator = PropertyBag::from_json(schema.clone(), fixture.values).expect("values");
    let start = PortableSnapshot::from_json_str(&snapshots::json("tiles-start").expect("start"))
        .expect("start snapshot");
    let end = PortableSnapshot::from_json_str(&snapshots::json("tiles-end").expect("end"))
        .expect("end snapshot");
    let (session, _) =
        TweenSession::from_portable(schema, &start, Some(&end), 1920.0, 1080.0, Config::default())
            .expect("session");

    // outbound half, return arc, loop close
    for &t in &[0.25, 0.6, 0.95] {
        group.bench_with_input(BenchmarkId::new("looping", t), &t, |b, &t| {
            b.iter(|| session.compute_frame(&mut generator, black_box(t), true))
        });
    }
    group.finish();
}

fn bench_large_lists(c: &mut Criterion) {
    let mut group = c.benchmark_group("lists");

    let count = 10_000;
    let a: Vec<Value> = (0..count).map(|i| Value::Flag(i % 3 == 0)).collect();
    let b: Vec<Value> = (0..count + 500).map(|i| Value::Flag(i % 2 == 0)).collect();
    let plan = NominalPlan::new(&a, &b);
    group.bench_function("nominal_apply", |bench| {
        bench.iter(|| plan.apply(&a, &b, black_box(0.4), true))
    });

    let xs = Value::numbers((0..count).map(f64::from));
    let ys = Value::numbers((0..count / 2).map(|i| f64::from(i) * 3.0));
    group.bench_function("stepped_numbers", |bench| {
        bench.iter(|| interpolate_stepped(&xs, &ys, black_box(0.7), false))
    });
    group.finish();
}

criterion_group!(benches, bench_compute_frame, bench_large_lists);
criterion_main!(benches);
