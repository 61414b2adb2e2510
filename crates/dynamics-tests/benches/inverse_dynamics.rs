use criterion::{criterion_group, criterion_main, Criterion};
use dynamics_rs::prelude::*;
use dynamics_tests::fixtures::six_axis_arm;
use std::hint::black_box;

fn test_inverse_dynamics(model: &Model, data: &mut Data, q: &Configuration, v: &Configuration, a: &Configuration) {
    rnea(model, data, q, v, a).unwrap();
}

fn bench_inverse_dynamics(c: &mut Criterion) {
    let model = six_axis_arm();
    let mut data = Data::from(&model);
    let q = random_configuration(&model);
    let v = Configuration::from_element(model.nv, 1.0);
    let a = Configuration::from_element(model.nv, 1.0);

    c.bench_function("inverse_dynamics_six_axis", |b| {
        b.iter(|| black_box(test_inverse_dynamics(&model, &mut data, &q, &v, &a)));
    });
}

criterion_group!(benches, bench_inverse_dynamics);
criterion_main!(benches);
