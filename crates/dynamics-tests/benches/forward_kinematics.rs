use criterion::{criterion_group, criterion_main, Criterion};
use dynamics_rs::prelude::*;
use dynamics_tests::fixtures::six_axis_arm;
use std::hint::black_box;

fn test_forward_kinematics(model: &Model, data: &mut Data, q: &Configuration) {
    forward_kinematics(model, data, q).unwrap();
}

fn bench_forward_kinematics(c: &mut Criterion) {
    let model = six_axis_arm();
    let mut data = Data::from(&model);
    let q = random_configuration(&model);

    c.bench_function("forward_kinematics_six_axis", |b| {
        b.iter(|| black_box(test_forward_kinematics(&model, &mut data, &q)));
    });
}

criterion_group!(benches, bench_forward_kinematics);
criterion_main!(benches);
