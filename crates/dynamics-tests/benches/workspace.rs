use criterion::{criterion_group, criterion_main, Criterion};
use dynamics_rs::prelude::*;
use dynamics_tests::fixtures::six_axis_arm;
use std::hint::black_box;

fn test_workspace_sample(model: &Model, data: &mut Data, options: &WorkspaceOptions) {
    sample_workspace(model, data, options, None, None).unwrap();
}

fn bench_workspace_sampling(c: &mut Criterion) {
    let model = six_axis_arm();
    let mut data = Data::from(&model);
    let mut options = WorkspaceOptions::new(&model);
    options.num_rays = 50;

    c.bench_function("workspace_sample_six_axis", |b| {
        b.iter(|| black_box(test_workspace_sample(&model, &mut data, &options)));
    });
}

criterion_group!(benches, bench_workspace_sampling);
criterion_main!(benches);
