//! End-to-end inverse-kinematics scenarios on the 2R planar arm.

use dynamics_rs::prelude::*;
use dynamics_tests::fixtures::two_r_planar;

#[test]
fn a_reachable_target_converges_within_the_default_budget() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q0 = Configuration::from_row_slice(&[0.1, -0.1]);
    let options = IkOptions::new(&model);
    let result = solve_ik(&model, &mut data, Vector3D::new(1.0, 0.0, 0.0), &q0, &options).unwrap();
    assert!(result.converged);
    assert!(result.iters <= 30);
}

#[test]
fn an_out_of_reach_target_fails_to_converge_but_never_diverges() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q0 = Configuration::zeros(2);
    let mut options = IkOptions::new(&model);
    options.max_iter = 50;
    let result = solve_ik(&model, &mut data, Vector3D::new(10.0, 0.0, 0.0), &q0, &options).unwrap();
    assert!(!result.converged);
    assert!(result.q.as_slice().iter().all(|v| v.is_finite()));
}

#[test]
fn a_converged_solution_actually_places_the_end_effector_at_the_target() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q0 = Configuration::from_row_slice(&[0.2, 0.3]);
    let target = Vector3D::new(0.3, 0.6, 0.0);
    let options = IkOptions::new(&model);
    let result = solve_ik(&model, &mut data, target, &q0, &options).unwrap();
    assert!(result.converged);

    forward_kinematics(&model, &mut data, &result.q).unwrap();
    let reached = data.oMi[2].translation();
    assert!((reached - target).norm() < options.tol * 2.0);
}

#[test]
fn clamping_to_limits_keeps_the_solution_inside_the_bounded_range() {
    use dynamics_rs::joint::joint::JointType;
    use dynamics_rs::joint::limits::JointLimits;

    let mut model = Model::empty();
    let j1 = model
        .add_joint(
            0,
            JointType::Revolute,
            Vector3D::z(),
            SE3::identity(),
            JointLimits::new(
                100.0,
                10.0,
                Configuration::from_row_slice(&[-0.2]),
                Configuration::from_row_slice(&[0.2]),
                0.0,
                0.0,
                0.0,
            ),
            "j1",
        )
        .unwrap();
    model
        .append_body(
            j1,
            dynamics_rs::inertia::Inertia::new(1.0, Vector3D::zeros(), Default::default()),
            SE3::from_parts(Vector3D::new(0.5, 0.0, 0.0), dynamics_rs::spatial::motion::SpatialRotation::identity()),
        )
        .unwrap();
    let model = model.finalize().unwrap();

    let mut data = Data::from(&model);
    let q0 = Configuration::zeros(1);
    let mut options = IkOptions::new(&model);
    options.clamp_to_limits = true;
    let result = solve_ik(&model, &mut data, Vector3D::new(0.0, 0.5, 0.0), &q0, &options).unwrap();
    assert!(result.q[0] >= -0.2 - 1e-9 && result.q[0] <= 0.2 + 1e-9);
}
