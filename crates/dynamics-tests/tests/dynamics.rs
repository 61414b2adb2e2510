//! End-to-end RNEA/ABA/CRBA/energy scenarios and the universal invariants
//! that relate them.

use approx::assert_relative_eq;
use dynamics_rs::prelude::*;
use dynamics_tests::fixtures::{double_pendulum, single_revolute, two_r_planar};

#[test]
fn a_joint_rotating_about_gravity_feels_no_gravity_torque() {
    let model = single_revolute(Vector3D::z(), 1.0, 1.0);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.0]);
    let zero = Configuration::from_row_slice(&[0.0]);
    let tau = rnea(&model, &mut data, &q, &zero, &zero).unwrap();
    assert_relative_eq!(tau[0], 0.0, epsilon = 1e-9);
}

#[test]
fn a_joint_rotating_across_gravity_feels_its_full_weight() {
    let model = single_revolute(Vector3D::y(), 1.0, 1.0);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.0]);
    let zero = Configuration::from_row_slice(&[0.0]);
    let tau = rnea(&model, &mut data, &q, &zero, &zero).unwrap();
    assert_relative_eq!(tau[0], -9.81, epsilon = 1e-6);
}

#[test]
fn the_mass_matrix_of_a_point_mass_on_a_unit_arm_is_unity() {
    let model = single_revolute(Vector3D::z(), 1.0, 1.0);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.0]);
    let m = crba(&model, &mut data, &q).unwrap();
    assert_relative_eq!(m[(0, 0)], 1.0, epsilon = 1e-9);
}

#[test]
fn a_double_pendulum_hanging_straight_down_is_a_gravity_equilibrium() {
    // Both links point along -z: link1's joint rotates pi/2 about y to point
    // straight down, link2's own angle is 0 so it continues straight down.
    // Hanging straight down is the pendulum's stable equilibrium, so RNEA
    // at zero velocity/acceleration must report zero torque on both joints.
    let model = double_pendulum(0.5, 2.0);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[std::f64::consts::FRAC_PI_2, 0.0]);
    let zero = Configuration::zeros(2);
    let tau = rnea(&model, &mut data, &q, &zero, &zero).unwrap();
    assert_relative_eq!(tau[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(tau[1], 0.0, epsilon = 1e-6);
}

#[test]
fn aba_inverts_rnea_for_a_two_link_arm() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.3, -0.6]);
    let v = Configuration::from_row_slice(&[0.2, 0.4]);
    let a = Configuration::from_row_slice(&[1.1, -0.7]);

    let tau = rnea(&model, &mut data, &q, &v, &a).unwrap().clone();
    let a_recovered = aba(&model, &mut data, &q, &v, &tau).unwrap();

    assert_relative_eq!(a_recovered[0], a[0], epsilon = 1e-8);
    assert_relative_eq!(a_recovered[1], a[1], epsilon = 1e-8);
}

#[test]
fn kinetic_energy_matches_the_quadratic_form_of_the_mass_matrix() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.2, -0.1]);
    let v = Configuration::from_row_slice(&[0.5, -1.3]);

    let ke = kinetic_energy(&model, &mut data, &q, &v).unwrap();
    let m = crba(&model, &mut data, &q).unwrap().clone();
    let v_vec = nalgebra::DVector::from_row_slice(v.as_slice());
    let quadratic = 0.5 * (v_vec.transpose() * &m * &v_vec)[(0, 0)];

    assert_relative_eq!(ke, quadratic, epsilon = 1e-8);
}

#[test]
fn the_mass_matrix_is_symmetric_and_positive_definite() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.4, 0.9]);
    let m = crba(&model, &mut data, &q).unwrap().clone();

    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            assert_relative_eq!(m[(i, j)], m[(j, i)], epsilon = 1e-12);
        }
    }

    let ldlt = Ldlt::new(&m).unwrap();
    for &pivot in ldlt.pivots() {
        assert!(pivot > 0.0);
    }
}

#[test]
fn gravity_torque_matches_the_finite_difference_of_potential_energy() {
    let model = two_r_planar(0.5);
    let mut data = Data::from(&model);
    let q = Configuration::from_row_slice(&[0.3, 0.2]);
    let zero = Configuration::zeros(2);
    let tau = rnea(&model, &mut data, &q, &zero, &zero).unwrap().clone();

    let h = 1e-6;
    for j in 0..2 {
        let mut q_plus = q.as_slice().to_vec();
        q_plus[j] += h;
        let mut q_minus = q.as_slice().to_vec();
        q_minus[j] -= h;

        let pe_plus = potential_energy(&model, &mut data, &Configuration::from_row_slice(&q_plus)).unwrap();
        let pe_minus = potential_energy(&model, &mut data, &Configuration::from_row_slice(&q_minus)).unwrap();
        let finite_diff = (pe_plus - pe_minus) / (2.0 * h);

        assert_relative_eq!(tau[j], finite_diff, epsilon = 1e-5);
    }
}
