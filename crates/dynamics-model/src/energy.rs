//! Kinetic and potential energy of the whole model.

use dynamics_spatial::configuration::Configuration;

use crate::data::Data;
use crate::error::{check_finite, check_len, ModelError};
use crate::forward_kinematics::forward_kinematics_velocity;
use crate::model::Model;

/// Computes the total kinetic energy of the model at configuration `q` and
/// velocity `v`: `0.5 * sum_j v_j . (I_j v_j)`, each joint's velocity and
/// inertia expressed in its own local frame (the product is frame-invariant).
///
/// Populates `data.oMi`, `data.liMi` and `data.v` via
/// [`forward_kinematics_velocity`].
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` or `v` has the wrong length,
/// [`ModelError::InvalidInput`] if either contains a non-finite value.
pub fn kinetic_energy(
    model: &Model,
    data: &mut Data,
    q: &Configuration,
    v: &Configuration,
) -> Result<f64, ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_finite("q", q.as_slice())?;

    forward_kinematics_velocity(model, data, q, v)?;

    let mut energy = 0.0;
    for j in 1..model.njoints() {
        let h_j = &model.inertias[j] * &data.v[j];
        energy += data.v[j].power(&h_j);
    }
    Ok(0.5 * energy)
}

/// Computes the total potential energy of the model at configuration `q`,
/// relative to the world origin: `U(q) = -sum_j m_j * g . c_j(q)`, where
/// `c_j(q)` is body `j`'s center of mass in the world frame and `g` is the
/// model's gravity vector. A body sitting in the direction gravity pulls
/// towards has lower (more negative) potential energy.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` has the wrong length,
/// [`ModelError::InvalidInput`] if it contains a non-finite value.
pub fn potential_energy(model: &Model, data: &mut Data, q: &Configuration) -> Result<f64, ModelError> {
    crate::forward_kinematics::forward_kinematics(model, data, q)?;

    let mut energy = 0.0;
    for j in 1..model.njoints() {
        let inertia = &model.inertias[j];
        if inertia.mass <= 0.0 {
            continue;
        }
        let com_world = data.oMi[j].rotation() * &inertia.com + data.oMi[j].translation();
        energy -= inertia.mass * model.gravity.dot(&com_world);
    }
    Ok(energy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::neutral;
    use dynamics_inertia::Inertia;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
    use dynamics_spatial::se3::SE3;
    use dynamics_spatial::symmetric3::Symmetric3;
    use dynamics_spatial::vector3d::Vector3D;
    use approx::assert_relative_eq;

    fn pendulum() -> Model {
        let mut model = Model::empty();
        let j = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::y(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j",
            )
            .unwrap();
        let inertia = Inertia::new(2.0, Vector3D::new(1.0, 0.0, 0.0), Symmetric3::zeros());
        model.append_body(j, inertia, SE3::identity()).unwrap();
        model.finalize().unwrap()
    }

    fn hanging_pendulum() -> Model {
        let mut model = Model::empty();
        let j = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::y(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j",
            )
            .unwrap();
        let inertia = Inertia::new(2.0, Vector3D::new(0.0, 0.0, 1.0), Symmetric3::zeros());
        model.append_body(j, inertia, SE3::identity()).unwrap();
        model.finalize().unwrap()
    }

    #[test]
    fn zero_velocity_gives_zero_kinetic_energy() {
        let model = pendulum();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let v = Configuration::zeros(1);
        let e = kinetic_energy(&model, &mut data, &q, &v).unwrap();
        assert_relative_eq!(e, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn kinetic_energy_of_a_point_mass_matches_the_classical_formula() {
        let model = pendulum();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let omega = 3.0;
        let v = Configuration::from_row_slice(&[omega]);
        let e = kinetic_energy(&model, &mut data, &q, &v).unwrap();
        // point mass 2.0 kg at lever arm 1.0 m: E = 0.5 * m * (omega * r)^2
        assert_relative_eq!(e, 0.5 * 2.0 * omega * omega, epsilon = 1e-10);
    }

    #[test]
    fn potential_energy_is_lower_when_the_mass_hangs_below_the_joint() {
        let model = hanging_pendulum();
        let mut data = Data::from(&model);
        let up = Configuration::from_row_slice(&[0.0]);
        let down = Configuration::from_row_slice(&[std::f64::consts::PI]);
        let e_up = potential_energy(&model, &mut data, &up).unwrap();
        let e_down = potential_energy(&model, &mut data, &down).unwrap();
        assert!(e_down < e_up);
    }
}
