//! Recursive Newton-Euler Algorithm (RNEA): inverse dynamics.

use dynamics_joint::joint_data::JointData;
use dynamics_spatial::{configuration::Configuration, se3::SE3, ActSE3};

use crate::data::Data;
use crate::error::{check_finite, check_len, ModelError};
use crate::model::{Model, WORLD_ID};

/// Computes the joint torques/forces `tau` required to produce the given
/// acceleration `a` at configuration `q`, velocity `v`, via the Recursive
/// Newton-Euler Algorithm.
///
/// Gravity is folded in automatically: the root's spatial acceleration is
/// initialized to `-gravity` (see [`Data::from`]), so calling this with
/// `a = 0` yields the torques needed to hold the robot static against
/// gravity.
///
/// Populates `data.oMi`, `data.liMi`, `data.v`, `data.a`, `data.h`, `data.f`
/// and returns `&data.tau`.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q`, `v` or `a` has the wrong
/// length; [`ModelError::InvalidInput`] if any contains a non-finite value.
pub fn rnea<'a>(
    model: &Model,
    data: &'a mut Data,
    q: &Configuration,
    v: &Configuration,
    a: &Configuration,
) -> Result<&'a Configuration, ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_len("v", v.len(), model.nv)?;
    check_len("a", a.len(), model.nv)?;
    check_finite("q", q.as_slice())?;
    check_finite("v", v.as_slice())?;
    check_finite("a", a.as_slice())?;

    data.oMi[WORLD_ID] = SE3::identity();
    data.v[WORLD_ID] = dynamics_spatial::motion::SpatialMotion::zero();
    // data.a[WORLD_ID] stays at -gravity, set by Data::from.

    // Forward pass: placements, velocities, accelerations, momenta, forces.
    for j in 1..model.njoints() {
        let joint_model = &model.joints[j];
        let nq_j = joint_model.nq();
        let nv_j = joint_model.nv();
        let q_j = q.rows(model.idx_q[j], nq_j);
        let v_j = v.rows(model.idx_v[j], nv_j);
        let a_j = a.rows(model.idx_v[j], nv_j);

        data.joint_data[j]
            .update(joint_model, &q_j, Some(&v_j))
            .map_err(|e| ModelError::InvalidInput {
                reason: format!("joint '{}': {e}", model.joint_names[j]),
            })?;

        data.liMi[j] = model.placements[j] * data.joint_data[j].get_joint_placement();
        let parent = model.parents[j];
        data.oMi[j] = data.oMi[parent] * data.liMi[j];

        let joint_velocity = data.joint_data[j].get_joint_velocity().clone();
        data.v[j] = data.liMi[j].act_inv(&data.v[parent]) + &joint_velocity;

        let joint_acceleration = joint_model.subspace(&a_j) + joint_model.bias();
        data.a[j] = data.liMi[j].act_inv(&data.a[parent])
            + joint_acceleration
            + data.v[j].cross(&joint_velocity);

        data.h[j] = &model.inertias[j] * &data.v[j];
        data.f[j] = &model.inertias[j] * &data.a[j] + data.v[j].cross_force(&data.h[j]);
    }

    // Backward pass: accumulate joint torques and propagate residual forces
    // up to the parent.
    data.tau = Configuration::zeros(model.nv);
    for j in (1..model.njoints()).rev() {
        let joint_model = &model.joints[j];
        let nv_j = joint_model.nv();
        if nv_j > 0 {
            let tau_j = joint_model.subspace_dual(&data.f[j]);
            data.tau.update_rows(model.idx_v[j], &tau_j);
        }
        let parent = model.parents[j];
        let f_in_parent = data.liMi[j].act(&data.f[j]);
        data.f[parent] += f_in_parent;
    }

    Ok(&data.tau)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{neutral, Model};
    use dynamics_inertia::Inertia;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
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
        let inertia = Inertia::new(1.0, Vector3D::new(1.0, 0.0, 0.0), Symmetric3::zeros());
        model.append_body(j, inertia, SE3::identity()).unwrap();
        model.finalize().unwrap()
    }

    #[test]
    fn static_torque_balances_gravity_at_full_horizontal_extension() {
        let model = pendulum();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let v = Configuration::zeros(1);
        let a = Configuration::zeros(1);
        let tau = rnea(&model, &mut data, &q, &v, &a).unwrap();
        // a unit point mass at (1, 0, 0) under standard gravity: tau = m*g*r = 9.81
        assert_relative_eq!(tau[0], 9.81, epsilon = 1e-8);
    }

    #[test]
    fn zero_gravity_and_zero_motion_gives_zero_torque() {
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
        let inertia = Inertia::new(1.0, Vector3D::new(1.0, 0.0, 0.0), Symmetric3::zeros());
        model.append_body(j, inertia, SE3::identity()).unwrap();
        model.gravity = Vector3D::zeros();
        let model = model.finalize().unwrap();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let v = Configuration::zeros(1);
        let a = Configuration::zeros(1);
        let tau = rnea(&model, &mut data, &q, &v, &a).unwrap();
        assert_relative_eq!(tau[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_a_mismatched_velocity() {
        let model = pendulum();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let v = Configuration::zeros(2);
        let a = Configuration::zeros(1);
        assert!(rnea(&model, &mut data, &q, &v, &a).is_err());
    }
}
