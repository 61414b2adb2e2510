//! Articulated Body Algorithm (ABA): forward dynamics.

use nalgebra::{Matrix6, Vector6};

use dynamics_joint::joint_data::JointData;
use dynamics_spatial::{
    configuration::Configuration,
    force::SpatialForce,
    motion::SpatialMotion,
    se3::{ActSE3, SE3},
};

use crate::data::Data;
use crate::error::{check_finite, check_len, ModelError};
use crate::model::{Model, WORLD_ID};

/// Computes the joint accelerations `ddq` produced by the given torques
/// `tau` at configuration `q`, velocity `v`, via the Articulated Body
/// Algorithm.
///
/// Gravity is folded in the same way as [`crate::inverse_dynamics::rnea`]:
/// the root's spatial acceleration is initialized to `-gravity`.
///
/// Populates `data.oMi`, `data.liMi`, `data.v`, `data.bias_acceleration`,
/// `data.bias_force`, `data.articulated_inertia`, `data.d_aba`,
/// `data.u_aba`, `data.apparent_torque`, `data.a` and returns `&data.ddq`.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q`, `v` or `tau` has the wrong
/// length; [`ModelError::InvalidInput`] if any contains a non-finite value;
/// [`ModelError::SingularArticulatedInertia`] if a joint's articulated
/// inertia degenerates (`D <= f64::EPSILON` in magnitude) at the current
/// configuration.
pub fn aba<'a>(
    model: &Model,
    data: &'a mut Data,
    q: &Configuration,
    v: &Configuration,
    tau: &Configuration,
) -> Result<&'a Configuration, ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_len("v", v.len(), model.nv)?;
    check_len("tau", tau.len(), model.nv)?;
    check_finite("q", q.as_slice())?;
    check_finite("v", v.as_slice())?;
    check_finite("tau", tau.as_slice())?;

    data.oMi[WORLD_ID] = SE3::identity();
    data.v[WORLD_ID] = SpatialMotion::zero();
    data.bias_force[WORLD_ID] = SpatialForce::zero();
    data.articulated_inertia[WORLD_ID] = Matrix6::zeros();
    // data.a[WORLD_ID] stays at -gravity, set by Data::from.

    // Pass 1 (forward): placements, velocities, per-joint bias force and
    // the articulated inertia seeded from each body's own rigid inertia.
    for j in 1..model.njoints() {
        let joint_model = &model.joints[j];
        let nq_j = joint_model.nq();
        let nv_j = joint_model.nv();
        let q_j = q.rows(model.idx_q[j], nq_j);
        let v_j = v.rows(model.idx_v[j], nv_j);

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
        data.bias_acceleration[j] = data.v[j].cross(&joint_velocity);

        let h_j = &model.inertias[j] * &data.v[j];
        data.bias_force[j] = data.v[j].cross_force(&h_j);
        data.articulated_inertia[j] = model.inertias[j].as_matrix6();
    }

    // Pass 2 (backward): reduce each joint's articulated inertia and bias
    // force by projecting out its own degree of freedom, then fold the
    // result into the parent's.
    for j in (1..model.njoints()).rev() {
        let joint_model = &model.joints[j];
        let nv_j = joint_model.nv();
        let parent = model.parents[j];

        let (ia_reduced, pa_reduced) = if nv_j == 0 {
            (data.articulated_inertia[j], data.bias_force[j].clone())
        } else {
            let s_j = joint_model.subspace(&Configuration::from_element(nv_j, 1.0));
            let u_vec = data.articulated_inertia[j] * s_j.as_vector6();
            let d_j = s_j.power(&SpatialForce::from_vector6(u_vec));
            if d_j.abs() <= f64::EPSILON {
                return Err(ModelError::SingularArticulatedInertia { joint: j });
            }
            let u_j = tau[model.idx_v[j]] - s_j.power(&data.bias_force[j]);

            let ia = data.articulated_inertia[j] - (u_vec * u_vec.transpose()) * (1.0 / d_j);
            let pa_vec = data.bias_force[j].as_vector6()
                + ia * data.bias_acceleration[j].as_vector6()
                + u_vec * (u_j / d_j);

            data.d_aba[j] = d_j;
            data.u_aba[j] = SpatialForce::from_vector6(u_vec);
            data.apparent_torque[j] = u_j;
            (ia, SpatialForce::from_vector6(pa_vec))
        };

        data.articulated_inertia[j] = ia_reduced;
        data.bias_force[parent] += data.liMi[j].act(&pa_reduced);
        data.articulated_inertia[parent] +=
            transform_articulated_inertia(&data.liMi[j], &ia_reduced);
    }

    // Pass 3 (forward): propagate the parent's acceleration down and solve
    // for each joint's own acceleration.
    data.ddq = Configuration::zeros(model.nv);
    for j in 1..model.njoints() {
        let joint_model = &model.joints[j];
        let nv_j = joint_model.nv();
        let parent = model.parents[j];
        let a_parent_in_j = data.liMi[j].act_inv(&data.a[parent]);

        if nv_j == 0 {
            data.a[j] = a_parent_in_j;
            continue;
        }

        let s_j = joint_model.subspace(&Configuration::from_element(nv_j, 1.0));
        let qdd_j = (data.apparent_torque[j] - a_parent_in_j.power(&data.u_aba[j]))
            / data.d_aba[j];
        data.ddq
            .update_rows(model.idx_v[j], &Configuration::from_row_slice(&[qdd_j]));
        data.a[j] = a_parent_in_j + s_j * qdd_j + data.bias_acceleration[j].clone();
    }

    Ok(&data.ddq)
}

/// Transforms an articulated-body inertia (a dense operator mapping a
/// spatial motion to a spatial force, expressed in the frame of `x`'s
/// source) into the frame `x` is placed in, by applying `x` to each basis
/// motion and reassembling the resulting force columns.
///
/// Unlike a rigid-body [`dynamics_inertia::Inertia`], a reduced articulated
/// inertia is no longer decomposable into a mass/center-of-mass/tensor
/// triple, so it cannot reuse `Inertia::act`; this works directly off the
/// tested [`ActSE3`] implementations for motion and force instead.
fn transform_articulated_inertia(x: &SE3, ia_local: &Matrix6<f64>) -> Matrix6<f64> {
    let mut out = Matrix6::zeros();
    for k in 0..6 {
        let mut e = Vector6::zeros();
        e[k] = 1.0;
        let m_parent = SpatialMotion::from_vector6(e);
        let m_local = x.act_inv(&m_parent);
        let f_local = SpatialForce::from_vector6(ia_local * m_local.as_vector6());
        let f_parent = x.act(&f_local);
        out.set_column(k, &f_parent.as_vector6());
    }
    out
}
