//! Forward kinematics: placements, velocities and accelerations of every joint.

use dynamics_joint::joint_data::JointData;
use dynamics_spatial::{configuration::Configuration, se3::SE3, ActSE3};

use crate::error::{check_finite, check_len, ModelError};
use crate::model::{Model, WORLD_ID};
use crate::data::Data;

/// Computes the placement of every joint in the world frame, from the
/// configuration `q` alone.
///
/// Populates `data.joint_data` (per-joint placement), `data.liMi` (placement
/// relative to the parent) and `data.oMi` (placement in the world frame).
/// Velocities and accelerations are left untouched; use
/// [`forward_kinematics_velocity`] for those.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` has the wrong length,
/// [`ModelError::InvalidInput`] if it contains a non-finite value.
pub fn forward_kinematics(model: &Model, data: &mut Data, q: &Configuration) -> Result<(), ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_finite("q", q.as_slice())?;

    data.oMi[WORLD_ID] = SE3::identity();
    for j in 1..model.njoints() {
        let joint_model = &model.joints[j];
        let nq_j = joint_model.nq();
        let q_j = q.rows(model.idx_q[j], nq_j);

        data.joint_data[j]
            .update(joint_model, &q_j, None)
            .map_err(|e| ModelError::InvalidInput {
                reason: format!("joint '{}': {e}", model.joint_names[j]),
            })?;

        data.liMi[j] = model.placements[j] * data.joint_data[j].get_joint_placement();
        let parent = model.parents[j];
        data.oMi[j] = data.oMi[parent] * data.liMi[j];
    }
    Ok(())
}

/// Computes placements, spatial velocities and (gravity-loaded) spatial
/// accelerations of every joint, each expressed in the joint's own frame.
///
/// This is a superset of [`forward_kinematics`]; call it instead whenever
/// `data.v`/`data.a` are needed (e.g. before [`crate::energy`]).
///
/// # Errors
/// Same as [`forward_kinematics`], plus [`ModelError::DimensionMismatch`] if
/// `v` has the wrong length.
pub fn forward_kinematics_velocity(
    model: &Model,
    data: &mut Data,
    q: &Configuration,
    v: &Configuration,
) -> Result<(), ModelError> {
    check_len("v", v.len(), model.nv)?;
    check_finite("v", v.as_slice())?;

    data.oMi[WORLD_ID] = SE3::identity();
    data.v[WORLD_ID] = dynamics_spatial::motion::SpatialMotion::zero();
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

        let v_parent = data.liMi[j].act_inv(&data.v[parent]);
        data.v[j] = v_parent + data.joint_data[j].get_joint_velocity();

        let a_parent = data.liMi[j].act_inv(&data.a[parent]);
        data.a[j] = a_parent + data.v[j].cross(data.joint_data[j].get_joint_velocity());
    }
    Ok(())
}
