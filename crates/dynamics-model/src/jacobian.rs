//! Joint Jacobians: relating joint velocities to a single joint's spatial velocity.

use dynamics_joint::joint::JointModel;
use dynamics_spatial::{
    configuration::Configuration,
    jacobian::Jacobian,
    motion::SpatialRotation,
    se3::{ActSE3, SE3},
};

use crate::data::Data;
use crate::error::{check_finite, check_len, ModelError};
use crate::forward_kinematics::forward_kinematics;
use crate::model::{Model, WORLD_ID};

/// The reference frame a Jacobian's columns are expressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JacobianFrame {
    /// Columns are the ancestor joints' spatial velocities expressed in the
    /// world frame, referenced at the world origin.
    World,
    /// Columns are expressed in joint `j`'s own local frame.
    Local,
    /// Columns use the world frame's orientation but are referenced at
    /// joint `j`'s current position (no rotation, only a translated
    /// reference point relative to [`JacobianFrame::World`]).
    LocalWorldAligned,
}

/// Computes the Jacobian of joint `j`'s spatial velocity with respect to the
/// full velocity vector, at configuration `q`, expressed in `frame`.
///
/// Populates `data.oMi`/`data.liMi` via [`forward_kinematics`] and
/// `data.jacobian` (size `6 x nv`; columns of ancestors of `j` that aren't
/// one are left at zero).
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` has the wrong length,
/// [`ModelError::InvalidInput`] if it contains a non-finite value,
/// [`ModelError::InvalidJoint`] if `j` is out of range.
pub fn compute_joint_jacobian<'a>(
    model: &Model,
    data: &'a mut Data,
    q: &Configuration,
    j: usize,
    frame: JacobianFrame,
) -> Result<&'a Jacobian, ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_finite("q", q.as_slice())?;
    if j >= model.njoints() {
        return Err(ModelError::InvalidJoint { index: j });
    }

    forward_kinematics(model, data, q)?;

    data.jacobian = Jacobian::zero(model.nv.max(1));
    let target_frame = match frame {
        JacobianFrame::Local => data.oMi[j],
        JacobianFrame::World => SE3::identity(),
        JacobianFrame::LocalWorldAligned => {
            SE3::from_parts(data.oMi[j].translation(), SpatialRotation::identity())
        }
    };

    let mut i = j;
    while i != WORLD_ID {
        let nv_i = model.joints[i].nv();
        if nv_i > 0 {
            let s_i = model.joints[i].subspace(&Configuration::from_element(nv_i, 1.0));
            let world_column = data.oMi[i].act(&s_i);
            let column = target_frame.act_inv(&world_column);
            data.jacobian
                .update_column(model.idx_v[i], column.as_slice());
        }
        i = model.parents[i];
    }

    Ok(&data.jacobian)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::neutral;
    use dynamics_spatial::vector3d::Vector3D;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
    use approx::assert_relative_eq;

    fn single_revolute_z() -> Model {
        let mut model = Model::empty();
        model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::z(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j",
            )
            .unwrap();
        model.finalize().unwrap()
    }

    #[test]
    fn a_single_joint_world_jacobian_matches_its_own_axis() {
        let model = single_revolute_z();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let jac = compute_joint_jacobian(&model, &mut data, &q, 1, JacobianFrame::World).unwrap();
        let col = jac.as_matrix().column(0);
        assert_relative_eq!(col[3], 0.0, epsilon = 1e-12);
        assert_relative_eq!(col[4], 0.0, epsilon = 1e-12);
        assert_relative_eq!(col[5], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn local_frame_jacobian_of_a_revolute_joints_own_axis_is_its_own_subspace() {
        let model = single_revolute_z();
        let mut data = Data::from(&model);
        let q = Configuration::from_row_slice(&[0.4]);
        let jac = compute_joint_jacobian(&model, &mut data, &q, 1, JacobianFrame::Local).unwrap();
        let col = jac.as_matrix().column(0);
        assert_relative_eq!(col[5], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn rejects_an_out_of_range_joint() {
        let model = single_revolute_z();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        assert!(compute_joint_jacobian(&model, &mut data, &q, 9, JacobianFrame::World).is_err());
    }
}
