//! Composite Rigid Body Algorithm (CRBA): the joint-space mass matrix.

use dynamics_joint::joint::JointModel;
use dynamics_spatial::{configuration::Configuration, se3::ActSE3};

use crate::data::Data;
use crate::error::{check_finite, check_len, ModelError};
use crate::forward_kinematics::forward_kinematics;
use crate::model::{Model, WORLD_ID};

/// Computes the symmetric joint-space mass matrix `M(q)` (size `nv x nv`)
/// via the Composite Rigid Body Algorithm.
///
/// Populates `data.oMi`, `data.liMi`, `data.composite_inertia` and
/// `data.mass_matrix`, and returns `&data.mass_matrix`.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` has the wrong length,
/// [`ModelError::InvalidInput`] if it contains a non-finite value.
pub fn crba<'a>(
    model: &Model,
    data: &'a mut Data,
    q: &Configuration,
) -> Result<&'a nalgebra::DMatrix<f64>, ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_finite("q", q.as_slice())?;

    forward_kinematics(model, data, q)?;

    // Backward pass: fold each joint's composite inertia into its parent's,
    // re-expressed in the parent's own frame.
    data.composite_inertia = model.inertias.clone();
    for j in (1..model.njoints()).rev() {
        let parent = model.parents[j];
        let folded = data.liMi[j].act(&data.composite_inertia[j]);
        data.composite_inertia[parent] = data.composite_inertia[parent].clone() + folded;
    }

    data.mass_matrix = nalgebra::DMatrix::zeros(model.nv, model.nv);
    for j in 1..model.njoints() {
        let nv_j = model.joints[j].nv();
        if nv_j == 0 {
            continue;
        }

        let s_j = model.joints[j].subspace(&Configuration::from_element(nv_j, 1.0));
        let mut f = &data.composite_inertia[j] * &s_j;
        let m_jj = model.joints[j].subspace_dual(&f)[0];
        data.mass_matrix[(model.idx_v[j], model.idx_v[j])] = m_jj;

        let mut i = j;
        loop {
            let parent = model.parents[i];
            if parent == WORLD_ID {
                break;
            }
            f = data.liMi[i].act(&f);
            i = parent;
            let nv_i = model.joints[i].nv();
            if nv_i > 0 {
                let m_ij = model.joints[i].subspace_dual(&f)[0];
                data.mass_matrix[(model.idx_v[i], model.idx_v[j])] = m_ij;
                data.mass_matrix[(model.idx_v[j], model.idx_v[i])] = m_ij;
            }
        }
    }

    Ok(&data.mass_matrix)
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

    #[test]
    fn a_point_mass_on_a_revolute_joint_gives_its_moment_of_inertia() {
        let mut model = Model::empty();
        let j = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::z(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j",
            )
            .unwrap();
        model
            .append_body(
                j,
                Inertia::new(1.0, Vector3D::new(1.0, 0.0, 0.0), Symmetric3::zeros()),
                SE3::identity(),
            )
            .unwrap();
        let model = model.finalize().unwrap();
        let mut data = Data::from(&model);
        let q = neutral(&model);
        let m = crba(&model, &mut data, &q).unwrap();
        assert_relative_eq!(m[(0, 0)], 1.0, epsilon = 1e-10);
    }

    #[test]
    fn mass_matrix_is_symmetric_for_a_two_joint_chain() {
        let mut model = Model::empty();
        let j1 = model
            .add_joint(
                0,
                JointType::Revolute,
                Vector3D::z(),
                SE3::identity(),
                JointLimits::new_unbounded(1),
                "j1",
            )
            .unwrap();
        model
            .append_body(
                j1,
                Inertia::new(1.0, Vector3D::zeros(), Symmetric3::from_diagonal(&[0.01, 0.01, 0.02])),
                SE3::identity(),
            )
            .unwrap();
        let j2 = model
            .add_joint(
                j1,
                JointType::Revolute,
                Vector3D::y(),
                SE3::from_parts(Vector3D::new(1.0, 0.0, 0.0), dynamics_spatial::motion::SpatialRotation::identity()),
                JointLimits::new_unbounded(1),
                "j2",
            )
            .unwrap();
        model
            .append_body(
                j2,
                Inertia::new(1.0, Vector3D::new(0.5, 0.0, 0.0), Symmetric3::from_diagonal(&[0.01, 0.01, 0.02])),
                SE3::identity(),
            )
            .unwrap();
        let model = model.finalize().unwrap();
        let mut data = Data::from(&model);
        let q = Configuration::from_row_slice(&[0.3, -0.6]);
        let m = crba(&model, &mut data, &q).unwrap();
        assert_relative_eq!(m[(0, 1)], m[(1, 0)], epsilon = 1e-12);
    }
}
