//! Integrates a configuration forward by a velocity-space displacement.

use dynamics_spatial::configuration::Configuration;

use crate::error::{check_finite, check_len, ModelError};
use crate::model::Model;

/// Returns `q (+) v`: the configuration obtained by integrating `q` forward
/// by the velocity-space displacement `v` over unit time.
///
/// Each joint integrates its own slice independently (see
/// [`dynamics_joint::joint::JointModel::integrate`]); a continuous joint's
/// `(cos, sin)` pair is rotated rather than added component-wise, so the
/// result always stays a valid configuration.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` or `v` has the wrong length.
pub fn integrate(model: &Model, q: &Configuration, v: &Configuration) -> Result<Configuration, ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_len("v", v.len(), model.nv)?;
    check_finite("q", q.as_slice())?;
    check_finite("v", v.as_slice())?;

    let mut out = Configuration::zeros(model.nq);
    for j in 0..model.njoints() {
        let joint = &model.joints[j];
        let nq_j = joint.nq();
        if nq_j == 0 {
            continue;
        }
        let q_j = q.rows(model.idx_q[j], nq_j);
        let v_j = v.rows(model.idx_v[j], joint.nv());
        let q1_j = joint.integrate(&q_j, &v_j);
        out.update_rows(model.idx_q[j], &q1_j);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
    use dynamics_spatial::se3::SE3;
    use dynamics_spatial::vector3d::Vector3D;

    #[test]
    fn integrates_a_single_revolute_joint() {
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
        let model = model.finalize().unwrap();
        let q = Configuration::from_row_slice(&[0.2]);
        let v = Configuration::from_row_slice(&[0.1]);
        let q1 = integrate(&model, &q, &v).unwrap();
        assert!((q1[0] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn rejects_a_mismatched_velocity() {
        let model = Model::empty().finalize().unwrap();
        let q = Configuration::zeros(0);
        let v = Configuration::zeros(1);
        assert!(integrate(&model, &q, &v).is_err());
    }
}
