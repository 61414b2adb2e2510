//! Center of mass of the whole model at a given configuration.

use dynamics_spatial::{configuration::Configuration, vector3d::Vector3D};

use crate::data::Data;
use crate::error::{check_finite, check_len, ModelError};
use crate::forward_kinematics::forward_kinematics;
use crate::model::Model;

/// Computes the center of mass of the whole model, in the world frame, at
/// configuration `q`, along with the model's total mass.
///
/// Populates `data.oMi` via [`forward_kinematics`]. Returns `(Vector3D::zeros(), 0.0)`
/// if the model carries no mass at all.
///
/// # Errors
/// [`ModelError::DimensionMismatch`] if `q` has the wrong length,
/// [`ModelError::InvalidInput`] if it contains a non-finite value.
pub fn center_of_mass(
    model: &Model,
    data: &mut Data,
    q: &Configuration,
) -> Result<(Vector3D, f64), ModelError> {
    check_len("q", q.len(), model.nq)?;
    check_finite("q", q.as_slice())?;

    forward_kinematics(model, data, q)?;

    let mut total_mass = 0.0;
    let mut weighted = Vector3D::zeros();
    for j in 1..model.njoints() {
        let inertia = &model.inertias[j];
        if inertia.mass <= 0.0 {
            continue;
        }
        let com_world = data.oMi[j].rotation() * &inertia.com + data.oMi[j].translation();
        weighted = weighted + com_world * inertia.mass;
        total_mass += inertia.mass;
    }

    if total_mass <= 0.0 {
        return Ok((Vector3D::zeros(), 0.0));
    }
    Ok((weighted * (1.0 / total_mass), total_mass))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamics_inertia::Inertia;
    use dynamics_joint::joint::JointType;
    use dynamics_joint::limits::JointLimits;
    use dynamics_spatial::se3::SE3;
    use dynamics_spatial::symmetric3::Symmetric3;
    use approx::assert_relative_eq;

    #[test]
    fn a_single_point_mass_gives_its_own_world_position() {
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
                Inertia::new(2.0, Vector3D::new(1.0, 0.0, 0.0), Symmetric3::zeros()),
                SE3::identity(),
            )
            .unwrap();
        let model = model.finalize().unwrap();
        let mut data = Data::from(&model);
        let q = Configuration::from_row_slice(&[std::f64::consts::FRAC_PI_2]);
        let (com, mass) = center_of_mass(&model, &mut data, &q).unwrap();
        assert_relative_eq!(mass, 2.0);
        assert_relative_eq!(com.0, Vector3D::new(0.0, 1.0, 0.0).0, epsilon = 1e-10);
    }

    #[test]
    fn a_massless_model_has_zero_mass_and_zero_com() {
        let model = Model::empty().finalize().unwrap();
        let mut data = Data::from(&model);
        let q = Configuration::zeros(0);
        let (com, mass) = center_of_mass(&model, &mut data, &q).unwrap();
        assert_relative_eq!(mass, 0.0);
        assert_relative_eq!(com.0, Vector3D::zeros().0);
    }
}
