//! Prismatic joint, constraining two objects to translate along a given axis within limits.

use dynamics_spatial::{
    configuration::Configuration,
    force::SpatialForce,
    motion::{SpatialMotion, SpatialRotation},
    se3::SE3,
    vector3d::Vector3D,
};
use rand::rngs::ThreadRng;

use crate::{
    joint::{JointModel, JointType, JointWrapper},
    joint_data::{JointData, JointDataWrapper, JointError},
    limits::JointLimits,
};

/// Model of a prismatic joint.
///
/// This joint constrains two objects to translate along a given axis,
/// within the joint's position limits.
#[derive(Clone, Debug)]
pub struct JointModelPrismatic {
    /// The axis of translation, expressed in the local frame of the joint.
    pub axis: Vector3D,
    /// The joint limits.
    pub limits: JointLimits,
}

impl JointModelPrismatic {
    /// Creates a new `JointModelPrismatic` with the given axis and limits.
    #[must_use]
    pub fn new(axis: Vector3D, limits: JointLimits) -> Self {
        JointModelPrismatic { axis, limits }
    }

    /// Creates a new prismatic joint model with `x` as axis of translation and unbounded limits.
    #[must_use]
    pub fn new_px() -> Self {
        Self::new(Vector3D::x(), JointLimits::new_unbounded(1))
    }

    /// Creates a new prismatic joint model with `y` as axis of translation and unbounded limits.
    #[must_use]
    pub fn new_py() -> Self {
        Self::new(Vector3D::y(), JointLimits::new_unbounded(1))
    }

    /// Creates a new prismatic joint model with `z` as axis of translation and unbounded limits.
    #[must_use]
    pub fn new_pz() -> Self {
        Self::new(Vector3D::z(), JointLimits::new_unbounded(1))
    }
}

impl JointModel for JointModelPrismatic {
    fn get_joint_type(&self) -> JointType {
        JointType::Prismatic
    }

    fn nq(&self) -> usize {
        1
    }

    fn nv(&self) -> usize {
        1
    }

    fn neutral(&self) -> Configuration {
        Configuration::from_row_slice(&[0.0])
    }

    fn create_joint_data(&self) -> JointDataWrapper {
        JointDataWrapper::prismatic(JointDataPrismatic::new(self))
    }

    fn get_axis(&self) -> Vec<SpatialMotion> {
        vec![SpatialMotion::from_translational_axis(&self.axis)]
    }

    fn random_configuration(&self, rng: &mut ThreadRng) -> Configuration {
        Configuration::random(
            1,
            rng,
            &self.limits.min_configuration,
            &self.limits.max_configuration,
        )
    }

    fn subspace(&self, v: &Configuration) -> SpatialMotion {
        SpatialMotion::from_translational_axis(&self.axis) * v[0]
    }

    fn subspace_dual(&self, f: &SpatialForce) -> Configuration {
        Configuration::from_row_slice(&[f.translation().dot(&self.axis)])
    }

    fn bias(&self) -> SpatialMotion {
        SpatialMotion::zero()
    }

    fn transform(&self, q: &Configuration) -> SE3 {
        SE3::from_parts(self.axis * q[0], SpatialRotation::identity())
    }

    fn limits(&self) -> JointLimits {
        self.limits.clone()
    }

    fn integrate(&self, q: &Configuration, v: &Configuration) -> Configuration {
        Configuration::from_row_slice(&[q[0] + v[0]])
    }
}

/// Data associated to a prismatic joint.
#[derive(Clone, Debug)]
pub struct JointDataPrismatic {
    /// The current position of the joint.
    pub joint_q: Configuration,
    /// The current velocity of the joint.
    pub joint_v: Configuration,
    /// The placement of the joint in the local frame.
    pub placement: SE3,
    /// The velocity of the joint, as a spatial motion.
    pub joint_velocity: SpatialMotion,
}

impl JointDataPrismatic {
    /// Creates a new `JointDataPrismatic` associated to the given joint model.
    #[must_use]
    pub fn new(_model: &JointModelPrismatic) -> Self {
        JointDataPrismatic {
            joint_q: Configuration::zeros(1),
            joint_v: Configuration::zeros(1),
            placement: SE3::identity(),
            joint_velocity: SpatialMotion::zero(),
        }
    }
}

impl JointData for JointDataPrismatic {
    fn get_joint_q(&self) -> &Configuration {
        &self.joint_q
    }

    fn get_joint_v(&self) -> &Configuration {
        &self.joint_v
    }

    fn get_joint_placement(&self) -> SE3 {
        self.placement
    }

    fn update(
        &mut self,
        joint_model: &JointWrapper,
        joint_q: &Configuration,
        joint_v: Option<&Configuration>,
    ) -> Result<(), JointError> {
        if joint_q.len() != 1 {
            return Err(JointError::DimensionMismatch {
                name: "joint_q",
                expected: 1,
                got: joint_q.len(),
            });
        }
        if let Some(joint_v) = joint_v {
            if joint_v.len() != 1 {
                return Err(JointError::DimensionMismatch {
                    name: "joint_v",
                    expected: 1,
                    got: joint_v.len(),
                });
            }
            self.joint_v = joint_v.clone();
            self.joint_velocity = joint_model.subspace(joint_v);
        }

        self.joint_q = joint_q.clone();
        self.placement = joint_model.transform(joint_q);
        Ok(())
    }

    fn get_joint_velocity(&self) -> &SpatialMotion {
        &self.joint_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn prismatic_joint_has_a_single_degree_of_freedom() {
        let joint = JointModelPrismatic::new_px();
        assert_eq!(joint.nq(), 1);
        assert_eq!(joint.nv(), 1);
        assert_eq!(joint.get_axis().len(), 1);
    }

    #[test]
    fn translation_moves_along_the_axis_by_q() {
        let joint = JointModelPrismatic::new_pz();
        let q = Configuration::from_row_slice(&[2.5]);
        let se3 = joint.transform(&q);
        assert_relative_eq!(se3.translation().0, Vector3D::new(0.0, 0.0, 2.5).0, epsilon = 1e-12);
        assert_relative_eq!(se3.rotation().matrix(), SpatialRotation::identity().matrix());
    }

    #[test]
    fn update_populates_placement_and_velocity() {
        let joint = JointModelPrismatic::new_px();
        let mut data = JointDataPrismatic::new(&joint);
        let wrapper = JointWrapper::prismatic(joint);
        let q = Configuration::from_row_slice(&[1.0]);
        let v = Configuration::from_row_slice(&[0.5]);
        data.update(&wrapper, &q, Some(&v)).unwrap();
        assert_relative_eq!(data.get_joint_q().as_slice(), q.as_slice());
    }
}
