//! Revolute joint, constraining two objects to rotate about a given axis within limits.

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

/// Model of a revolute joint.
///
/// This joint constrains two objects to rotate about a given axis, within
/// the joint's position limits. Unlike a continuous joint, its single
/// configuration value is the rotation angle itself.
#[derive(Clone, Debug)]
pub struct JointModelRevolute {
    /// The axis of rotation, expressed in the local frame of the joint.
    pub axis: Vector3D,
    /// The joint limits.
    pub limits: JointLimits,
}

impl JointModelRevolute {
    /// Creates a new `JointModelRevolute` with the given axis and limits.
    #[must_use]
    pub fn new(axis: Vector3D, limits: JointLimits) -> Self {
        JointModelRevolute { axis, limits }
    }

    /// Creates a new revolute joint model with `x` as axis of rotation and unbounded limits.
    #[must_use]
    pub fn new_rx() -> Self {
        Self::new(Vector3D::x(), JointLimits::new_unbounded(1))
    }

    /// Creates a new revolute joint model with `y` as axis of rotation and unbounded limits.
    #[must_use]
    pub fn new_ry() -> Self {
        Self::new(Vector3D::y(), JointLimits::new_unbounded(1))
    }

    /// Creates a new revolute joint model with `z` as axis of rotation and unbounded limits.
    #[must_use]
    pub fn new_rz() -> Self {
        Self::new(Vector3D::z(), JointLimits::new_unbounded(1))
    }
}

impl JointModel for JointModelRevolute {
    fn get_joint_type(&self) -> JointType {
        JointType::Revolute
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
        JointDataWrapper::revolute(JointDataRevolute::new(self))
    }

    fn get_axis(&self) -> Vec<SpatialMotion> {
        vec![SpatialMotion::from_rotational_axis(&self.axis)]
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
        SpatialMotion::from_rotational_axis(&self.axis) * v[0]
    }

    fn subspace_dual(&self, f: &SpatialForce) -> Configuration {
        Configuration::from_row_slice(&[f.rotation().dot(&self.axis)])
    }

    fn bias(&self) -> SpatialMotion {
        SpatialMotion::zero()
    }

    fn transform(&self, q: &Configuration) -> SE3 {
        SE3::from_parts(
            Vector3D::zeros(),
            SpatialRotation::from_axis_angle(&self.axis, q[0]),
        )
    }

    fn limits(&self) -> JointLimits {
        self.limits.clone()
    }

    fn integrate(&self, q: &Configuration, v: &Configuration) -> Configuration {
        Configuration::from_row_slice(&[q[0] + v[0]])
    }
}

/// Data associated to a revolute joint.
#[derive(Clone, Debug)]
pub struct JointDataRevolute {
    /// The current position of the joint.
    pub joint_q: Configuration,
    /// The current velocity of the joint.
    pub joint_v: Configuration,
    /// The placement of the joint in the local frame.
    pub placement: SE3,
    /// The velocity of the joint, as a spatial motion.
    pub joint_velocity: SpatialMotion,
}

impl JointDataRevolute {
    /// Creates a new `JointDataRevolute` associated to the given joint model.
    #[must_use]
    pub fn new(_model: &JointModelRevolute) -> Self {
        JointDataRevolute {
            joint_q: Configuration::zeros(1),
            joint_v: Configuration::zeros(1),
            placement: SE3::identity(),
            joint_velocity: SpatialMotion::zero(),
        }
    }
}

impl JointData for JointDataRevolute {
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
    fn revolute_joint_has_a_single_degree_of_freedom() {
        let joint = JointModelRevolute::new_rz();
        assert_eq!(joint.nq(), 1);
        assert_eq!(joint.nv(), 1);
        assert_eq!(joint.get_axis().len(), 1);
    }

    #[test]
    fn quarter_turn_about_z_has_the_requested_angle() {
        let joint = JointModelRevolute::new_rz();
        let q = Configuration::from_row_slice(&[std::f64::consts::FRAC_PI_2]);
        let se3 = joint.transform(&q);
        assert_relative_eq!(se3.rotation().angle(), std::f64::consts::FRAC_PI_2, epsilon = 1e-10);
    }

    #[test]
    fn integrate_adds_the_velocity_to_the_position() {
        let joint = JointModelRevolute::new_rz();
        let q = Configuration::from_row_slice(&[0.2]);
        let v = Configuration::from_row_slice(&[0.1]);
        let q1 = joint.integrate(&q, &v);
        assert_relative_eq!(q1[0], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn update_populates_placement_and_velocity() {
        let joint = JointModelRevolute::new_rz();
        let mut data = JointDataRevolute::new(&joint);
        let wrapper = JointWrapper::revolute(joint);
        let q = Configuration::from_row_slice(&[0.3]);
        let v = Configuration::from_row_slice(&[1.0]);
        data.update(&wrapper, &q, Some(&v)).unwrap();
        assert_relative_eq!(data.get_joint_q().as_slice(), q.as_slice());
    }
}
